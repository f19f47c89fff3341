use tracing::info;

use crate::batch;
use crate::cli::Args;
use crate::download::YtDlp;
use crate::pipeline::{self, Job};

mod settings;

pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings(&args);

    let downloader = YtDlp::new(settings.download.clone());
    if args.update || settings.download.self_update {
        downloader.self_update();
    }

    let root = &settings.library.root;
    let extensions = &settings.library.extensions;

    if let Some(path) = &args.batch {
        info!("loading library: {}", path.display());
        let entries = batch::load(path)?;
        let summary = pipeline::run_batch(&entries, root, &downloader, extensions);
        if summary.failed > 0 {
            return Err(format!("{} of {} jobs had failures", summary.failed, summary.jobs).into());
        }
        return Ok(());
    }

    let Some(url) = args.url else {
        return Err("either a URL or --batch is required".into());
    };

    let job = Job::single(
        root,
        url,
        args.artist,
        args.album,
        &settings.library.unknown_artist,
        &settings.library.unknown_album,
    );
    let report = pipeline::run_job(&job, &downloader, extensions)?;
    if report.has_failures() {
        return Err(format!("some files in {} could not be processed", job.output_dir.display()).into());
    }
    Ok(())
}
