use tracing::{debug, warn};

use crate::cli::Args;
use crate::config::Settings;
use crate::error::{Error, Result};

/// Settings for this run: config sources first, then command-line flags.
///
/// Configuration is optional. A file that cannot be read or does not validate
/// is reported and the defaults are used instead.
pub fn load_settings(args: &Args) -> Settings {
    let mut settings = read_settings().unwrap_or_else(|e| {
        warn!("{e}, using defaults");
        Settings::default()
    });
    apply_overrides(&mut settings, args);
    debug!(root = %settings.library.root.display(), "library root");
    settings
}

fn read_settings() -> Result<Settings> {
    let settings = Settings::load()?;
    settings
        .validate()
        .map_err(|msg| Error::Config(::config::ConfigError::Message(msg)))?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(root) = &args.root {
        settings.library.root = root.clone();
    }
    if let Some(browser) = args.browser {
        settings.download.cookies_from_browser = Some(browser);
    }
}
