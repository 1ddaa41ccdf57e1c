//! Config discovery and loading.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::schema::ParloConfig;

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["parlo.toml"];

/// Load config from the given TOML path.
pub fn load_config(path: &Path) -> anyhow::Result<ParloConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let config = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    Ok(config)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./parlo.toml` (project-local)
/// 2. `~/.config/parlo/parlo.toml` (user-global)
///
/// Returns `ParloConfig::default()` if no config file is found.
pub fn discover_and_load() -> ParloConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    ParloConfig::default()
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/parlo/
    if let Some(dirs) = directories::ProjectDirs::from("", "", "parlo") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}
