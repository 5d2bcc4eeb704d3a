/// `load_config` module: reads the static YAML (or JSON) list of spreadsheets to snapshot.
///
/// This is the only place where the user-supplied configuration file is parsed.
/// Secrets (API key, token) never live in the file: the clients read them from
/// the environment.
///
/// # Errors
/// Failures use `anyhow::Error` with the file path in the message and are
/// surfaced at the CLI boundary.
use anyhow::Result;
use sheet_snapshot_core::config::{ConfigFile, SnapshotConfig};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Loads the snapshot configuration from `path`.
///
/// JSON files load too, JSON being a subset of YAML. The file is either the
/// full config object or a bare list of spreadsheet entries.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SnapshotConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let config: SnapshotConfig = match serde_yaml::from_str::<ConfigFile>(&config_content) {
        Ok(conf) => conf.into(),
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    config.trace_loaded();
    for entry in &config.spreadsheets {
        entry.trace_loaded();
    }
    Ok(config)
}
