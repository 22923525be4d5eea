//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod report;

use std::io::Read;
use std::path::Path;

use kvitto_core::KvittoConfig;

/// Read an export from a file path, or from stdin when the path is `-`.
pub fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load configuration from the given path, or the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KvittoConfig> {
    match config_path {
        Some(path) => Ok(KvittoConfig::from_file(Path::new(path))?),
        None => Ok(KvittoConfig::default()),
    }
}
