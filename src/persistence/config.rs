use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "FEMVIEW_CONFIG";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Node coordinates, one `x y` record per line.
    pub points_path: PathBuf,
    /// Element connectivity, one `v0 v1 v2 v3 region` record per line.
    pub elements_path: PathBuf,
    /// Nodal field samples, one value per line.
    pub field_path: PathBuf,
    /// Rendered figure size in pixels.
    pub plot_width: u32,
    pub plot_height: u32,
    /// Log file. Defaults to `femview.log` in the data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            points_path: PathBuf::from("output/points.txt"),
            elements_path: PathBuf::from("output/elements.txt"),
            field_path: PathBuf::from("output/q.txt"),
            plot_width: 1000,
            plot_height: 700,
            log_file: None,
        }
    }
}

/// Path to the config file: `$FEMVIEW_CONFIG` if set, else the user config dir.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    Some(super::config_dir()?.join("config.toml"))
}

/// Load config from disk, returning defaults if file doesn't exist.
pub fn load_config() -> Result<Config, String> {
    let path = match config_path() {
        Some(p) => p,
        None => return Ok(Config::default()),
    };
    load_config_from(&path)
}

/// Load a specific config file. A missing file is created with defaults;
/// an unreadable or invalid one is an error so the wrong data is never shown.
pub fn load_config_from(path: &Path) -> Result<Config, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .map_err(|e| format!("{}: {}", path.display(), e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Create default config file on first run
            let config = Config::default();
            let _ = write_default_config(path, &config);
            Ok(config)
        }
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

pub fn parse_config(content: &str) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| format!("invalid config: {}", e))
}

/// Write a default config file with comments.
fn write_default_config(path: &Path, config: &Config) -> Result<(), String> {
    let content = format!(
        "# femview configuration\n\
         \n\
         # Solver output files (relative paths resolve against the working directory)\n\
         points_path = {:?}\n\
         elements_path = {:?}\n\
         field_path = {:?}\n\
         \n\
         # Figure size in pixels\n\
         plot_width = {}\n\
         plot_height = {}\n\
         \n\
         # Log file (default: femview.log in the data directory)\n\
         # log_file = \"/tmp/femview.log\"\n",
        config.points_path.display().to_string(),
        config.elements_path.display().to_string(),
        config.field_path.display().to_string(),
        config.plot_width,
        config.plot_height,
    );
    std::fs::write(path, content.as_bytes())
        .map_err(|e| format!("write error: {}", e))
}
