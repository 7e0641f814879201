pub mod config;

use std::path::PathBuf;

/// Get or create the femview data directory (~/.local/share/femview/).
pub fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("femview");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Get or create the femview config directory (~/.config/femview/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("femview");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
