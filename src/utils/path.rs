use std::path::{Path, PathBuf};

/// Environment variable that redirects the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "NUTRIFLOW_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (~/.config/nutriflow unless overridden)
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("nutriflow"),
    }
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Get the log directory (platform cache dir, falling back to home)
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("nutriflow")
}

/// Expand a path string, handling ~ and relative paths
///
/// # Arguments
/// * `path_str` - Path string that may start with ~
///
/// # Returns
/// Expanded PathBuf (relative paths are left relative to the working directory)
pub fn expand_path(path_str: &str) -> PathBuf {
    if let Some(rest) = path_str.strip_prefix("~/") {
        get_home_dir().join(rest)
    } else if path_str == "~" {
        get_home_dir()
    } else {
        PathBuf::from(path_str)
    }
}

/// Format a path for display (show ~ for home)
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}
