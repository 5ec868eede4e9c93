//! XDG Base Directory paths for apikeep.
//!
//! CLI tools should use XDG paths for cross-platform consistency,
//! not platform-native paths.

use std::path::PathBuf;

const APP_DIR: &str = "apikeep";

/// Get the apikeep config directory.
///
/// Returns `$XDG_CONFIG_HOME/apikeep` if set, otherwise `~/.config/apikeep`.
///
/// # Examples
///
/// ```
/// use apikeep_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Get the apikeep data directory.
///
/// Returns `$XDG_DATA_HOME/apikeep` if set, otherwise `~/.local/share/apikeep`.
/// Callers that persist credential records keep them here.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// Path of the user-level config file.
pub fn user_config_file() -> PathBuf {
    config_dir().join("config.toml")
}

fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(base) = std::env::var(env_var)
        && !base.is_empty()
    {
        PathBuf::from(base).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(home_relative).join(APP_DIR)
    } else {
        PathBuf::from(home_relative).join(APP_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_apikeep() {
        let path = config_dir();
        assert!(path.ends_with("apikeep"));
    }

    #[test]
    fn test_user_config_file_is_toml() {
        let path = user_config_file();
        assert!(path.ends_with("apikeep/config.toml"));
    }

    #[test]
    fn test_dirs_respect_xdg_env() {
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/tmp/test-config");
            std::env::set_var("XDG_DATA_HOME", "/tmp/test-data");
        }
        let config = config_dir();
        let data = data_dir();
        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
            std::env::remove_var("XDG_DATA_HOME");
        }
        assert_eq!(config, PathBuf::from("/tmp/test-config/apikeep"));
        assert_eq!(data, PathBuf::from("/tmp/test-data/apikeep"));
    }
}
