use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// User-level defaults; every key can be overridden on the command line
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    /// Parent of `logs/` when the job file does not set one
    #[serde(default)]
    pub(crate) log_parent: Option<PathBuf>,
    /// Job file used when `--job` is omitted
    #[serde(default)]
    pub(crate) job: Option<PathBuf>,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/jobshim/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("jobshim").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, $XDG_CONFIG_HOME)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("jobshim").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.jobshim.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".jobshim.toml"));
        }

        paths
    }
}
