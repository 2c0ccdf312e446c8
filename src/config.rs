use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::time::Duration;

/// Hard ceiling on terminals opened by one run, whatever the config says.
pub const MAX_WINDOWS: usize = 10;

pub const DEFAULT_PREFIX: &str = "Streamer";
pub const DEFAULT_INGEST_URL: &str = "rtmp://a.rtmp.youtube.com/live2";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_executable_name")]
    pub executable_name: String,
    #[serde(default = "default_keys_extension")]
    pub keys_extension: String,
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
    #[serde(default = "default_ingest_url")]
    pub ingest_url: String,
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    #[serde(default = "default_max_windows")]
    pub max_windows: usize,
    #[serde(default = "default_launch_delay_ms")]
    pub launch_delay_ms: u64,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_arrange_delay_ms")]
    pub arrange_delay_ms: u64,
    #[serde(default = "default_window_width")]
    pub window_width: i32,
    #[serde(default = "default_window_height")]
    pub window_height: i32,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
    #[serde(default = "default_window_title_pattern")]
    pub window_title_pattern: String,
    #[serde(default = "default_terminal_command")]
    pub terminal_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            executable_name: default_executable_name(),
            keys_extension: default_keys_extension(),
            script_extension: default_script_extension(),
            ingest_url: default_ingest_url(),
            default_prefix: default_prefix(),
            max_windows: default_max_windows(),
            launch_delay_ms: default_launch_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            arrange_delay_ms: default_arrange_delay_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            grid_columns: default_grid_columns(),
            window_title_pattern: default_window_title_pattern(),
            terminal_command: default_terminal_command(),
        }
    }
}

impl AppConfig {
    /// Reads `Loopcast.toml` from the working directory when present, then
    /// `LOOPCAST_*` environment variables on top of it.
    pub fn load() -> Result<AppConfig, ConfigError> {
        let builder = Config::builder()
            .add_source(ConfigFile::with_name("Loopcast").required(false))
            .add_source(Environment::with_prefix("LOOPCAST").try_parsing(true))
            .build()?;
        builder.try_deserialize::<AppConfig>()
    }

    pub fn window_cap(&self) -> usize {
        self.max_windows.min(MAX_WINDOWS)
    }

    pub fn launch_delay(&self) -> Duration {
        Duration::from_millis(self.launch_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn arrange_delay(&self) -> Duration {
        Duration::from_millis(self.arrange_delay_ms)
    }

    /// Script extension with its leading dot, lower-cased, as catalog keys are.
    pub fn script_bucket(&self) -> String {
        normalize_extension(&self.script_extension)
    }

    pub fn keys_bucket(&self) -> String {
        normalize_extension(&self.keys_extension)
    }
}

/// `"TXT"`, `".txt"` and `"txt"` all become `".txt"`.
pub fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(".{}", trimmed.to_lowercase())
    }
}

fn default_executable_name() -> String {
    if cfg!(windows) {
        "ffmpeg.exe".to_string()
    } else {
        "ffmpeg".to_string()
    }
}

fn default_keys_extension() -> String {
    ".txt".to_string()
}

fn default_script_extension() -> String {
    if cfg!(windows) {
        "bat".to_string()
    } else {
        "sh".to_string()
    }
}

fn default_ingest_url() -> String {
    DEFAULT_INGEST_URL.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_max_windows() -> usize {
    MAX_WINDOWS
}

fn default_launch_delay_ms() -> u64 {
    1000
}

fn default_settle_delay_ms() -> u64 {
    1000
}

fn default_arrange_delay_ms() -> u64 {
    500
}

fn default_window_width() -> i32 {
    480
}

fn default_window_height() -> i32 {
    350
}

fn default_grid_columns() -> usize {
    4
}

fn default_window_title_pattern() -> String {
    if cfg!(windows) {
        "*cmd.exe*".to_string()
    } else {
        "*Terminal*".to_string()
    }
}

fn default_terminal_command() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["open".to_string(), "-a".to_string(), "Terminal".to_string()]
    } else if cfg!(windows) {
        vec!["cmd".to_string(), "/C".to_string(), "start".to_string(), "cmd".to_string(), "/K".to_string()]
    } else {
        vec!["x-terminal-emulator".to_string(), "-e".to_string(), "sh".to_string()]
    }
}
