use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_SERVER_NAME: &str = "mediadir";
pub const DEFAULT_HTTP_PORT: u16 = 8085;
pub const DEFAULT_CACHE_CLEAN_DELAY_MINUTES: i64 = 15;

/// Named runtime parameters. Keys that are no longer known are dropped on
/// load and disappear from the file on the next save.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Parameters {
    pub server_name: String,
    pub http_port: u16,
    /// Delay between two index sweeps. Zero or negative disables the sweep.
    pub cache_clean_delay_minutes: i64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            cache_clean_delay_minutes: DEFAULT_CACHE_CLEAN_DELAY_MINUTES,
        }
    }
}
