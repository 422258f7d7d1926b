pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

pub const DEFAULT_SQLITE_URL: &str = "sqlite://data/regulations.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;
pub const DEFAULT_BUSY_TIMEOUT_SECONDS: u64 = 30;

pub const DEFAULT_REGISTRY_PATH: &str = "data/tracked_rules.json";

pub const DEFAULT_MINIMUM_CONTENT_LENGTH: usize = 20;
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("rule-tracker/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_CONTEXT_LINES: usize = 3;
pub const DEFAULT_PER_LINE_HEIGHT: u32 = 20;
pub const DEFAULT_MINIMUM_HEIGHT: u32 = 200;
pub const DEFAULT_MAXIMUM_HEIGHT: u32 = 600;
pub const DEFAULT_COLUMN_WIDTH: usize = 60;

pub const BASELINE_LABEL: &str = "Initial Baseline";
pub const CHANGE_LABEL: &str = "Change Detected";
