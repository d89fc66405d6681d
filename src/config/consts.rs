// src/config/consts.rs

// Dashboard pages
pub const BASE_URL_SPEED: &str = "https://servicedesk.service-online.live/traders-speed";
pub const BASE_URL_ADS: &str = "https://servicedesk.service-online.live/trader/ads";
pub const BASE_URL_CONVERSION: &str = "https://servicedesk.service-online.live/trader-conversions";
pub const BASE_URL_DEALS: &str = "https://servicedesk.service-online.live/trader/deals";
pub const BASE_URL_BANK_STATEMENTS: &str =
    "https://servicedesk.service-online.live/trader/bank-statements";

// Fixed query filters
pub const LINES_PER_PAGE: u32 = 20;
pub const ADS_STATUS_ACTIVE: u32 = 1;
pub const DEALS_FIAT_ID: u32 = 3;
pub const DEALS_STATUS_DISPUTED: u32 = 5;

// Render capability
pub const DEBUGGING_HOST: &str = "127.0.0.1";
pub const DEBUGGING_PORT: u16 = 9222;
pub const DEFAULT_WEBDRIVER_URL: &str = "http://127.0.0.1:9515";
pub const HTTP_TIMEOUT_SECS: u64 = 90;

// Waits
pub const TABLE_TIMEOUT_SECS: u64 = 60;
pub const TABLE_POLL_STEP_MS: u64 = 1_000;
pub const TABLE_PROBE_WAIT_MS: u64 = 1_000;
pub const EMPTY_TABLE_MIN_HEADERS: usize = 5;
pub const BOOT_TIMEOUT_MS: u64 = 15_000;
pub const BOOT_STEP_MS: u64 = 500;

// Files
pub const REGISTRY_FILE: &str = "service_providers.txt";
pub const GROUPS_FILE: &str = "employee_groups.txt";
pub const DEFAULT_OUT_DIR: &str = ".";
pub const REPORTS_DIR_PREFIX: &str = "reports_";
pub const REPORT_EXT: &str = "txt";
pub const UNASSIGNED_GROUP: &str = "Unassigned";

// Formats
pub const WINDOW_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const STATEMENT_DATE_FMT: &str = "%d.%m.%Y";
pub const RUN_STAMP_FMT: &str = "%Y%m%d_%H%M%S";
