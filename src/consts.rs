/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Months rendered for a one-year plan starting on the first of a month
pub const MONTHS_PER_YEAR: usize = 12;

/// How far back a custom start date may reach
pub const CUSTOM_START_YEARS_BACK: u32 = 2;

/// Locale with its own long-date pattern
pub const KOREAN_LOCALE: &str = "ko";
/// Locale used when nothing else matches
pub const DEFAULT_LOCALE: &str = "en-US";

// Query keys understood by the renderer.

/// Coverage code
pub const KEY_COVERAGE: &str = "c";
/// First new-testament rest day
pub const KEY_REST_DAY_1: &str = "r1";
/// Second new-testament rest day
pub const KEY_REST_DAY_2: &str = "r2";
/// Plan duration
pub const KEY_DURATION: &str = "d";
/// Whole-bible reading order
pub const KEY_ORDER: &str = "o";
/// Single rest day
pub const KEY_REST_DAY: &str = "r";
/// Rendered year
pub const KEY_YEAR: &str = "y";
/// Rendered month, 1-based
pub const KEY_MONTH: &str = "m";
/// Start-date stamp (`YYYYMMDD`)
pub const KEY_START: &str = "s";
/// Display locale
pub const KEY_LOCALE: &str = "l";

/// `strftime` pattern of the start-date stamp
pub const START_STAMP_FORMAT: &str = "%Y%m%d";

/// Query pair separator
pub const PAIR_SEPARATOR: &str = "&";
/// Key/value separator inside a pair
pub const KEY_VALUE_SEPARATOR: char = '=';

// Renderer endpoints.

/// Per-month raster image
pub const DEFAULT_PNG_URL: &str = "/cpp/img.png";
/// Per-month vector image, used for thumbnails
pub const DEFAULT_SVG_URL: &str = "/cpp/img.svg";
/// Whole-plan PDF export
pub const DEFAULT_PDF_URL: &str = "/cpp/img.pdf";
/// Calendar feed; absolute because it is handed to other applications
pub const DEFAULT_ICS_URL: &str = "http://biblereadingcalendar.com/cpp/c.ics";
