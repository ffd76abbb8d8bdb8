use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

/// Decoded field mapping for a single record.
///
/// Values stay as raw text; use [`lenient_int`] / [`lenient_float`] to read numbers.
pub type Fields = BTreeMap<String, String>;

/// LiveStats category codes
#[derive(AsRefStr, Clone, Copy, Debug, EnumString, Serialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[strum(serialize = "SD")]
    SystemDetails,
    #[strum(serialize = "CD")]
    ConnectionMeta,
    #[strum(serialize = "CN")]
    CellNetwork,
    #[strum(serialize = "WF")]
    WifiNetwork,
    #[strum(serialize = "CX")]
    ConnectionTx,
    #[strum(serialize = "EN")]
    Encoder,
    #[strum(serialize = "GP")]
    Gps,
    #[default]
    Unknown,
}

impl Category {
    /// Number of categories that own a de-duplication slot
    pub const KNOWN: usize = 7;

    /// Map a category code to its variant. Unrecognized codes map to `Unknown`.
    pub fn from_code(code: &str) -> Self {
        Category::from_str(code).unwrap_or(Category::Unknown)
    }

    /// Short code as it appears on the wire
    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::SystemDetails => "System Details",
            Category::ConnectionMeta => "Connection Meta",
            Category::CellNetwork => "Cell Network",
            Category::WifiNetwork => "WiFi Network",
            Category::ConnectionTx => "Connection Transmission",
            Category::Encoder => "Encoder",
            Category::Gps => "GPS",
            Category::Unknown => "Unknown",
        }
    }

    /// Index of this category's de-duplication slot, `None` for `Unknown`
    pub fn slot(&self) -> Option<usize> {
        match self {
            Category::SystemDetails => Some(0),
            Category::ConnectionMeta => Some(1),
            Category::CellNetwork => Some(2),
            Category::WifiNetwork => Some(3),
            Category::ConnectionTx => Some(4),
            Category::Encoder => Some(5),
            Category::Gps => Some(6),
            Category::Unknown => None,
        }
    }
}

const SECONDS_PER_HOUR: i64 = 3600;

/// Wall-clock stamp of a LiveStats line (`MM.SS.mmm`, minute of the hour).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Timestamp {
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl Timestamp {
    pub fn new(minutes: u32, seconds: u32, millis: u32) -> Self {
        Self {
            minutes,
            seconds,
            millis,
        }
    }

    /// Parse `MM.SS.mmm` leniently: missing or non-numeric parts read as zero.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split('.');
        let mut next = || parts.next().map(lenient_int).unwrap_or(0).max(0) as u32;
        let minutes = next();
        let seconds = next();
        let millis = next();
        Self {
            minutes,
            seconds,
            millis,
        }
    }

    /// Whole seconds from `earlier` to `self`, ignoring milliseconds.
    ///
    /// The clock only carries minute-of-hour, so the difference wraps at one hour.
    pub fn seconds_since(&self, earlier: &Timestamp) -> u32 {
        let end = i64::from(self.minutes) * 60 + i64::from(self.seconds);
        let start = i64::from(earlier.minutes) * 60 + i64::from(earlier.seconds);
        (end - start).rem_euclid(SECONDS_PER_HOUR) as u32
    }

    /// Whether `self` falls less than `window_secs` after `earlier`
    pub fn is_within(&self, earlier: &Timestamp, window_secs: u32) -> bool {
        self.seconds_since(earlier) < window_secs
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}.{:02}.{:03}",
            self.minutes, self.seconds, self.millis
        )
    }
}

/// Parsed LiveStats line
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LogRecord {
    pub timestamp: Timestamp,
    /// Software version plus the marker token, passed through as-is
    pub version_tag: String,
    pub category: Category,
    pub fields: Fields,
}

impl LogRecord {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field read as an integer, zero when absent or non-numeric
    pub fn int_field(&self, key: &str) -> i64 {
        self.field(key).map(lenient_int).unwrap_or(0)
    }

    /// Field read as a real number, zero when absent or non-numeric
    pub fn float_field(&self, key: &str) -> f64 {
        self.field(key).map(lenient_float).unwrap_or(0.0)
    }

    /// `Action` value of a System Details record
    pub fn action(&self) -> Option<&str> {
        match self.category {
            Category::SystemDetails => self.field("Action"),
            _ => None,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timestamp: {}, Software Version: {}, Category: {}, Data: {{",
            self.timestamp,
            self.version_tag,
            self.category.code()
        )?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Leading `[+-]?digits[.digits]` run of `text`, after leading whitespace.
fn numeric_prefix(text: &str, allow_fraction: bool) -> &str {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }
    if end == digits_start {
        return "";
    }
    &text[..end]
}

/// Permissive integer coercion: reads the leading integer, anything else is zero.
pub fn lenient_int(text: &str) -> i64 {
    numeric_prefix(text, false).parse().unwrap_or(0)
}

/// Permissive real coercion: reads the leading decimal number, anything else is zero.
pub fn lenient_float(text: &str) -> f64 {
    numeric_prefix(text, true).parse().unwrap_or(0.0)
}
