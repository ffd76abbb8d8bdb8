use super::types::{Category, LogRecord, Timestamp};
use super::DecodeOptions;

/// Minimum tokens on a LiveStats line: timestamp, version, marker, category
pub const MIN_TOKENS: usize = 4;

/// Errors raised while splitting a line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed line: expected at least 4 tokens, found {found}: {line:?}")]
    MalformedLine { found: usize, line: String },
}

/// Line split into its fixed prefix and raw payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub timestamp: Timestamp,
    pub version_tag: String,
    pub category: Category,
    pub code: &'a str,
    /// Remaining tokens re-joined with single spaces
    pub data: String,
}

/// Split a LiveStats line:
///
/// ```text
/// 53.38.818 3.1.0.DEV LVST SD [Action=APP.STARTUP]
/// |-------- |-------- |--- |- |-------------------
/// timestamp version   mark cat payload
/// ```
pub fn tokenize(line: &str) -> Result<RawLine<'_>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(ParseError::MalformedLine {
            found: tokens.len(),
            line: line.to_string(),
        });
    }

    Ok(RawLine {
        timestamp: Timestamp::parse(tokens[0]),
        version_tag: format!("{} {}", tokens[1], tokens[2]),
        category: Category::from_code(tokens[3]),
        code: tokens[3],
        data: tokens[MIN_TOKENS..].join(" "),
    })
}

impl LogRecord {
    /// Tokenize and decode one line with the default decoder options
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        Self::parse_with(line, &DecodeOptions::default())
    }

    pub fn parse_with(line: &str, options: &DecodeOptions) -> Result<Self, ParseError> {
        let raw = tokenize(line)?;
        let fields = super::decode(raw.category, &raw.data, options);
        Ok(LogRecord {
            timestamp: raw.timestamp,
            version_tag: raw.version_tag,
            category: raw.category,
            fields,
        })
    }
}
