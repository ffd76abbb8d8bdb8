//! Feeding a line source through the analyzer.
//!
//! The caller owns the underlying file or stream; this module only consumes
//! lines in order and applies the malformed-line policy.

use std::io::BufRead;

use crate::analysis::{AnalysisError, HealthReport, SessionAnalyzer};
use crate::parsers::ParseError;
use crate::settings::{AnalyzerSettings, MalformedLinePolicy};

/// Errors from analyzing a whole line source
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("line {line_number}: {source}")]
    Malformed {
        /// 1-based line number
        line_number: usize,
        #[source]
        source: ParseError,
    },
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Analyzer plus the bookkeeping of the line source feeding it
#[derive(Debug)]
pub struct Ingest {
    analyzer: SessionAnalyzer,
    policy: MalformedLinePolicy,
    line_number: usize,
    skipped: usize,
}

impl Ingest {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self {
            analyzer: SessionAnalyzer::new(settings),
            policy: settings.on_malformed,
            line_number: 0,
            skipped: 0,
        }
    }

    /// Process the next line of the source
    pub fn push_line(&mut self, line: &str) -> Result<(), IngestError> {
        self.line_number += 1;
        match self.analyzer.process_line(line) {
            Ok(()) => Ok(()),
            Err(source) => match self.policy {
                MalformedLinePolicy::Abort => Err(IngestError::Malformed {
                    line_number: self.line_number,
                    source,
                }),
                MalformedLinePolicy::Skip => {
                    tracing::warn!("Skipping line {}: {}", self.line_number, source);
                    self.skipped += 1;
                    Ok(())
                }
            },
        }
    }

    /// Lines dropped under [`MalformedLinePolicy::Skip`]
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    pub fn analyzer(&self) -> &SessionAnalyzer {
        &self.analyzer
    }

    pub fn finish(self) -> Result<HealthReport, IngestError> {
        if self.skipped > 0 {
            tracing::info!(
                "Skipped {} of {} lines as malformed",
                self.skipped,
                self.line_number
            );
        }
        Ok(self.analyzer.finalize()?)
    }
}

/// Analyze an ordered sequence of lines as one session
pub fn analyze_lines<I, S>(
    lines: I,
    settings: &AnalyzerSettings,
) -> Result<HealthReport, IngestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ingest = Ingest::new(settings);
    for line in lines {
        ingest.push_line(line.as_ref())?;
    }
    ingest.finish()
}

/// Analyze every line of a reader as one session.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a stray byte in
/// a device name does not end the session.
pub fn analyze_reader<R: BufRead>(
    mut reader: R,
    settings: &AnalyzerSettings,
) -> Result<HealthReport, IngestError> {
    let mut ingest = Ingest::new(settings);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        ingest.push_line(&line)?;
    }
    ingest.finish()
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
