//! streamhealth - Stream health analysis for LiveStats transmitter logs
//!
//! This library parses the `LVST` telemetry lines written by a live-video
//! transmitter and derives a single health verdict for a completed session.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Line tokenizer and per-category payload decoders
//! - [`analysis`] - Session fold, metric formulas and the final report
//! - [`ingest`] - Feeding a line source through the analyzer
//! - [`settings`] - Analyzer settings persistence

pub mod analysis;
pub mod ingest;
pub mod parsers;
pub mod settings;

pub use analysis::{AnalysisError, HealthReport, OverallHealth, SessionAnalyzer, TotalTime};
pub use ingest::{analyze_lines, analyze_reader, IngestError};
pub use parsers::{Category, LogRecord, ParseError, Timestamp};
pub use settings::{AnalyzerSettings, Compatibility, MalformedLinePolicy};
