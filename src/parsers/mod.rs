//! LiveStats line parsing.
//!
//! A line is split by [`tokenizer::tokenize`] and its payload handed to the
//! decoder for its category. Each category has its own container layout; the
//! pieces they share live in [`grammar`].

pub mod connection;
pub mod encoder;
pub mod grammar;
pub mod system;
pub mod tokenizer;
pub mod transmission;
pub mod types;
pub mod wifi;

pub use tokenizer::{tokenize, ParseError, RawLine};
pub use types::{lenient_float, lenient_int, Category, Fields, LogRecord, Timestamp};

use connection::{CellNetworkDecoder, ConnectionMetaDecoder, GpsDecoder};
use encoder::EncoderDecoder;
use system::SystemDetailsDecoder;
use transmission::ConnectionTxDecoder;
use wifi::WifiNetworkDecoder;

/// Trait for category payload decoders
pub trait Decode {
    /// Decode a raw payload into named fields. Never fails: missing pieces are
    /// simply absent from the result.
    fn decode(&self, data: &str) -> Fields;
}

/// Switches that change how payloads are decoded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// See [`EncoderDecoder::audio_from_video_container`]
    pub encoder_audio_from_video_container: bool,
}

/// Decode `data` with the decoder for `category`. `Unknown` yields no fields.
pub fn decode(category: Category, data: &str, options: &DecodeOptions) -> Fields {
    match category {
        Category::SystemDetails => SystemDetailsDecoder.decode(data),
        Category::ConnectionMeta => ConnectionMetaDecoder.decode(data),
        Category::CellNetwork => CellNetworkDecoder.decode(data),
        Category::WifiNetwork => WifiNetworkDecoder.decode(data),
        Category::ConnectionTx => ConnectionTxDecoder.decode(data),
        Category::Encoder => EncoderDecoder {
            audio_from_video_container: options.encoder_audio_from_video_container,
        }
        .decode(data),
        Category::Gps => GpsDecoder.decode(data),
        Category::Unknown => Fields::new(),
    }
}
