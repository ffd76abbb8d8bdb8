//! Encoder/video stats decoder (`EN`).
//!
//! Example payload:
//! `[174|5000000|0|4038667|4009768|128144|0|*|7498|100|0|0|0|0.831324] [LiveVideo=1920x1080t@29.97(30000/1001)|h264|yuv420p] [LiveAudio=48000Hz|stereo(2)|opus|s16|(1000|20)]`
//!
//! The first container is 14 positional values. The optional video and audio
//! containers are each one `key=value` pair whose value keeps its `|` characters.

use regex::Regex;
use std::sync::LazyLock;

use super::grammar;
use super::types::Fields;
use super::Decode;

/// Positional layout of the first `EN` container
pub const ENCODER_KEYS: [&str; 14] = [
    "stream_id",
    "total_target_bps",
    "backlog_bps",
    "encoder_bps_to",
    "video_bps",
    "audio_bps",
    "encoder_bps_from",
    "encoder_mode",
    "total_broadcast_time",
    "network_health",
    "ifbgtg_delay",
    "ifb_sound_level",
    "number_of_lost_video_frames",
    "video_ssim",
];

pub const LOST_VIDEO_FRAMES: &str = "number_of_lost_video_frames";
pub const LIVE_VIDEO: &str = "LiveVideo";
pub const LIVE_AUDIO: &str = "LiveAudio";

static FRAME_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"x(?<size>[^t]*)t").expect("Failed to compile regex"));

/// Encoder decoder
#[derive(Clone, Copy, Debug, Default)]
pub struct EncoderDecoder {
    /// Take the third pair from the second container again. The audio pair is
    /// then dropped and the video pair merged twice.
    pub audio_from_video_container: bool,
}

impl Decode for EncoderDecoder {
    fn decode(&self, data: &str) -> Fields {
        let mut fields = Fields::new();
        let containers = grammar::containers(data);

        if let Some(stats) = containers.first() {
            grammar::assign_positional(stats, &ENCODER_KEYS, &mut fields);
        }

        if let Some(video) = containers.get(1) {
            grammar::merge_pair(video, &mut fields);
        }

        if containers.len() > 2 {
            let index = if self.audio_from_video_container { 1 } else { 2 };
            grammar::merge_pair(&containers[index], &mut fields);
        }

        fields
    }
}

/// Frame-size token of a `LiveVideo` value: the text between the first `x`
/// and the first `t` after it, e.g. `"1080"` for `1920x1080t@29.97`.
pub fn frame_size_token(live_video: &str) -> Option<&str> {
    FRAME_SIZE
        .captures(live_video)
        .and_then(|captures| captures.name("size"))
        .map(|size| size.as_str())
}
