use super::grammar;
use super::types::Fields;
use super::Decode;

/// Positional layout of a `CX` container
pub const TRANSMISSION_KEYS: [&str; 15] = [
    "connection_number",
    "generation_number",
    "connection_state",
    "target_bps",
    "sigma_latency",
    "stream_health_percentage",
    "mean_latency",
    "missing_packet_count",
    "total_packet_count",
    "latency_jitter",
    "cathresh_bps",
    "remote_control_bps",
    "received_bps_smoothed",
    "received_bps_instantaneous",
    "reliability",
];

pub const RECEIVED_BPS_SMOOTHED: &str = "received_bps_smoothed";
pub const RECEIVED_BPS_INSTANTANEOUS: &str = "received_bps_instantaneous";

/// Connection transmission stats decoder (`CX`).
///
/// One container of 15 positional values, e.g.
/// `[1|10|6|2500000|33.00|100.00|22.14|0| 7|1.5841|5000000|0|2615747|2603464|1.00]`.
pub struct ConnectionTxDecoder;

impl Decode for ConnectionTxDecoder {
    fn decode(&self, data: &str) -> Fields {
        let mut fields = Fields::new();
        for container in grammar::containers(data) {
            grammar::assign_positional(&container, &TRANSMISSION_KEYS, &mut fields);
        }
        fields
    }
}
