use super::grammar;
use super::types::Fields;
use super::Decode;

/// `SD` payload action announcing transmitter start
pub const ACTION_STARTUP: &str = "APP.STARTUP";
/// `SD` payload action announcing transmitter shutdown
pub const ACTION_SHUTDOWN: &str = "APP.SHUTDOWN";

/// System Details decoder.
///
/// Every field of every container is a `key=value` pair, e.g.
/// `[Action=STREAM.START|GTG=3000]`.
pub struct SystemDetailsDecoder;

impl Decode for SystemDetailsDecoder {
    fn decode(&self, data: &str) -> Fields {
        let mut fields = Fields::new();
        for container in grammar::containers(data) {
            grammar::merge_pairs(&container, &mut fields);
        }
        fields
    }
}
