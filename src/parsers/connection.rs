//! Decoders for the connection-scoped categories: `CD`, `CN` and `GP`.
//!
//! All three share one container rule: a container holding any `=` is a list of
//! `key=value` pairs, otherwise it is the `number|generation|type` triple that
//! identifies the connection. GPS writes that triple under its own key names.

use super::grammar;
use super::types::Fields;
use super::Decode;

/// Key names for the positional connection triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionKeys {
    pub number: &'static str,
    pub generation: &'static str,
    pub kind: &'static str,
}

impl ConnectionKeys {
    fn as_array(&self) -> [&'static str; 3] {
        [self.number, self.generation, self.kind]
    }
}

pub const NETWORK_KEYS: ConnectionKeys = ConnectionKeys {
    number: "connection_number",
    generation: "connection_generation",
    kind: "connection_type",
};

pub const GPS_KEYS: ConnectionKeys = ConnectionKeys {
    number: "ConnectionNumber",
    generation: "ConnectionGeneration",
    kind: "ConnectionType",
};

fn decode_connection_containers(data: &str, keys: &ConnectionKeys) -> Fields {
    let mut fields = Fields::new();
    for container in grammar::containers(data) {
        if grammar::has_pairs(&container) {
            grammar::merge_pairs(&container, &mut fields);
        } else {
            grammar::assign_positional(&container, &keys.as_array(), &mut fields);
        }
    }
    fields
}

/// Connection meta details decoder (`CD`): interface and modem details.
pub struct ConnectionMetaDecoder;

impl Decode for ConnectionMetaDecoder {
    fn decode(&self, data: &str) -> Fields {
        decode_connection_containers(data, &NETWORK_KEYS)
    }
}

/// Cell network stats decoder (`CN`)
pub struct CellNetworkDecoder;

impl Decode for CellNetworkDecoder {
    fn decode(&self, data: &str) -> Fields {
        decode_connection_containers(data, &NETWORK_KEYS)
    }
}

/// GPS decoder (`GP`)
pub struct GpsDecoder;

impl Decode for GpsDecoder {
    fn decode(&self, data: &str) -> Fields {
        decode_connection_containers(data, &GPS_KEYS)
    }
}
