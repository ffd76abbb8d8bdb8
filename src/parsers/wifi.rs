//! WiFi network stats decoder (`WF`).
//!
//! Layout:
//! `[<interface>|<networks scanned>] [Connected=true(<ssid>)] [...] [<net>] [<net>] ...`
//! where each scanned network is
//! `<ms since detected>|<ssid>|<rssi>|<auth>|BSSIDs=<n>=[<bssid>(<rssi>);...]`.
//!
//! The record keeps one flat field mapping, so each scanned network overwrites
//! the previous one and only the last network's details survive.

use super::grammar;
use super::types::Fields;
use super::Decode;

const INTERFACE_KEYS: [&str; 2] = ["wifi_interface_name", "count_wifi_networks_scanned"];
const NETWORK_KEYS: [&str; 4] = ["time_since_detected", "ssid", "rssi", "authentication_method"];

/// Index of the first container describing a scanned network
const FIRST_NETWORK_CONTAINER: usize = 3;

pub struct WifiNetworkDecoder;

impl Decode for WifiNetworkDecoder {
    fn decode(&self, data: &str) -> Fields {
        let mut fields = Fields::new();
        let containers = grammar::containers(data);

        if let Some(interface) = containers.first() {
            grammar::assign_positional(interface, &INTERFACE_KEYS, &mut fields);
        }

        if let Some(status) = containers.get(1) {
            grammar::merge_pairs(status, &mut fields);
        }

        for network in containers.iter().skip(FIRST_NETWORK_CONTAINER) {
            decode_network(network, &mut fields);
        }

        fields
    }
}

fn decode_network(container: &str, fields: &mut Fields) {
    grammar::assign_positional(container, &NETWORK_KEYS, fields);

    let Some(bssids) = grammar::fields(container).nth(NETWORK_KEYS.len()) else {
        return;
    };
    // BSSIDs=<count>=<list>
    let mut parts = bssids.splitn(3, grammar::PAIR_DELIMITER);
    let _label = parts.next();
    if let Some(count) = parts.next() {
        fields.insert("bssids_count".to_string(), count.to_string());
    }
    if let Some(list) = parts.next() {
        fields.insert("bssids".to_string(), grammar::strip_brackets(list));
    }
}
