use crate::traits::{ConfiguredNetwork, NetworkId, ScanResult};
use crate::{Error, Result};

/// Parse `wpa_cli scan_results` output into scan results.
///
/// Columns: bssid, frequency, signal level, flags, ssid. The flags column is
/// kept verbatim as the capabilities string. Hidden networks keep an empty
/// SSID here; filtering happens in `scan::order_scan_results`.
pub fn parse_scan_results(output: &str) -> Vec<ScanResult> {
    let mut results = Vec::new();
    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.splitn(5, '\t').collect();
        if parts.len() < 4 {
            continue;
        }
        let level: i32 = parts[2].trim().parse().unwrap_or(-100);
        let mut ssid = decode_ssid(parts.get(4).copied().unwrap_or(""));
        // Hidden networks show up as a run of NUL bytes.
        if ssid.chars().all(|c| c == '\0') {
            ssid.clear();
        }
        results.push(ScanResult {
            ssid,
            bssid: parts[0].to_string(),
            capabilities: parts[3].to_string(),
            level,
        });
    }
    results
}

/// Parse `wpa_cli list_networks` output.
///
/// Columns: network id, ssid, bssid, flags. Lines whose id does not parse
/// are skipped.
pub fn parse_list_networks(output: &str) -> Vec<ConfiguredNetwork> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let network_id = parts.next()?.trim().parse::<NetworkId>().ok()?;
            let ssid = decode_ssid(parts.next().unwrap_or(""));
            Some(ConfiguredNetwork { network_id, ssid })
        })
        .collect()
}

/// Undo the escaping wpa_cli applies to SSIDs (`\\`, `\"`, `\e`, `\n`,
/// `\r`, `\t`, `\xNN`). Bytes that are not valid UTF-8 are replaced.
pub fn decode_ssid(escaped: &str) -> String {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        match bytes[i + 1] {
            b'\\' => out.push(b'\\'),
            b'"' => out.push(b'"'),
            b'e' => out.push(0x1b),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'x' => {
                let hex = escaped.get(i + 2..i + 4).and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(byte) = hex {
                    out.push(byte);
                    i += 4;
                    continue;
                }
                out.extend_from_slice(b"\\x");
            }
            other => {
                out.push(b'\\');
                out.push(other);
            }
        }
        i += 2;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Value for `set_network <id> ssid`: quoted when the SSID is printable
/// ASCII, otherwise the hex form of its bytes.
pub fn ssid_value(ssid: &str) -> String {
    if ssid.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        format!("\"{}\"", ssid)
    } else {
        ssid.bytes().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Parse the id printed by `wpa_cli add_network`.
pub fn parse_network_id(output: &str) -> Result<NetworkId> {
    output
        .trim()
        .lines()
        .last()
        .and_then(|line| line.trim().parse::<NetworkId>().ok())
        .ok_or_else(|| Error::CommandFailed(format!("Failed to parse network ID from wpa_cli: {}", output)))
}

/// True when `wpa_cli status` reports a completed association.
pub fn status_is_connected(output: &str) -> bool {
    output.lines().any(|line| line.trim() == "wpa_state=COMPLETED")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN_OUTPUT: &str = "bssid / frequency / signal level / flags / ssid\n\
        aa:bb:cc:00:00:01\t2412\t-45\t[WPA2-PSK-CCMP][ESS]\tMyHomeWiFi\n\
        aa:bb:cc:00:00:02\t5180\t-61\t[ESS]\tCafe Guest\n\
        aa:bb:cc:00:00:03\t2437\t-80\t[WEP][ESS]\t\\x00\n\
        aa:bb:cc:00:00:04\t2462\t-70\t[WPA2-PSK-CCMP][ESS]\n\
        garbage\n";

    #[test]
    fn parses_scan_results() {
        let results = parse_scan_results(SCAN_OUTPUT);
        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0],
            ScanResult::new("MyHomeWiFi", "aa:bb:cc:00:00:01", "[WPA2-PSK-CCMP][ESS]", -45)
        );
        assert_eq!(results[1].ssid, "Cafe Guest");
        assert_eq!(results[2].ssid, "");
        assert_eq!(results[2].capabilities, "[WEP][ESS]");
        assert_eq!(results[3].ssid, "");
    }

    #[test]
    fn decodes_escaped_and_utf8_ssids() {
        let output = "bssid / frequency / signal level / flags / ssid\n\
            aa:bb\t2412\t-40\t[WPA2-PSK-CCMP][ESS]\tcaf\\xc3\\xa9\n\
            aa:cc\t2412\t-41\t[ESS]\tsay \\\"hi\\\" \\\\ bye\n\
            aa:dd\t2412\t-42\t[ESS]\t\\x00\\x00\\x00\n";
        let results = parse_scan_results(output);
        assert_eq!(results[0].ssid, "café");
        assert_eq!(results[1].ssid, "say \"hi\" \\ bye");
        assert_eq!(results[2].ssid, "");

        let networks = parse_list_networks("network id / ssid / bssid / flags\n0\tcaf\\xc3\\xa9\tany\t\n");
        assert_eq!(networks[0].ssid, "café");
    }

    #[test]
    fn decode_keeps_malformed_escapes() {
        assert_eq!(decode_ssid("a\\xZZ"), "a\\xZZ");
        assert_eq!(decode_ssid("trailing\\"), "trailing\\");
        assert_eq!(decode_ssid("plain"), "plain");
    }

    #[test]
    fn ssid_value_quotes_ascii_and_hex_encodes_the_rest() {
        assert_eq!(ssid_value("Home"), "\"Home\"");
        assert_eq!(ssid_value("say \"hi\""), "\"say \"hi\"\"");
        assert_eq!(ssid_value("café"), "636166c3a9");
    }

    #[test]
    fn parses_list_networks() {
        let output = "network id / ssid / bssid / flags\n\
            0\tOffice\tany\t[DISABLED]\n\
            1\tHome\tany\t[CURRENT]\n\
            FAIL\n";
        let networks = parse_list_networks(output);
        assert_eq!(
            networks,
            vec![
                ConfiguredNetwork { network_id: 0, ssid: "Office".into() },
                ConfiguredNetwork { network_id: 1, ssid: "Home".into() },
            ]
        );
    }

    #[test]
    fn parses_network_id() {
        assert_eq!(parse_network_id("3\n").unwrap(), 3);
        assert!(matches!(parse_network_id("FAIL\n"), Err(Error::CommandFailed(_))));
    }

    #[test]
    fn detects_completed_state() {
        assert!(status_is_connected("bssid=aa\nssid=Home\nwpa_state=COMPLETED\nip_address=10.0.0.2\n"));
        assert!(!status_is_connected("wpa_state=SCANNING\n"));
    }
}
