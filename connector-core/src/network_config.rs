use crate::security::{classify_security, format_password, quote, SecurityType};
use std::fmt;

/// Key management scheme of a network configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyManagement {
    /// Open or WEP network
    None,
    /// WPA/WPA2 pre-shared key
    WpaPsk,
}

/// 802.11 authentication algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAlgorithm {
    Open,
    Shared,
}

/// Connection intent handed to the Wi-Fi subsystem. Built fresh for each
/// connection attempt and never persisted here.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkConfiguration {
    /// SSID wrapped in double quotes.
    pub ssid: String,
    pub security: SecurityType,
    pub hidden_ssid: bool,
    pub key_management: KeyManagement,
    pub auth_algorithms: Vec<AuthAlgorithm>,
    pub wep_keys: [Option<String>; 4],
    pub wep_tx_key_index: usize,
    pub pre_shared_key: Option<String>,
}

impl NetworkConfiguration {
    /// SSID without the surrounding quotes.
    pub fn raw_ssid(&self) -> &str {
        unquote(&self.ssid)
    }

    /// The formatted password stored for this security type, empty for open networks.
    pub fn password(&self) -> &str {
        match self.security {
            SecurityType::None => "",
            SecurityType::Wep => self
                .wep_keys
                .get(self.wep_tx_key_index)
                .and_then(Option::as_deref)
                .unwrap_or(""),
            SecurityType::Psk => self.pre_shared_key.as_deref().unwrap_or(""),
        }
    }
}

// 不在日志里打印密钥
impl fmt::Debug for NetworkConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = |set: bool| if set { "********" } else { "(empty)" };
        f.debug_struct("NetworkConfiguration")
            .field("ssid", &self.ssid)
            .field("security", &self.security)
            .field("hidden_ssid", &self.hidden_ssid)
            .field("key_management", &self.key_management)
            .field("auth_algorithms", &self.auth_algorithms)
            .field("wep_key", &masked(self.wep_keys.iter().any(Option::is_some)))
            .field("pre_shared_key", &masked(self.pre_shared_key.is_some()))
            .finish()
    }
}

/// Builds the configuration for connecting to `ssid`.
///
/// Construction never fails: password validation only decides between
/// raw-key and quoted-passphrase formatting.
pub fn build_configuration(ssid: &str, capabilities: &str, password: &str) -> NetworkConfiguration {
    let security = classify_security(capabilities);
    let formatted = format_password(security, password);

    let mut config = NetworkConfiguration {
        ssid: quote(ssid),
        security,
        hidden_ssid: false,
        key_management: KeyManagement::None,
        auth_algorithms: Vec::new(),
        wep_keys: Default::default(),
        wep_tx_key_index: 0,
        pre_shared_key: None,
    };

    match security {
        SecurityType::None => {}
        SecurityType::Wep => {
            config.auth_algorithms = vec![AuthAlgorithm::Open, AuthAlgorithm::Shared];
            config.wep_keys[0] = Some(formatted);
        }
        SecurityType::Psk => {
            config.key_management = KeyManagement::WpaPsk;
            config.pre_shared_key = Some(formatted);
        }
    }
    config
}

/// Strips one pair of surrounding double quotes, if present.
pub(crate) fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_64: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn psk_with_hex_key() {
        let config = build_configuration("MyNet", "[WPA2-PSK-CCMP][ESS]", HEX_64);
        assert_eq!(config.ssid, "\"MyNet\"");
        assert!(!config.hidden_ssid);
        assert_eq!(config.security, SecurityType::Psk);
        assert_eq!(config.key_management, KeyManagement::WpaPsk);
        assert_eq!(config.pre_shared_key.as_deref(), Some(HEX_64));
        assert!(config.auth_algorithms.is_empty());
        assert_eq!(config.wep_keys, [None, None, None, None]);
    }

    #[test]
    fn psk_with_passphrase_is_quoted() {
        let config = build_configuration("MyNet", "PSK", "hunter22");
        assert_eq!(config.password(), "\"hunter22\"");
    }

    #[test]
    fn wep_sets_both_auth_algorithms_and_primary_key() {
        let config = build_configuration("Legacy", "[WEP][ESS]", "AABBCCDDEE");
        assert_eq!(config.key_management, KeyManagement::None);
        assert_eq!(config.auth_algorithms, vec![AuthAlgorithm::Open, AuthAlgorithm::Shared]);
        assert_eq!(config.wep_keys[0].as_deref(), Some("AABBCCDDEE"));
        assert_eq!(config.pre_shared_key, None);
        assert_eq!(config.password(), "AABBCCDDEE");
    }

    #[test]
    fn open_network_has_no_key_material() {
        let config = build_configuration("Cafe", "[ESS]", "ignored");
        assert_eq!(config.key_management, KeyManagement::None);
        assert!(config.auth_algorithms.is_empty());
        assert_eq!(config.wep_keys, [None, None, None, None]);
        assert_eq!(config.pre_shared_key, None);
        assert_eq!(config.password(), "");
        assert_eq!(config.raw_ssid(), "Cafe");
    }

    #[test]
    fn out_of_range_wep_key_index_reads_as_empty() {
        let mut config = build_configuration("Legacy", "[WEP]", "AABBCCDDEE");
        config.wep_tx_key_index = 7;
        assert_eq!(config.password(), "");
    }

    #[test]
    fn debug_output_masks_keys() {
        let config = build_configuration("MyNet", "PSK", "supersecret");
        let dbg = format!("{:?}", config);
        assert!(!dbg.contains("supersecret"));
        assert!(dbg.contains("********"));
    }

    #[test]
    fn unquote_only_strips_a_full_pair() {
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("\"a"), "\"a");
        assert_eq!(unquote("a"), "a");
    }
}
