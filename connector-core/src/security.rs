//! Security classification and password formatting.
//!
//! Both functions are pure. The formatter decides whether a password is
//! handed to the subsystem as a raw hex key or as a quoted ASCII
//! passphrase.

use serde::{Deserialize, Serialize};

const WEP_HEX_KEY_LENGTHS: [usize; 2] = [10, 26];
const PSK_HEX_KEY_LENGTH: usize = 64;

/// 无线网络安全类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    None,
    Wep,
    Psk,
}

impl SecurityType {
    /// Marker searched for in a capabilities string.
    pub fn marker(self) -> &'static str {
        match self {
            SecurityType::None => "NONE",
            SecurityType::Wep => "WEP",
            SecurityType::Psk => "PSK",
        }
    }
}

/// Derives the security type from a capabilities string.
///
/// "WEP" is checked before "PSK".
pub fn classify_security(capabilities: &str) -> SecurityType {
    if capabilities.contains(SecurityType::Wep.marker()) {
        SecurityType::Wep
    } else if capabilities.contains(SecurityType::Psk.marker()) {
        SecurityType::Psk
    } else {
        SecurityType::None
    }
}

/// Returns the value to store in the network configuration.
///
/// * `None` - always empty.
/// * `Wep` - a 10 or 26 character hex string passes through, anything else is quoted.
/// * `Psk` - a 64 character hex string passes through, anything else is quoted.
pub fn format_password(security: SecurityType, password: &str) -> String {
    let len = password.chars().count();
    match security {
        SecurityType::None => String::new(),
        SecurityType::Wep => {
            if WEP_HEX_KEY_LENGTHS.contains(&len) && is_hex(password) {
                password.to_string()
            } else {
                quote(password)
            }
        }
        SecurityType::Psk => {
            if len == PSK_HEX_KEY_LENGTH && is_hex(password) {
                password.to_string()
            } else {
                quote(password)
            }
        }
    }
}

/// Wraps a value in literal double quotes.
pub(crate) fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

fn is_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_64: &str = "0123456789abcdef0123456789ABCDEF0123456789abcdef0123456789ABCDEF";

    #[test]
    fn classifies_by_substring() {
        assert_eq!(classify_security("[WEP][ESS]"), SecurityType::Wep);
        assert_eq!(classify_security("[WPA2-PSK-CCMP][ESS]"), SecurityType::Psk);
        assert_eq!(classify_security("[ESS]"), SecurityType::None);
        assert_eq!(classify_security(""), SecurityType::None);
        assert_eq!(classify_security("[WPA2-EAP-CCMP]"), SecurityType::None);
    }

    #[test]
    fn wep_wins_when_both_markers_present() {
        assert_eq!(classify_security("[WPA-PSK][WEP]"), SecurityType::Wep);
    }

    #[test]
    fn wep_hex_keys_pass_through() {
        assert_eq!(format_password(SecurityType::Wep, "AABBCCDDEE"), "AABBCCDDEE");
        assert_eq!(
            format_password(SecurityType::Wep, "0123456789abcdef0123456789"),
            "0123456789abcdef0123456789"
        );
    }

    #[test]
    fn wep_passphrases_are_quoted() {
        assert_eq!(format_password(SecurityType::Wep, "hello12345"), "\"hello12345\"");
        // hex, but wrong length
        assert_eq!(format_password(SecurityType::Wep, "AABBCC"), "\"AABBCC\"");
        assert_eq!(format_password(SecurityType::Wep, ""), "\"\"");
    }

    #[test]
    fn psk_hex_key_passes_through() {
        assert_eq!(format_password(SecurityType::Psk, HEX_64), HEX_64);
    }

    #[test]
    fn psk_passphrases_are_quoted() {
        assert_eq!(format_password(SecurityType::Psk, "short"), "\"short\"");
        let not_hex = format!("{}g", &HEX_64[..63]);
        assert_eq!(format_password(SecurityType::Psk, &not_hex), format!("\"{}\"", not_hex));
        let too_long = format!("{}0", HEX_64);
        assert_eq!(format_password(SecurityType::Psk, &too_long), format!("\"{}\"", too_long));
    }

    #[test]
    fn open_networks_store_no_password() {
        assert_eq!(format_password(SecurityType::None, "anything"), "");
        assert_eq!(format_password(SecurityType::None, ""), "");
    }
}
