//! Filtering and ordering of scan results.

use crate::traits::ScanResult;
use serde::Deserialize;

/// How entries sharing an (SSID, BSSID) pair are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupMode {
    /// Keep every entry. Matches what deployed callers have always seen.
    #[default]
    Literal,
    /// Keep only the strongest signal per (SSID, BSSID).
    StrongestSignal,
}

/// Drops empty SSIDs and sorts by (SSID, BSSID, level) ascending.
pub fn order_scan_results(mut results: Vec<ScanResult>, mode: DedupMode) -> Vec<ScanResult> {
    results.retain(|r| !r.ssid.is_empty());
    results.sort_by(|a, b| {
        a.ssid
            .cmp(&b.ssid)
            .then_with(|| a.bssid.cmp(&b.bssid))
            .then_with(|| a.level.cmp(&b.level))
    });

    match mode {
        DedupMode::Literal => results,
        DedupMode::StrongestSignal => {
            // Within a group levels ascend, so the last entry is the strongest.
            let mut kept: Vec<ScanResult> = Vec::with_capacity(results.len());
            for result in results {
                match kept.last_mut() {
                    Some(last) if last.ssid == result.ssid && last.bssid == result.bssid => {
                        *last = result;
                    }
                    _ => kept.push(result),
                }
            }
            kept
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ap(ssid: &str, bssid: &str, level: i32) -> ScanResult {
        ScanResult::new(ssid, bssid, "[ESS]", level)
    }

    #[test]
    fn literal_mode_drops_empty_ssid_and_keeps_duplicates() {
        let raw = vec![ap("", "b1", -50), ap("Net", "b2", -60), ap("Net", "b2", -40)];
        let ordered = order_scan_results(raw, DedupMode::Literal);
        assert_eq!(ordered, vec![ap("Net", "b2", -60), ap("Net", "b2", -40)]);
    }

    #[test]
    fn sorts_by_ssid_then_bssid_then_level() {
        let raw = vec![
            ap("Zeta", "aa", -70),
            ap("Alpha", "cc", -30),
            ap("Alpha", "bb", -20),
            ap("Alpha", "bb", -80),
        ];
        let ordered = order_scan_results(raw, DedupMode::Literal);
        assert_eq!(
            ordered,
            vec![
                ap("Alpha", "bb", -80),
                ap("Alpha", "bb", -20),
                ap("Alpha", "cc", -30),
                ap("Zeta", "aa", -70),
            ]
        );
    }

    #[test]
    fn strongest_signal_mode_keeps_one_per_pair() {
        let raw = vec![
            ap("Net", "b2", -40),
            ap("", "b1", -50),
            ap("Net", "b2", -60),
            ap("Net", "b3", -90),
            ap("Other", "b2", -10),
        ];
        let ordered = order_scan_results(raw, DedupMode::StrongestSignal);
        assert_eq!(
            ordered,
            vec![ap("Net", "b2", -40), ap("Net", "b3", -90), ap("Other", "b2", -10)]
        );
    }

    #[test]
    fn empty_input() {
        assert!(order_scan_results(Vec::new(), DedupMode::StrongestSignal).is_empty());
    }
}
