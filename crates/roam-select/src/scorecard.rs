//! # Per-BSSID Score Card
//!
//! Connection history per physical AP, consulted synchronously while
//! candidates are built. The registry reads the internet-availability
//! estimate off each looked-up entry and backfills the saved-network id so
//! later cycles can correlate history with configuration.
//!
//! Only the surface the registry needs is defined here; a production score
//! card hangs richer history off the same entries. Lookups are in-memory and
//! non-blocking — the selection path never waits on I/O.

use roam_common::MacAddr;
use serde::Serialize;
use std::collections::HashMap;

use crate::network::NetworkId;

/// Estimate reported before any history has accumulated.
const DEFAULT_PERCENT_INTERNET: u8 = 50;

// ─── PerBssidStats ──────────────────────────────────────────────────────────

/// History entry for one (network, BSSID) pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerBssidStats {
    /// Saved-network id last associated with this BSSID.
    network_config_id: Option<NetworkId>,
    /// Connections that reached the internet.
    connections_with_internet: u32,
    /// Total connections observed.
    connections_total: u32,
}

impl PerBssidStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_network_config_id(&mut self, id: NetworkId) {
        self.network_config_id = Some(id);
    }

    pub fn network_config_id(&self) -> Option<NetworkId> {
        self.network_config_id
    }

    /// Record the outcome of one connection to this BSSID.
    pub fn note_internet_access(&mut self, reachable: bool) {
        self.connections_total += 1;
        if reachable {
            self.connections_with_internet += 1;
        }
    }

    /// Estimated probability (in percent) that a connection to this BSSID
    /// reaches the internet. 50 until history exists.
    pub fn estimate_percent_internet_availability(&self) -> u8 {
        if self.connections_total == 0 {
            DEFAULT_PERCENT_INTERNET
        } else {
            let frac =
                self.connections_with_internet as f64 / self.connections_total as f64;
            (frac * 100.0).round() as u8
        }
    }
}

// ─── ScoreCard ──────────────────────────────────────────────────────────────

/// Synchronous per-BSSID history lookup.
///
/// `lookup_bssid` never fails: an unknown pair gets a fresh entry with the
/// default estimate.
pub trait ScoreCard {
    fn lookup_bssid(&mut self, ssid: &str, bssid: MacAddr) -> &mut PerBssidStats;
}

/// In-memory score card.
#[derive(Debug, Default)]
pub struct MemoryScoreCard {
    entries: HashMap<(String, MacAddr), PerBssidStats>,
}

impl MemoryScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect an entry without creating it.
    pub fn get(&self, ssid: &str, bssid: MacAddr) -> Option<&PerBssidStats> {
        self.entries.get(&(ssid.to_string(), bssid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreCard for MemoryScoreCard {
    fn lookup_bssid(&mut self, ssid: &str, bssid: MacAddr) -> &mut PerBssidStats {
        self.entries
            .entry((ssid.to_string(), bssid))
            .or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bssid() -> MacAddr {
        "00:00:00:00:00:01".parse().unwrap()
    }

    #[test]
    fn fresh_entry_reports_default_estimate() {
        let mut card = MemoryScoreCard::new();
        let entry = card.lookup_bssid("\"cafe\"", bssid());
        assert_eq!(entry.estimate_percent_internet_availability(), 50);
        assert_eq!(entry.network_config_id(), None);
    }

    #[test]
    fn estimate_tracks_recorded_outcomes() {
        let mut stats = PerBssidStats::new();
        for reachable in [true, true, true, true, false, false, false] {
            stats.note_internet_access(reachable);
        }
        // 4 of 7 connections reached the internet.
        assert_eq!(stats.estimate_percent_internet_availability(), 57);
    }

    #[test]
    fn lookups_are_stable_per_pair() {
        let mut card = MemoryScoreCard::new();
        card.lookup_bssid("\"cafe\"", bssid()).set_network_config_id(3);
        assert_eq!(
            card.get("\"cafe\"", bssid()).unwrap().network_config_id(),
            Some(3)
        );
        // A different SSID on the same BSSID is a distinct entry.
        assert!(card.get("\"other\"", bssid()).is_none());
        assert_eq!(card.len(), 1);
    }

    #[test]
    fn stats_serialize_for_diagnostics() {
        let mut stats = PerBssidStats::new();
        stats.set_network_config_id(7);
        stats.note_internet_access(true);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"network_config_id\":7"));
        assert!(json.contains("\"connections_total\":1"));
    }
}
