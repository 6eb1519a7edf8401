//! # Saved Networks
//!
//! The selector's view of a saved network configuration. Persistence,
//! credential storage, and security negotiation live elsewhere; what matters
//! here is the canonical identity a configuration contributes to a candidate
//! key, plus the handful of flags the evaluator reads off each candidate.

use roam_common::SecurityKind;
use serde::Serialize;

/// Identity of a saved network configuration.
///
/// Multiple configurations may co-exist for one physical AP (two Passpoint
/// profiles from the same provider, for instance), so this id participates
/// in candidate identity alongside the network identity and BSSID.
pub type NetworkId = i32;

// ─── SavedNetwork ───────────────────────────────────────────────────────────

/// A saved network configuration, as consumed by the selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedNetwork {
    pub network_id: NetworkId,
    /// Canonical quote-delimited SSID, e.g. `"MyHomeNetwork"` including the
    /// quote characters. Scan-side SSIDs must reconcile against this form.
    pub ssid: String,
    pub security: SecurityKind,
    pub is_ephemeral: bool,
    pub is_passpoint: bool,
    pub is_trusted: bool,
}

impl SavedNetwork {
    pub fn new(network_id: NetworkId, ssid: impl Into<String>, security: SecurityKind) -> Self {
        SavedNetwork {
            network_id,
            ssid: ssid.into(),
            security,
            is_ephemeral: false,
            is_passpoint: false,
            is_trusted: true,
        }
    }

    /// An open saved network.
    pub fn open(network_id: NetworkId, ssid: impl Into<String>) -> Self {
        Self::new(network_id, ssid, SecurityKind::Open)
    }

    pub fn ephemeral(mut self) -> Self {
        self.is_ephemeral = true;
        self
    }

    pub fn passpoint(mut self) -> Self {
        self.is_passpoint = true;
        self
    }

    pub fn is_open(&self) -> bool {
        matches!(self.security, SecurityKind::Open | SecurityKind::Owe)
    }
}

// ─── NetworkMatchInfo ───────────────────────────────────────────────────────

/// Canonical network identity: quote-normalized SSID plus security class.
///
/// Equality and hash are value-based — two infos derived from distinct but
/// logically equal configurations compare equal. This is the grouping key
/// for the "same logical network, many BSSIDs" view; BSSID and network id
/// deliberately play no part in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkMatchInfo {
    ssid: String,
    security: SecurityKind,
}

impl NetworkMatchInfo {
    pub fn from_saved_network(network: &SavedNetwork) -> Self {
        NetworkMatchInfo {
            ssid: network.ssid.clone(),
            security: network.security,
        }
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn security(&self) -> SecurityKind {
        self.security
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_info_has_value_equality() {
        let a = SavedNetwork::open(1, "\"cafe\"");
        let b = SavedNetwork::open(7, "\"cafe\"").ephemeral();
        // Different configurations, same logical network.
        assert_eq!(
            NetworkMatchInfo::from_saved_network(&a),
            NetworkMatchInfo::from_saved_network(&b)
        );
    }

    #[test]
    fn match_info_distinguishes_security() {
        let open = SavedNetwork::open(1, "\"cafe\"");
        let psk = SavedNetwork::new(1, "\"cafe\"", SecurityKind::Psk);
        assert_ne!(
            NetworkMatchInfo::from_saved_network(&open),
            NetworkMatchInfo::from_saved_network(&psk)
        );
    }

    #[test]
    fn owe_counts_as_open() {
        assert!(SavedNetwork::new(1, "\"cafe\"", SecurityKind::Owe).is_open());
        assert!(!SavedNetwork::new(1, "\"cafe\"", SecurityKind::Psk).is_open());
    }
}
