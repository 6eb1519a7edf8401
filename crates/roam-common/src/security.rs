//! # Security Classification
//!
//! The selection pipeline does not negotiate security; it only needs a
//! stable classification so that two observations of "the same network" can
//! be recognized as such. `SecurityKind` is that classification: coarse,
//! closed, and value-comparable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security class of a network, as the selector distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityKind {
    /// No protection advertised.
    Open,
    /// Legacy WEP.
    Wep,
    /// WPA/WPA2 pre-shared key.
    Psk,
    /// WPA3 SAE.
    Sae,
    /// 802.1X enterprise.
    Eap,
    /// Opportunistic wireless encryption.
    Owe,
}

impl SecurityKind {
    /// Classify a scan result's capability string, e.g.
    /// `"[WPA2-PSK-CCMP][ESS]"` or `"[SAE-CCMP][ESS]"`.
    ///
    /// Transition-mode networks advertising both PSK and SAE classify as
    /// PSK so that they match saved PSK configurations. A capability
    /// string with no recognized security element classifies as open —
    /// the 802.11 default when no RSN/WPA element is present.
    pub fn from_capabilities(capabilities: &str) -> Self {
        if capabilities.contains("PSK") {
            SecurityKind::Psk
        } else if capabilities.contains("SAE") {
            SecurityKind::Sae
        } else if capabilities.contains("EAP") {
            SecurityKind::Eap
        } else if capabilities.contains("OWE") {
            SecurityKind::Owe
        } else if capabilities.contains("WEP") {
            SecurityKind::Wep
        } else {
            SecurityKind::Open
        }
    }
}

impl fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityKind::Open => write!(f, "open"),
            SecurityKind::Wep => write!(f, "wep"),
            SecurityKind::Psk => write!(f, "psk"),
            SecurityKind::Sae => write!(f, "sae"),
            SecurityKind::Eap => write!(f, "eap"),
            SecurityKind::Owe => write!(f, "owe"),
        }
    }
}

impl std::str::FromStr for SecurityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(SecurityKind::Open),
            "wep" => Ok(SecurityKind::Wep),
            "psk" => Ok(SecurityKind::Psk),
            "sae" => Ok(SecurityKind::Sae),
            "eap" => Ok(SecurityKind::Eap),
            "owe" => Ok(SecurityKind::Owe),
            other => Err(format!("unknown security kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_capability_strings() {
        assert_eq!(SecurityKind::from_capabilities("[ESS]"), SecurityKind::Open);
        assert_eq!(
            SecurityKind::from_capabilities("[WPA2-PSK-CCMP][ESS]"),
            SecurityKind::Psk
        );
        assert_eq!(
            SecurityKind::from_capabilities("[SAE-CCMP][ESS][MFPR]"),
            SecurityKind::Sae
        );
        assert_eq!(
            SecurityKind::from_capabilities("[WPA2-EAP-CCMP][ESS]"),
            SecurityKind::Eap
        );
        assert_eq!(
            SecurityKind::from_capabilities("[OWE-CCMP][ESS]"),
            SecurityKind::Owe
        );
        assert_eq!(SecurityKind::from_capabilities("[WEP]"), SecurityKind::Wep);
    }

    #[test]
    fn transition_mode_classifies_as_psk() {
        assert_eq!(
            SecurityKind::from_capabilities("[WPA2-PSK+SAE-CCMP][ESS]"),
            SecurityKind::Psk
        );
    }

    #[test]
    fn display_and_from_str_round_trip() {
        for kind in [
            SecurityKind::Open,
            SecurityKind::Wep,
            SecurityKind::Psk,
            SecurityKind::Sae,
            SecurityKind::Eap,
            SecurityKind::Owe,
        ] {
            assert_eq!(kind.to_string().parse::<SecurityKind>().unwrap(), kind);
        }
    }
}
