//! # Radio Bands
//!
//! Frequency → band classification for 802.11 channels.
//!
//! | Band    | Freq range       | Characteristic                    |
//! |---------|------------------|-----------------------------------|
//! | 2.4 GHz | 2400–2500 MHz    | Long range, crowded               |
//! | 5 GHz   | 4900–5925 MHz    | Mid-range, wide channels          |
//! | 6 GHz   | 5925–7125 MHz    | Short range, clean spectrum       |

use serde::Serialize;
use std::fmt;

/// 802.11 operating band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Band2Ghz,
    Band5Ghz,
    Band6Ghz,
    /// Frequency outside the known 802.11 allocations.
    Unknown,
}

impl Band {
    /// Classify a center frequency in MHz.
    pub fn from_frequency(freq_mhz: u32) -> Self {
        match freq_mhz {
            2400..=2500 => Band::Band2Ghz,
            4900..=5925 => Band::Band5Ghz,
            5926..=7125 => Band::Band6Ghz,
            _ => Band::Unknown,
        }
    }

    pub fn is_2ghz(&self) -> bool {
        *self == Band::Band2Ghz
    }

    pub fn is_5ghz(&self) -> bool {
        *self == Band::Band5Ghz
    }

    pub fn is_6ghz(&self) -> bool {
        *self == Band::Band6Ghz
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Band2Ghz => write!(f, "2.4GHz"),
            Band::Band5Ghz => write!(f, "5GHz"),
            Band::Band6Ghz => write!(f, "6GHz"),
            Band::Unknown => write!(f, "unknown"),
        }
    }
}
