//! # MAC Addresses
//!
//! 48-bit IEEE 802 MAC address value type.
//!
//! Addresses arrive from the scan path as strings of uneven quality, so the
//! parser is strict: exactly six colon-separated octets, two hex digits each.
//! Anything else is a typed error carrying the rejected input, which the
//! selection pipeline records rather than crashes on.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 48-bit MAC address (BSSID, MLD address, or station address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

/// Rejected MAC address string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid MAC address: {input:?}")]
pub struct MacParseError {
    /// The string that failed to parse.
    pub input: String,
}

impl MacAddr {
    /// The all-ones broadcast address.
    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);

    /// The all-zero address (never a valid transmitter).
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    pub const fn from_octets(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Group bit (I/G): set for multicast and broadcast destinations.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    pub fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// Local bit (U/L): set for locally administered (randomized) addresses.
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }

    /// Generate a locally administered unicast address.
    ///
    /// Used for MAC randomization and for tests that need distinct
    /// addresses without a fixture table.
    pub fn random_unicast<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut octets = [0u8; 6];
        rng.fill_bytes(&mut octets[..]);
        octets[0] = (octets[0] | 0x02) & !0x01;
        MacAddr(octets)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = MacParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MacParseError { input: s.to_string() };

        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(MacAddr(octets))
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
