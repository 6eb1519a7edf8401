//! # SSIDs
//!
//! Service set identifiers are raw byte strings (up to 32 octets, not
//! necessarily UTF-8). Saved networks store the *canonical* form: the UTF-8
//! text wrapped in double quotes. Scan results carry the *raw* form. The two
//! meet in the selection pipeline, where the raw form must be re-quoted and
//! compared byte-for-byte against the canonical form — a comparison that
//! deliberately fails when a caller has already quoted (or forgotten to
//! quote) one side.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Maximum SSID length in octets (IEEE 802.11-2020, 9.4.2.2).
pub const MAX_SSID_LEN: usize = 32;

/// A raw SSID as carried in beacons and probe responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ssid(Vec<u8>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SsidError {
    #[error("SSID of {len} octets exceeds the 32-octet limit")]
    TooLong { len: usize },
    #[error("expected a quote-delimited SSID, got {input:?}")]
    NotQuoted { input: String },
}

impl Ssid {
    /// Construct from raw octets.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, SsidError> {
        let bytes = bytes.into();
        if bytes.len() > MAX_SSID_LEN {
            return Err(SsidError::TooLong { len: bytes.len() });
        }
        Ok(Ssid(bytes))
    }

    /// Construct from text, taken verbatim — quote characters in the input
    /// become part of the SSID.
    pub fn from_utf8_text(text: &str) -> Result<Self, SsidError> {
        Self::from_bytes(text.as_bytes().to_vec())
    }

    /// Parse the canonical quote-delimited form used by saved networks
    /// (`"MyHomeNetwork"`), stripping the quotes.
    pub fn from_quoted(text: &str) -> Result<Self, SsidError> {
        let inner = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(|| SsidError::NotQuoted { input: text.to_string() })?;
        Self::from_bytes(inner.as_bytes().to_vec())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The canonical quote-delimited form, for comparison against a saved
    /// network's SSID. Non-UTF-8 SSIDs render as bare lower-case hex and
    /// therefore never match a quoted canonical form.
    pub fn to_canonical_string(&self) -> String {
        match std::str::from_utf8(&self.0) {
            Ok(text) => format!("\"{text}\""),
            Err(_) => self.0.iter().map(|b| format!("{b:02x}")).collect(),
        }
    }
}

impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl Serialize for Ssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
