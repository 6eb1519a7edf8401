//! Shared 802.11 value types for the Roam platform.
//!
//! This crate contains:
//! - **MAC addresses** — strict parsing, value equality, randomization
//! - **SSIDs** — raw-bytes service set identifiers with the quoted canonical form
//! - **Security classes** — the classification the selector distinguishes
//! - **Radio bands** — frequency → band classification

pub mod band;
pub mod mac;
pub mod security;
pub mod ssid;

pub use band::Band;
pub use mac::{MacAddr, MacParseError};
pub use security::SecurityKind;
pub use ssid::{Ssid, SsidError};
