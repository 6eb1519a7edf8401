//! # Scan Observations
//!
//! Decoded scan results as the selection pipeline consumes them. Parsing of
//! beacon/probe-response frames happens upstream; what arrives here is
//! already-decoded fields of uneven trustworthiness. The BSSID in particular
//! is kept as the raw string the scan layer produced — validating it is the
//! registry's job, and a malformed one must surface as a recorded fault, not
//! a crash.

use roam_common::{Band, MacAddr, SecurityKind, Ssid};
use serde::Serialize;
use std::fmt;

// ─── Channel Width ──────────────────────────────────────────────────────────

/// Operating channel width of an observed BSS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelWidth {
    #[default]
    Mhz20,
    Mhz40,
    Mhz80,
    Mhz160,
    /// Non-contiguous 80+80 MHz.
    Mhz80P80,
    /// 802.11be 320 MHz.
    Mhz320,
}

impl fmt::Display for ChannelWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelWidth::Mhz20 => write!(f, "20"),
            ChannelWidth::Mhz40 => write!(f, "40"),
            ChannelWidth::Mhz80 => write!(f, "80"),
            ChannelWidth::Mhz160 => write!(f, "160"),
            ChannelWidth::Mhz80P80 => write!(f, "80+80"),
            ChannelWidth::Mhz320 => write!(f, "320"),
        }
    }
}

// ─── ScanResult ─────────────────────────────────────────────────────────────

/// One decoded access-point observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Raw SSID as broadcast (unquoted bytes).
    pub ssid: Ssid,
    /// BSSID as the scan layer delivered it — may be absent or malformed.
    pub bssid: Option<String>,
    /// Capability string, e.g. `"[WPA2-PSK-CCMP][ESS]"`.
    pub capabilities: String,
    /// Center frequency in MHz.
    pub frequency_mhz: u32,
    pub channel_width: ChannelWidth,
    /// Received signal strength in dBm.
    pub rssi_dbm: i16,
    /// MLD MAC address when the AP is an 802.11be multi-link device.
    pub mld_mac: Option<MacAddr>,
}

impl ScanResult {
    pub fn new(ssid: Ssid, bssid: impl Into<String>) -> Self {
        ScanResult {
            ssid,
            bssid: Some(bssid.into()),
            capabilities: "[ESS]".to_string(),
            frequency_mhz: 2412,
            channel_width: ChannelWidth::Mhz20,
            rssi_dbm: -127,
            mld_mac: None,
        }
    }

    pub fn with_capabilities(mut self, capabilities: impl Into<String>) -> Self {
        self.capabilities = capabilities.into();
        self
    }

    pub fn with_frequency(mut self, frequency_mhz: u32, channel_width: ChannelWidth) -> Self {
        self.frequency_mhz = frequency_mhz;
        self.channel_width = channel_width;
        self
    }

    pub fn with_rssi(mut self, rssi_dbm: i16) -> Self {
        self.rssi_dbm = rssi_dbm;
        self
    }

    pub fn with_mld_mac(mut self, mld_mac: MacAddr) -> Self {
        self.mld_mac = Some(mld_mac);
        self
    }

    /// Security class advertised in the capability string.
    pub fn security(&self) -> SecurityKind {
        SecurityKind::from_capabilities(&self.capabilities)
    }

    pub fn band(&self) -> Band {
        Band::from_frequency(self.frequency_mhz)
    }
}

// ─── ScanDetail ─────────────────────────────────────────────────────────────

/// Upstream handoff wrapper around a scan result.
///
/// A detail can outlive its result: a nominator running late in the cycle
/// may hold a detail whose result was already dropped by the scan cache.
/// Consumers therefore go through [`ScanDetail::scan_result`] and treat
/// `None` as "nothing to nominate".
#[derive(Debug, Clone, Default)]
pub struct ScanDetail {
    scan_result: Option<ScanResult>,
}

impl ScanDetail {
    pub fn new(scan_result: ScanResult) -> Self {
        ScanDetail { scan_result: Some(scan_result) }
    }

    /// A detail whose result has been dropped upstream.
    pub fn empty() -> Self {
        ScanDetail { scan_result: None }
    }

    pub fn scan_result(&self) -> Option<&ScanResult> {
        self.scan_result.as_ref()
    }
}
