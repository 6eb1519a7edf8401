//! # Candidate Registry
//!
//! The per-scan-cycle container at the heart of network selection.
//!
//! Nominators propose observations with [`CandidateRegistry::add`]; the
//! registry derives a composite identity for each proposal, applies the
//! nominator-priority overwrite policy, and keeps malformed input out of the
//! cycle as recorded faults. The evaluator then reads the flat snapshot, the
//! per-network grouping, or the per-MLD grouping.
//!
//! ## Overwrite policy
//!
//! Nominators run in ascending ordinal order by convention, and a LOWER
//! ordinal is the HIGHER priority. An incoming candidate for an
//! already-claimed key replaces the incumbent iff its ordinal is the same or
//! lower; a strictly higher ordinal is turned away without a fault — losing
//! the policy race is steady-state, not an error. This direction is
//! load-bearing: a same-ordinal resubmission must win so a nominator can
//! refresh its own proposal within a cycle.
//!
//! ## Fault discipline
//!
//! Absent inputs (a nominator racing scan-cache eviction) are skipped
//! silently. Identity defects — missing BSSID, unparsable BSSID, an SSID
//! that fails quote reconciliation — are appended to the fault log and, in
//! picky mode, also returned as errors. The registry stays fully usable
//! after any number of faults.

use indexmap::IndexMap;
use roam_common::{Band, MacAddr, MacParseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

use crate::network::{NetworkId, NetworkMatchInfo, SavedNetwork};
use crate::scan::{ChannelWidth, ScanDetail, ScanResult};
use crate::scorecard::{MemoryScoreCard, ScoreCard};

// ─── NominatorId ────────────────────────────────────────────────────────────

/// Ordinal identity of a nomination strategy. Lower ordinal = higher
/// priority; the overwrite policy is a single comparison on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NominatorId(pub u8);

impl NominatorId {
    /// The currently-connected network's own nominator.
    pub const CURRENT: NominatorId = NominatorId(0);
    /// Saved-network nominator.
    pub const SAVED: NominatorId = NominatorId(1);
    /// App network suggestions.
    pub const SUGGESTION: NominatorId = NominatorId(2);
    /// Passpoint provider matching.
    pub const PASSPOINT: NominatorId = NominatorId(3);
    /// Carrier-provisioned networks.
    pub const CARRIER: NominatorId = NominatorId(4);
    /// Externally scored networks.
    pub const SCORED: NominatorId = NominatorId(5);

    /// Whether this nominator wins the overwrite policy against an
    /// incumbent: same or lower ordinal replaces.
    pub fn supersedes(&self, incumbent: NominatorId) -> bool {
        self.0 <= incumbent.0
    }
}

impl fmt::Display for NominatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Key ────────────────────────────────────────────────────────────────────

/// Composite identity of one physical radio-link candidate.
///
/// Equality and hash cover exactly these three fields, all value-based.
/// Distinct BSSIDs under one network identity are distinct keys (they group
/// together only in the per-network view), and two saved networks matching
/// the same AP yield distinct keys that both survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    pub match_info: NetworkMatchInfo,
    pub bssid: MacAddr,
    pub network_id: NetworkId,
}

impl Key {
    /// Derive a key from a scan observation and the saved network it was
    /// nominated for, performing the identity validation that produces
    /// faults: the BSSID must parse, and the scan SSID — once canonically
    /// quoted — must match the saved network's SSID byte-for-byte.
    pub fn from_scan(scan_result: &ScanResult, network: &SavedNetwork) -> Result<Key, CandidateFault> {
        let bssid_str = scan_result.bssid.as_deref().ok_or_else(|| {
            CandidateFault::MissingBssid { ssid: network.ssid.clone() }
        })?;
        let bssid: MacAddr = bssid_str.parse().map_err(|source| {
            CandidateFault::MalformedBssid { ssid: network.ssid.clone(), source }
        })?;
        let scan_ssid = scan_result.ssid.to_canonical_string();
        if scan_ssid != network.ssid {
            return Err(CandidateFault::SsidMismatch {
                network_ssid: network.ssid.clone(),
                scan_ssid,
            });
        }
        Ok(Key {
            match_info: NetworkMatchInfo::from_saved_network(network),
            bssid,
            network_id: network.network_id,
        })
    }
}

// ─── Faults ─────────────────────────────────────────────────────────────────

/// A recorded, non-fatal rejection of an insertion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateFault {
    /// The scan result carries no BSSID at all.
    #[error("scan result for {ssid} carries no BSSID")]
    MissingBssid { ssid: String },
    /// The BSSID string does not parse as a MAC address.
    #[error("scan result for {ssid} carries an unparsable BSSID: {source}")]
    MalformedBssid {
        ssid: String,
        #[source]
        source: MacParseError,
    },
    /// The scan SSID, canonically quoted, does not match the saved
    /// network's SSID — typically a quoting mistake on one side.
    #[error("scan SSID {scan_ssid} does not match saved network SSID {network_ssid}")]
    SsidMismatch { network_ssid: String, scan_ssid: String },
}

/// Coarse classification of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// A required identity field was absent.
    MissingIdentity,
    /// An identity field was present but malformed.
    Malformed,
}

impl CandidateFault {
    pub fn kind(&self) -> FaultKind {
        match self {
            CandidateFault::MissingBssid { .. } => FaultKind::MissingIdentity,
            CandidateFault::MalformedBssid { .. } | CandidateFault::SsidMismatch { .. } => {
                FaultKind::Malformed
            }
        }
    }
}

// ─── AddOutcome ─────────────────────────────────────────────────────────────

/// Result of one insertion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Input was absent (detail, network, or scan result). Nothing recorded.
    Skipped,
    /// Identity validation failed; the fault has been recorded.
    Rejected(CandidateFault),
    /// A strictly-lower-priority nominator lost the overwrite policy.
    /// Expected steady-state, never a fault.
    Outranked,
    /// A previously-absent key now holds this candidate.
    Inserted,
    /// An existing key's candidate was replaced.
    Replaced,
}

impl AddOutcome {
    /// Whether the key→candidate map changed.
    pub fn changed(&self) -> bool {
        matches!(self, AddOutcome::Inserted | AddOutcome::Replaced)
    }
}

// ─── Candidate ──────────────────────────────────────────────────────────────

/// One scored observation for a key.
///
/// Immutable once stored, with one exception: the multi-link throughput
/// annotation, written by an external aggregation pass over an MLD group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    key: Key,
    nominator: NominatorId,
    scan_rssi: i16,
    frequency_mhz: u32,
    channel_width: ChannelWidth,
    last_selection_weight: f64,
    predicted_throughput_mbps: u32,
    predicted_multi_link_throughput_mbps: u32,
    percent_internet_availability: u8,
    mld_mac: Option<MacAddr>,
    is_metered: bool,
    is_ephemeral: bool,
    is_trusted: bool,
    is_passpoint: bool,
    is_open_network: bool,
    is_carrier_or_privileged: bool,
    is_current_network: bool,
    is_current_bssid: bool,
    /// Stored-value identity: unique per accepted insertion, so a stale
    /// clone held across a replacement no longer removes anything.
    #[serde(skip)]
    sequence: u64,
}

impl Candidate {
    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn network_id(&self) -> NetworkId {
        self.key.network_id
    }

    pub fn bssid(&self) -> MacAddr {
        self.key.bssid
    }

    pub fn nominator(&self) -> NominatorId {
        self.nominator
    }

    pub fn scan_rssi(&self) -> i16 {
        self.scan_rssi
    }

    pub fn frequency_mhz(&self) -> u32 {
        self.frequency_mhz
    }

    pub fn channel_width(&self) -> ChannelWidth {
        self.channel_width
    }

    pub fn band(&self) -> Band {
        Band::from_frequency(self.frequency_mhz)
    }

    pub fn last_selection_weight(&self) -> f64 {
        self.last_selection_weight
    }

    pub fn predicted_throughput_mbps(&self) -> u32 {
        self.predicted_throughput_mbps
    }

    /// Aggregated multi-link throughput, written post-insertion by the
    /// evaluator's aggregation pass. Zero until set.
    pub fn predicted_multi_link_throughput_mbps(&self) -> u32 {
        self.predicted_multi_link_throughput_mbps
    }

    pub fn set_predicted_multi_link_throughput_mbps(&mut self, mbps: u32) {
        self.predicted_multi_link_throughput_mbps = mbps;
    }

    pub fn percent_internet_availability(&self) -> u8 {
        self.percent_internet_availability
    }

    pub fn mld_mac(&self) -> Option<MacAddr> {
        self.mld_mac
    }

    pub fn is_multi_link_capable(&self) -> bool {
        self.mld_mac.is_some()
    }

    pub fn is_metered(&self) -> bool {
        self.is_metered
    }

    pub fn is_ephemeral(&self) -> bool {
        self.is_ephemeral
    }

    pub fn is_trusted(&self) -> bool {
        self.is_trusted
    }

    pub fn is_passpoint(&self) -> bool {
        self.is_passpoint
    }

    pub fn is_open_network(&self) -> bool {
        self.is_open_network
    }

    pub fn is_carrier_or_privileged(&self) -> bool {
        self.is_carrier_or_privileged
    }

    pub fn is_current_network(&self) -> bool {
        self.is_current_network
    }

    pub fn is_current_bssid(&self) -> bool {
        self.is_current_bssid
    }
}

/// Single-line diagnostic form: `Candidate {` + comma-separated items +
/// ` }`. Key/value items render as ` name = value` with exactly one space
/// around `=` and no spaces inside values; flags that are true render as a
/// bare lower-case word. Weights are rounded to 3 decimals for readability.
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items: Vec<String> = Vec::with_capacity(16);
        items.push(format!(" nominator = {}", self.nominator));
        items.push(format!(" config = {}", self.key.network_id));
        items.push(format!(" bssid = {}", self.key.bssid));
        items.push(format!(" frequency = {}", self.frequency_mhz));
        items.push(format!(" width = {}", self.channel_width));
        items.push(format!(" rssi = {}", self.scan_rssi));
        items.push(format!(" lastSelectionWeight = {:.3}", self.last_selection_weight));
        items.push(format!(" pInternet = {}", self.percent_internet_availability));
        items.push(format!(" throughput = {}", self.predicted_throughput_mbps));
        if let Some(mld) = self.mld_mac {
            items.push(format!(" mld = {mld}"));
        }
        if self.predicted_multi_link_throughput_mbps > 0 {
            items.push(format!(
                " mloThroughput = {}",
                self.predicted_multi_link_throughput_mbps
            ));
        }
        if self.is_metered {
            items.push(" metered".to_string());
        }
        if self.is_ephemeral {
            items.push(" ephemeral".to_string());
        }
        if self.is_trusted {
            items.push(" trusted".to_string());
        }
        if self.is_passpoint {
            items.push(" passpoint".to_string());
        }
        if self.is_open_network {
            items.push(" open".to_string());
        }
        if self.is_carrier_or_privileged {
            items.push(" privileged".to_string());
        }
        if self.is_current_network {
            items.push(" current".to_string());
        }
        write!(f, "Candidate {{{} }}", items.join(","))
    }
}

// ─── CandidateRegistry ──────────────────────────────────────────────────────

/// Per-cycle candidate container: one authoritative key→candidate map with
/// two derived groupings computed on demand.
///
/// Single-threaded; one instance per scan cycle. The grouped views are
/// linear scans over the (insertion-ordered) authoritative map, never
/// separately mutated state, so they cannot drift from it.
pub struct CandidateRegistry<S: ScoreCard = MemoryScoreCard> {
    candidates: IndexMap<Key, Candidate>,
    faults: Vec<CandidateFault>,
    picky: bool,
    next_sequence: u64,
    current_network_id: Option<NetworkId>,
    current_bssid: Option<MacAddr>,
    score_card: S,
}

impl Default for CandidateRegistry<MemoryScoreCard> {
    fn default() -> Self {
        Self::new(MemoryScoreCard::new())
    }
}

impl<S: ScoreCard> CandidateRegistry<S> {
    pub fn new(score_card: S) -> Self {
        CandidateRegistry {
            candidates: IndexMap::new(),
            faults: Vec::new(),
            picky: false,
            next_sequence: 0,
            current_network_id: None,
            current_bssid: None,
            score_card,
        }
    }

    /// Mark the currently-connected network and BSSID. Candidates built
    /// after this call report `is_current_network` / `is_current_bssid`.
    pub fn set_current(&mut self, network_id: NetworkId, bssid: MacAddr) {
        self.current_network_id = Some(network_id);
        self.current_bssid = Some(bssid);
    }

    /// Toggle picky mode: when set, a validation fault during `add` is
    /// returned as an error (after being recorded) instead of swallowed.
    /// Fluent, for chaining.
    pub fn set_picky(&mut self, picky: bool) -> &mut Self {
        self.picky = picky;
        self
    }

    // ── Insertion ───────────────────────────────────────────────────────

    /// Nominate a scan observation for a saved network.
    ///
    /// Absent inputs are silent skips (`Ok(false)`): nomination is
    /// best-effort and may race scan-cache eviction or configuration
    /// removal. Identity faults are recorded; in normal mode they also
    /// yield `Ok(false)`, in picky mode they are returned. `Ok(true)` iff
    /// the map changed.
    pub fn add(
        &mut self,
        scan_detail: Option<&ScanDetail>,
        network: Option<&SavedNetwork>,
        nominator: NominatorId,
        last_selection_weight: f64,
        is_metered: bool,
        predicted_throughput_mbps: u32,
    ) -> Result<bool, CandidateFault> {
        match self.try_add(
            scan_detail,
            network,
            nominator,
            last_selection_weight,
            is_metered,
            predicted_throughput_mbps,
        ) {
            AddOutcome::Rejected(fault) if self.picky => Err(fault),
            outcome => Ok(outcome.changed()),
        }
    }

    /// [`CandidateRegistry::add`] with the outcome spelled out, for callers
    /// that branch on *why* nothing changed.
    pub fn try_add(
        &mut self,
        scan_detail: Option<&ScanDetail>,
        network: Option<&SavedNetwork>,
        nominator: NominatorId,
        last_selection_weight: f64,
        is_metered: bool,
        predicted_throughput_mbps: u32,
    ) -> AddOutcome {
        let (Some(detail), Some(network)) = (scan_detail, network) else {
            return AddOutcome::Skipped;
        };
        let Some(scan_result) = detail.scan_result() else {
            return AddOutcome::Skipped;
        };
        let key = match Key::from_scan(scan_result, network) {
            Ok(key) => key,
            Err(fault) => return self.reject(fault),
        };
        self.insert_with_key(
            key,
            network,
            nominator,
            scan_result.rssi_dbm,
            scan_result.frequency_mhz,
            scan_result.channel_width,
            last_selection_weight,
            is_metered,
            false,
            predicted_throughput_mbps,
            Some(scan_result),
        )
    }

    /// Low-level insertion for a pre-validated key. Cannot fault; returns
    /// whether the map changed.
    pub fn add_with_key(
        &mut self,
        key: Key,
        network: &SavedNetwork,
        nominator: NominatorId,
        scan_rssi: i16,
        frequency_mhz: u32,
        channel_width: ChannelWidth,
        last_selection_weight: f64,
        is_metered: bool,
        is_carrier_or_privileged: bool,
        predicted_throughput_mbps: u32,
        scan_result: Option<&ScanResult>,
    ) -> bool {
        self.insert_with_key(
            key,
            network,
            nominator,
            scan_rssi,
            frequency_mhz,
            channel_width,
            last_selection_weight,
            is_metered,
            is_carrier_or_privileged,
            predicted_throughput_mbps,
            scan_result,
        )
        .changed()
    }

    fn insert_with_key(
        &mut self,
        key: Key,
        network: &SavedNetwork,
        nominator: NominatorId,
        scan_rssi: i16,
        frequency_mhz: u32,
        channel_width: ChannelWidth,
        last_selection_weight: f64,
        is_metered: bool,
        is_carrier_or_privileged: bool,
        predicted_throughput_mbps: u32,
        scan_result: Option<&ScanResult>,
    ) -> AddOutcome {
        if let Some(incumbent) = self.candidates.get(&key) {
            if !nominator.supersedes(incumbent.nominator) {
                trace!(
                    bssid = %key.bssid,
                    incumbent = %incumbent.nominator,
                    loser = %nominator,
                    "candidate outranked by incumbent"
                );
                return AddOutcome::Outranked;
            }
        }

        let entry = self.score_card.lookup_bssid(&network.ssid, key.bssid);
        entry.set_network_config_id(network.network_id);
        let percent_internet_availability = entry.estimate_percent_internet_availability();

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let is_current_network = self.current_network_id == Some(network.network_id);
        let candidate = Candidate {
            nominator,
            scan_rssi,
            frequency_mhz,
            channel_width,
            last_selection_weight,
            predicted_throughput_mbps,
            predicted_multi_link_throughput_mbps: 0,
            percent_internet_availability,
            mld_mac: scan_result.and_then(|r| r.mld_mac),
            is_metered,
            is_ephemeral: network.is_ephemeral,
            is_trusted: network.is_trusted,
            is_passpoint: network.is_passpoint,
            is_open_network: network.is_open(),
            is_carrier_or_privileged,
            is_current_network,
            is_current_bssid: is_current_network && self.current_bssid == Some(key.bssid),
            sequence,
            key,
        };

        // IndexMap keeps the slot position of an existing key, so a
        // replacement does not disturb the grouped-view order.
        match self.candidates.insert(candidate.key.clone(), candidate) {
            None => AddOutcome::Inserted,
            Some(previous) => {
                trace!(
                    bssid = %previous.key.bssid,
                    incumbent = %previous.nominator,
                    winner = %nominator,
                    "candidate replaced"
                );
                AddOutcome::Replaced
            }
        }
    }

    fn reject(&mut self, fault: CandidateFault) -> AddOutcome {
        debug!(fault = %fault, "candidate rejected");
        self.faults.push(fault.clone());
        AddOutcome::Rejected(fault)
    }

    // ── Removal ─────────────────────────────────────────────────────────

    /// Remove a candidate, iff the argument is the value currently stored
    /// for its key. A stale clone (superseded by a replacement, or already
    /// removed) returns `false` and changes nothing.
    pub fn remove(&mut self, candidate: &Candidate) -> bool {
        match self.candidates.get(&candidate.key) {
            Some(stored) if stored.sequence == candidate.sequence => {
                self.candidates.shift_remove(&candidate.key);
                true
            }
            _ => false,
        }
    }

    // ── Snapshot & grouped views ────────────────────────────────────────

    pub fn size(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Flat snapshot in insertion order.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    /// Candidates partitioned by network identity (BSSID and saved-network
    /// id ignored): one group per logical network, in first-observation
    /// order, members in insertion order.
    pub fn grouped_candidates(&self) -> Vec<Vec<&Candidate>> {
        let mut groups: IndexMap<&NetworkMatchInfo, Vec<&Candidate>> = IndexMap::new();
        for candidate in self.candidates.values() {
            groups
                .entry(&candidate.key.match_info)
                .or_default()
                .push(candidate);
        }
        groups.into_values().collect()
    }

    /// Candidates carrying an MLD address, partitioned by that address:
    /// groups in first-observation order, members in affiliated-link
    /// insertion order. Candidates without an MLD address appear in no
    /// group.
    pub fn multi_link_candidates(&self) -> Vec<Vec<&Candidate>> {
        let mut groups: IndexMap<MacAddr, Vec<&Candidate>> = IndexMap::new();
        for candidate in self.candidates.values() {
            if let Some(mld) = candidate.mld_mac {
                groups.entry(mld).or_default().push(candidate);
            }
        }
        groups.into_values().collect()
    }

    /// The affiliated links of one MLD, in insertion order. Empty when the
    /// address was never observed.
    pub fn multi_link_candidates_for(&self, mld_mac: MacAddr) -> Vec<&Candidate> {
        self.candidates
            .values()
            .filter(|c| c.mld_mac == Some(mld_mac))
            .collect()
    }

    /// Mutable access to one MLD's affiliated links, for the aggregation
    /// pass that writes the multi-link throughput annotation. The registry
    /// itself never aggregates.
    pub fn multi_link_candidates_for_mut(&mut self, mld_mac: MacAddr) -> Vec<&mut Candidate> {
        self.candidates
            .values_mut()
            .filter(|c| c.mld_mac == Some(mld_mac))
            .collect()
    }

    // ── Fault log ───────────────────────────────────────────────────────

    pub fn fault_count(&self) -> usize {
        self.faults.len()
    }

    pub fn last_fault(&self) -> Option<&CandidateFault> {
        self.faults.last()
    }

    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    // ── Score card ──────────────────────────────────────────────────────

    pub fn score_card(&self) -> &S {
        &self.score_card
    }

    pub fn score_card_mut(&mut self) -> &mut S {
        &mut self.score_card
    }
}
