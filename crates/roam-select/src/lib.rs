//! # Roam Network-Selection Core
//!
//! Per-scan-cycle candidate bookkeeping for Wi-Fi network selection.
//!
//! Each scan cycle, a fresh [`CandidateRegistry`] is constructed and a set of
//! independent *nominators* (selection strategies, identified by a small
//! ordinal priority) propose scored access-point observations into it. The
//! registry deduplicates proposals by a composite identity (network identity
//! + BSSID + saved-network id), applies a nominator-priority overwrite
//! policy, and records malformed input as recoverable faults instead of
//! aborting the cycle. When nomination is done, the evaluator consumes two
//! derived views: candidates grouped by logical network, and candidates
//! grouped by 802.11be multi-link (MLD) address.
//!
//! The registry is single-threaded by design: one instance lives on the
//! connectivity thread for the duration of one cycle and is then discarded.
//! Which candidate ultimately wins selection is out of scope here — this
//! crate only guarantees a clean, deduplicated, stably-grouped snapshot.

pub mod candidates;
pub mod network;
pub mod scan;
pub mod scorecard;

pub use candidates::{
    AddOutcome, Candidate, CandidateFault, CandidateRegistry, FaultKind, Key, NominatorId,
};
pub use network::{NetworkId, NetworkMatchInfo, SavedNetwork};
pub use scan::{ChannelWidth, ScanDetail, ScanResult};
pub use scorecard::{MemoryScoreCard, PerBssidStats, ScoreCard};
