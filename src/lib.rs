//! # refind core
//!
//! Domain layer for the refind lost-and-found service. This crate holds
//! everything the HTTP tier (`refind-server`) builds on:
//!
//! - [`model`]: item reports, users, and the fixed category set.
//! - [`store`]: flat-file JSON persistence for the three record
//!   collections (users, lost items, found items).
//! - [`matching`]: the pure lost/found pair scoring heuristic.
//!
//! The matching heuristic is deliberately free of I/O and state: callers
//! load the active report sets (typically via [`JsonStore::list_active`])
//! and hand them to [`compute_matches`], which returns ranked candidates
//! with per-pair explanations.
//!
//! ## Example
//!
//! ```no_run
//! use refind::{compute_matches, JsonStore};
//! use refind::model::ItemKind;
//!
//! # fn main() -> Result<(), refind::StoreError> {
//! let store = JsonStore::open("data")?;
//! let lost = store.list_active(ItemKind::Lost);
//! let found = store.list_active(ItemKind::Found);
//!
//! for candidate in compute_matches(&lost, &found) {
//!     println!(
//!         "{} <-> {} score={} ({})",
//!         candidate.lost.item_name,
//!         candidate.found.item_name,
//!         candidate.score,
//!         candidate.reasons.join(", ")
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod matching;
pub mod model;
pub mod store;

pub use matching::{compute_matches, is_similar, MatchCandidate};
pub use model::{ItemDraft, ItemKind, ItemReport, ItemStatus, MatchedWith, User, CATEGORIES};
pub use store::{JsonStore, StoreError};
