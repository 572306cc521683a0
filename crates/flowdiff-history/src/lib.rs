//! Version history for flowdiff.
//!
//! Workflow versions are immutable once recorded, so a comparison between
//! two of them never goes stale. This crate defines the seam through which
//! versions are fetched and a comparator that memoizes results per
//! `(base, compare)` id pair.
//!
//! # Version Sources
//!
//! All backends implement the [`VersionSource`] trait:
//!
//! - [`InMemoryVersionStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Comparison
//!
//! - [`VersionComparator`] -- resolves two version ids and diffs them
//! - [`ComparisonCache`] -- memoized [`Comparison`] results keyed by id pair

pub mod cache;
pub mod comparator;
pub mod error;
pub mod memory;
pub mod traits;

pub use cache::ComparisonCache;
pub use comparator::{Comparison, VersionComparator};
pub use error::{HistoryError, HistoryResult};
pub use memory::InMemoryVersionStore;
pub use traits::VersionSource;
