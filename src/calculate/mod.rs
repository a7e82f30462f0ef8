//! Engagement aggregation engine.
//!
//! Pure, synchronous functions that reconcile direct-player views,
//! guardian-proxied views, and acknowledgments into complete
//! per-(point, player) matrices:
//!
//! - **guardian**: maps unlinked players to their guardian accounts
//! - **unified**: merges raw view events into player-attributed views
//! - **completion**: max-per-pair reconciliation and matrix averaging
//! - **scoring**: weighted acknowledgment/completion engagement score
//! - **buckets**: UTC time bucketing for trends and heatmaps
//!
//! Nothing here performs I/O. Given the same input collections every
//! function produces bit-identical output, which keeps reports stable
//! under retry and makes the whole engine unit-testable.

mod buckets;
mod completion;
mod guardian;
mod scoring;
mod unified;

pub use buckets::*;
pub use completion::*;
pub use guardian::*;
pub use scoring::*;
pub use unified::*;
