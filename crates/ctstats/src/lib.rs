//! Decoder for Linux connection-tracking statistics delivered over netlink.
//!
//! This crate turns the kernel's ctnetlink statistics replies into typed
//! counter records. It does not open sockets or send requests; feed it the
//! buffers your netlink client receives.
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` on the decoded records
//!
//! # Example
//!
//! ```
//! use ctstats::{CpuStats, StatsRecord};
//!
//! let attrs: [(u16, &[u8]); 2] = [
//!     (2, &[0x00, 0x00, 0x00, 0x2a]), // CTA_STATS_FOUND
//!     (1, &[]),                       // CTA_STATS_SEARCHED, ignored
//! ];
//! let stats = CpuStats::from_attrs(attrs)?;
//! assert_eq!(stats.found, 42);
//! # Ok::<(), ctstats::Error>(())
//! ```

pub mod netlink;

// Re-export common types at crate root for convenience
pub use netlink::{CpuStats, Error, ExpectStats, GlobalStats, Result, StatsRecord};
