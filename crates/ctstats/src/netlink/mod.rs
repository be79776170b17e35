//! Netlink framing and conntrack statistics decoding.
//!
//! The transport (socket, sequencing, multipart reassembly) lives in the
//! netlink client; this module takes the bytes it receives and turns them
//! into typed records.
//!
//! # Quick Start
//!
//! ```ignore
//! use ctstats::netlink::conntrack::{CpuStats, GlobalStats, StatsRecord};
//!
//! // `buf` is one recv() worth of replies to IPCTNL_MSG_CT_GET_STATS_CPU.
//! for stats in CpuStats::from_buffer(&buf)? {
//!     println!("cpu{}: found={} insert_failed={}", stats.cpu, stats.found, stats.insert_failed);
//! }
//!
//! // Or one message payload (after the nlmsghdr) at a time.
//! let global = GlobalStats::from_message(payload)?;
//! println!("{} / {} entries", global.entries, global.max_entries);
//! ```

pub mod attr;
pub mod conntrack;
mod error;
#[cfg(test)]
mod fixtures;
pub mod message;

pub use attr::{AttrIter, NlAttr};
pub use conntrack::{CpuStats, ExpectStats, GlobalStats, NfGenMsg, StatsRecord};
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
