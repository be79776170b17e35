//! Connection tracking statistics over NETLINK_NETFILTER.
//!
//! The kernel answers three statistics requests from the ctnetlink
//! subsystems, each with its own attribute schema:
//!
//! | Request | Reply | Record |
//! |---------|-------|--------|
//! | `IPCTNL_MSG_CT_GET_STATS_CPU` | one message per CPU | [`CpuStats`] |
//! | `IPCTNL_MSG_EXP_GET_STATS_CPU` | one message per CPU | [`ExpectStats`] |
//! | `IPCTNL_MSG_CT_GET_STATS` | a single message | [`GlobalStats`] |
//!
//! Every record implements [`StatsRecord`], which decodes at three levels:
//! a bare attribute list ([`StatsRecord::from_attrs`]), one message payload
//! after the netlink header ([`StatsRecord::from_message`]), or a whole
//! receive buffer ([`StatsRecord::from_buffer`]).
//!
//! # Example
//!
//! ```ignore
//! use ctstats::netlink::conntrack::{CpuStats, StatsRecord};
//!
//! // `buf` holds the kernel's reply to IPCTNL_MSG_CT_GET_STATS_CPU.
//! let per_cpu = CpuStats::from_buffer(&buf)?;
//! for stats in &per_cpu {
//!     println!("cpu{}: found={} invalid={} drop={}",
//!         stats.cpu, stats.found, stats.invalid, stats.drop);
//! }
//! ```

mod attrs;
mod stats;

pub use attrs::*;
pub use stats::{CpuStats, ExpectStats, GlobalStats};

use std::fmt;

use tracing::{debug, trace};
use winnow::binary::{be_u16, le_u8};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;

use super::attr::AttrIter;
use super::error::{Error, Result};
use super::message::{MessageIter, NlMsgError, NlMsgType};

/// Result type for winnow parsers.
pub type PResult<T> = core::result::Result<T, ErrMode<ContextError>>;

// Netfilter subsystem IDs
pub const NFNL_SUBSYS_CTNETLINK: u8 = 1;
pub const NFNL_SUBSYS_CTNETLINK_EXP: u8 = 2;

// Conntrack message types
pub const IPCTNL_MSG_CT_GET_STATS_CPU: u8 = 4;
pub const IPCTNL_MSG_CT_GET_STATS: u8 = 5;

// Expectation message types
pub const IPCTNL_MSG_EXP_GET_STATS_CPU: u8 = 3;

/// Size of the nfgenmsg header.
pub const NFGENMSG_LEN: usize = 4;

/// Build a netlink message type from a netfilter subsystem and message.
#[inline]
pub const fn nfnl_msg_type(subsys: u8, msg: u8) -> u16 {
    ((subsys as u16) << 8) | msg as u16
}

/// Netfilter subsystem of a netlink message type.
#[inline]
pub const fn nfnl_subsys(msg_type: u16) -> u8 {
    (msg_type >> 8) as u8
}

/// nfgenmsg header (4 bytes), carried at the front of every netfilter
/// message payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NfGenMsg {
    /// Address family (AF_UNSPEC for statistics replies).
    pub family: u8,
    /// nfnetlink version (NFNETLINK_V0).
    pub version: u8,
    /// Resource id; the CPU number in per-CPU statistics replies.
    pub res_id: u16,
}

impl NfGenMsg {
    fn parse(input: &mut &[u8]) -> PResult<Self> {
        let family = le_u8.parse_next(input)?;
        let version = le_u8.parse_next(input)?;
        let res_id = be_u16.parse_next(input)?;
        Ok(Self {
            family,
            version,
            res_id,
        })
    }

    /// Split a netfilter message payload into its header and the attribute
    /// bytes that follow.
    pub fn split(payload: &[u8]) -> Result<(Self, &[u8])> {
        let mut input = payload;
        let header = Self::parse(&mut input).map_err(|_| Error::MalformedMessage {
            expected: NFGENMSG_LEN,
            actual: payload.len(),
        })?;
        Ok((header, input))
    }
}

/// A counter record decoded from one conntrack statistics message.
///
/// Implementors supply the attribute table and field setter; decoding is
/// shared.
pub trait StatsRecord: Default + fmt::Debug {
    /// Netlink message type of the kernel's reply carrying this record.
    const MSG_TYPE: u16;

    /// Record name used in log events.
    const NAME: &'static str;

    /// Field selector produced by the attribute table.
    type Field: Copy + fmt::Debug;

    /// Look up an attribute type code in this record's table.
    fn classify(attr_type: u16) -> AttrClass<Self::Field>;

    /// Store a decoded counter.
    fn set(&mut self, field: Self::Field, value: u32);

    /// Record the nfgenmsg resource id of the message being decoded.
    fn set_res_id(&mut self, _res_id: u16) {}

    /// Decode a record from an attribute list.
    ///
    /// Type codes are looked up exactly as given, so a code still carrying
    /// `NLA_F_NESTED` or `NLA_F_NET_BYTEORDER` is unknown. Any unknown
    /// attribute or short counter payload fails the whole decode; no
    /// partial record is returned.
    fn from_attrs<'a, I>(attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, &'a [u8])>,
    {
        decode_attrs(attrs.into_iter().map(Ok))
    }

    /// Decode a record from one netlink message payload (everything after
    /// the nlmsghdr).
    fn from_message(payload: &[u8]) -> Result<Self> {
        let (header, attrs) = NfGenMsg::split(payload)?;
        let mut record: Self = decode_attrs(AttrIter::new(attrs))?;
        record.set_res_id(header.res_id);
        Ok(record)
    }

    /// Decode one record per message payload, in input order.
    fn from_messages<'a, I>(payloads: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        payloads.into_iter().map(Self::from_message).collect()
    }

    /// Decode every record in a receive buffer of complete netlink messages.
    ///
    /// Stops at `NLMSG_DONE`. Messages of any other type are skipped; an
    /// `NLMSG_ERROR` carrying a non-zero errno fails the call.
    fn from_buffer(buf: &[u8]) -> Result<Vec<Self>> {
        let mut records = Vec::new();

        for msg in MessageIter::new(buf) {
            let (header, payload) = msg?;

            match header.nlmsg_type {
                NlMsgType::DONE => break,
                NlMsgType::NOOP => continue,
                NlMsgType::OVERRUN => {
                    return Err(Error::InvalidMessage("netlink overrun, data lost".into()));
                }
                NlMsgType::ERROR => {
                    let err = NlMsgError::from_bytes(payload)?;
                    if !err.is_ack() {
                        return Err(Error::from_errno(err.error));
                    }
                }
                msg_type if msg_type == Self::MSG_TYPE => {
                    records.push(Self::from_message(payload)?);
                }
                msg_type => {
                    debug!(
                        kind = Self::NAME,
                        subsys = nfnl_subsys(msg_type),
                        msg_type,
                        "skipping unrelated message"
                    );
                }
            }
        }

        Ok(records)
    }
}

fn decode_attrs<'a, R, I>(attrs: I) -> Result<R>
where
    R: StatsRecord,
    I: IntoIterator<Item = Result<(u16, &'a [u8])>>,
{
    let mut record = R::default();

    for attr in attrs {
        let (attr_type, data) = attr?;

        match R::classify(attr_type) {
            AttrClass::Mapped { field, min_len } => {
                let value = data
                    .get(..min_len)
                    .and_then(|head| head.first_chunk::<U32_LEN>())
                    .map(|bytes| u32::from_be_bytes(*bytes))
                    .ok_or(Error::ShortPayload {
                        attr_type,
                        expected: min_len,
                        actual: data.len(),
                    })?;
                record.set(field, value);
            }
            AttrClass::Ignored => {
                trace!(kind = R::NAME, attr_type, "ignoring attribute");
            }
            AttrClass::Unknown => {
                debug!(kind = R::NAME, attr_type, "unknown attribute");
                return Err(Error::UnknownAttribute(attr_type));
            }
        }
    }

    trace!(kind = R::NAME, ?record, "decoded");
    Ok(record)
}
