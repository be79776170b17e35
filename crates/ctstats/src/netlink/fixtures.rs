//! Netlink message fixtures for testing.
//!
//! Replies to the ctnetlink statistics requests, laid out the way the
//! kernel sends them, so the decoders can be exercised without a netfilter
//! socket. Netlink and attribute headers are in host byte order, as the
//! kernel writes them; nfgenmsg resource ids and counters are big-endian.
//!
//! The fixtures are provided as functions that return Vec<u8> so each test
//! owns its buffer.

const NLMSG_ERROR: u16 = 2;
const NLMSG_DONE: u16 = 3;
const NLM_F_REQUEST: u16 = 0x01;
const NLM_F_MULTI: u16 = 0x02;
const NLM_F_ACK: u16 = 0x04;

/// nlmsghdr in host byte order.
fn nlmsghdr(len: u32, msg_type: u16, flags: u16, seq: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16);
    buf.extend_from_slice(&len.to_ne_bytes());
    buf.extend_from_slice(&msg_type.to_ne_bytes());
    buf.extend_from_slice(&flags.to_ne_bytes());
    buf.extend_from_slice(&seq.to_ne_bytes());
    buf.extend_from_slice(&0u32.to_ne_bytes()); // nlmsg_pid
    buf
}

/// nlattr carrying a big-endian u32 counter.
fn counter(kind: u16, value: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8);
    buf.extend_from_slice(&8u16.to_ne_bytes());
    buf.extend_from_slice(&kind.to_ne_bytes());
    buf.extend_from_slice(&value.to_be_bytes());
    buf
}

/// NLMSG_DONE closing a dump, with its zero payload.
fn done(seq: u32) -> Vec<u8> {
    let mut buf = nlmsghdr(20, NLMSG_DONE, NLM_F_MULTI, seq);
    buf.extend_from_slice(&0i32.to_ne_bytes());
    buf
}

/// Reply to IPCTNL_MSG_CT_GET_STATS_CPU on a host where only CPU 1 is
/// reported, followed by NLMSG_DONE.
pub fn cpu_stats_reply() -> Vec<u8> {
    let seq = 0x65f1_a2b0;
    [
        // len=100, type=0x0104 (CTNETLINK << 8 | CT_GET_STATS_CPU)
        nlmsghdr(100, 0x0104, NLM_F_MULTI, seq),
        // nfgenmsg: family=AF_UNSPEC, version=NFNETLINK_V0, res_id=1 (cpu)
        vec![0x00, 0x00, 0x00, 0x01],
        counter(2, 12),   // CTA_STATS_FOUND
        counter(4, 415),  // CTA_STATS_INVALID
        counter(8, 0),    // CTA_STATS_INSERT
        counter(9, 0),    // CTA_STATS_INSERT_FAILED
        counter(10, 2),   // CTA_STATS_DROP
        counter(11, 1),   // CTA_STATS_EARLY_DROP
        counter(12, 3),   // CTA_STATS_ERROR
        counter(13, 270), // CTA_STATS_SEARCH_RESTART
        counter(14, 5),   // CTA_STATS_CLASH_RESOLVE
        counter(15, 0),   // CTA_STATS_CHAIN_TOOLONG
        done(seq),
    ]
    .concat()
}

/// Reply to IPCTNL_MSG_EXP_GET_STATS_CPU for CPU 0, followed by NLMSG_DONE.
pub fn expect_stats_reply() -> Vec<u8> {
    let seq = 0x11;
    [
        // len=44, type=0x0203 (CTNETLINK_EXP << 8 | EXP_GET_STATS_CPU)
        nlmsghdr(44, 0x0203, NLM_F_MULTI, seq),
        // nfgenmsg: family=AF_UNSPEC, version=NFNETLINK_V0, res_id=0 (cpu)
        vec![0x00, 0x00, 0x00, 0x00],
        counter(1, 4), // CTA_STATS_EXP_NEW
        counter(2, 3), // CTA_STATS_EXP_CREATE
        counter(3, 1), // CTA_STATS_EXP_DELETE
        done(seq),
    ]
    .concat()
}

/// Reply to IPCTNL_MSG_CT_GET_STATS followed by the ACK the kernel sends
/// when the request carried NLM_F_ACK.
pub fn global_stats_reply() -> Vec<u8> {
    let seq = 0x2a;
    [
        // len=36, type=0x0105 (CTNETLINK << 8 | CT_GET_STATS)
        nlmsghdr(36, 0x0105, 0, seq),
        // nfgenmsg: family=AF_UNSPEC, version=NFNETLINK_V0, res_id=0
        vec![0x00, 0x00, 0x00, 0x00],
        counter(1, 37),     // CTA_STATS_GLOBAL_ENTRIES
        counter(2, 262144), // CTA_STATS_GLOBAL_MAX_ENTRIES
        // len=36: error = 0 (ACK), then the original request header
        nlmsghdr(36, NLMSG_ERROR, 0, seq),
        0i32.to_ne_bytes().to_vec(),
        nlmsghdr(20, 0x0105, NLM_F_REQUEST | NLM_F_ACK, seq),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::message::{MessageIter, NLMSG_HDRLEN};

    #[test]
    fn test_fixture_framing() {
        for (buf, count) in [
            (cpu_stats_reply(), 2),
            (expect_stats_reply(), 2),
            (global_stats_reply(), 2),
        ] {
            let msgs: Vec<_> = MessageIter::new(&buf)
                .collect::<crate::netlink::Result<_>>()
                .unwrap();
            assert_eq!(msgs.len(), count);
            let total: usize = msgs
                .iter()
                .map(|(hdr, _)| hdr.nlmsg_len as usize)
                .sum();
            assert_eq!(total, buf.len());
            assert!(msgs.iter().all(|(hdr, p)| hdr.nlmsg_len as usize == NLMSG_HDRLEN + p.len()));
        }
    }

    #[test]
    fn test_fixture_headers_in_host_order() {
        let buf = cpu_stats_reply();
        let (hdr, payload) = MessageIter::new(&buf).next().unwrap().unwrap();
        assert_eq!(hdr.nlmsg_type, 0x0104);
        assert_eq!(hdr.nlmsg_seq, 0x65f1_a2b0);
        assert!(hdr.is_multi());
        // First attribute after nfgenmsg: CTA_STATS_FOUND, len 8
        assert_eq!(u16::from_ne_bytes([payload[4], payload[5]]), 8);
        assert_eq!(u16::from_ne_bytes([payload[6], payload[7]]), 2);
    }
}
