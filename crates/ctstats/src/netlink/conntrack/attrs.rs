//! Attribute type tables for the conntrack statistics records.
//!
//! Codes mirror `enum ctattr_stats_cpu`, `enum ctattr_expect_stats` and
//! `enum ctattr_stats_global` in `linux/netfilter/nfnetlink_conntrack.h`.
//! Each record kind has its own table; equal numeric codes in different
//! tables mean unrelated things.

/// Length of every counter payload (a big-endian u32).
pub const U32_LEN: usize = 4;

// Per-CPU table statistics (ctattr_stats_cpu)
pub const CTA_STATS_UNSPEC: u16 = 0;
pub const CTA_STATS_SEARCHED: u16 = 1; // no longer used
pub const CTA_STATS_FOUND: u16 = 2;
pub const CTA_STATS_NEW: u16 = 3; // no longer used
pub const CTA_STATS_INVALID: u16 = 4;
pub const CTA_STATS_IGNORE: u16 = 5;
pub const CTA_STATS_DELETE: u16 = 6; // no longer used
pub const CTA_STATS_DELETE_LIST: u16 = 7; // no longer used
pub const CTA_STATS_INSERT: u16 = 8;
pub const CTA_STATS_INSERT_FAILED: u16 = 9;
pub const CTA_STATS_DROP: u16 = 10;
pub const CTA_STATS_EARLY_DROP: u16 = 11;
pub const CTA_STATS_ERROR: u16 = 12;
pub const CTA_STATS_SEARCH_RESTART: u16 = 13;
pub const CTA_STATS_CLASH_RESOLVE: u16 = 14;
pub const CTA_STATS_CHAIN_TOOLONG: u16 = 15;

// Per-CPU expectation statistics (ctattr_expect_stats)
pub const CTA_STATS_EXP_UNSPEC: u16 = 0;
pub const CTA_STATS_EXP_NEW: u16 = 1;
pub const CTA_STATS_EXP_CREATE: u16 = 2;
pub const CTA_STATS_EXP_DELETE: u16 = 3;

// Global table statistics (ctattr_stats_global)
pub const CTA_STATS_GLOBAL_UNSPEC: u16 = 0;
pub const CTA_STATS_GLOBAL_ENTRIES: u16 = 1;
pub const CTA_STATS_GLOBAL_MAX_ENTRIES: u16 = 2;

/// How a record kind treats one attribute type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrClass<F> {
    /// Decoded into `field`; the payload must hold at least `min_len` bytes.
    Mapped {
        /// Destination field.
        field: F,
        /// Minimum payload length.
        min_len: usize,
    },
    /// Part of the kernel schema but not modelled by the record.
    ///
    /// The payload is skipped without any length check.
    Ignored,
    /// Not part of the kernel schema for this record kind.
    Unknown,
}

impl<F> AttrClass<F> {
    const fn counter(field: F) -> Self {
        Self::Mapped {
            field,
            min_len: U32_LEN,
        }
    }
}

/// Destination fields of [`CpuStats`](super::CpuStats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuStatsField {
    Found,
    Invalid,
    Ignore,
    Insert,
    InsertFailed,
    Drop,
    EarlyDrop,
    Error,
    SearchRestart,
    ClashResolve,
    ChainTooLong,
}

/// Destination fields of [`ExpectStats`](super::ExpectStats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectStatsField {
    New,
    Create,
    Delete,
}

/// Destination fields of [`GlobalStats`](super::GlobalStats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalStatsField {
    Entries,
    MaxEntries,
}

/// Classify a per-CPU table statistics attribute.
pub const fn cpu_stats_attr(attr_type: u16) -> AttrClass<CpuStatsField> {
    match attr_type {
        CTA_STATS_SEARCHED | CTA_STATS_NEW | CTA_STATS_DELETE | CTA_STATS_DELETE_LIST => {
            AttrClass::Ignored
        }
        CTA_STATS_FOUND => AttrClass::counter(CpuStatsField::Found),
        CTA_STATS_INVALID => AttrClass::counter(CpuStatsField::Invalid),
        CTA_STATS_IGNORE => AttrClass::counter(CpuStatsField::Ignore),
        CTA_STATS_INSERT => AttrClass::counter(CpuStatsField::Insert),
        CTA_STATS_INSERT_FAILED => AttrClass::counter(CpuStatsField::InsertFailed),
        CTA_STATS_DROP => AttrClass::counter(CpuStatsField::Drop),
        CTA_STATS_EARLY_DROP => AttrClass::counter(CpuStatsField::EarlyDrop),
        CTA_STATS_ERROR => AttrClass::counter(CpuStatsField::Error),
        CTA_STATS_SEARCH_RESTART => AttrClass::counter(CpuStatsField::SearchRestart),
        CTA_STATS_CLASH_RESOLVE => AttrClass::counter(CpuStatsField::ClashResolve),
        CTA_STATS_CHAIN_TOOLONG => AttrClass::counter(CpuStatsField::ChainTooLong),
        _ => AttrClass::Unknown,
    }
}

/// Classify a per-CPU expectation statistics attribute.
pub const fn expect_stats_attr(attr_type: u16) -> AttrClass<ExpectStatsField> {
    match attr_type {
        CTA_STATS_EXP_NEW => AttrClass::counter(ExpectStatsField::New),
        CTA_STATS_EXP_CREATE => AttrClass::counter(ExpectStatsField::Create),
        CTA_STATS_EXP_DELETE => AttrClass::counter(ExpectStatsField::Delete),
        _ => AttrClass::Unknown,
    }
}

/// Classify a global table statistics attribute.
pub const fn global_stats_attr(attr_type: u16) -> AttrClass<GlobalStatsField> {
    match attr_type {
        CTA_STATS_GLOBAL_ENTRIES => AttrClass::counter(GlobalStatsField::Entries),
        CTA_STATS_GLOBAL_MAX_ENTRIES => AttrClass::counter(GlobalStatsField::MaxEntries),
        _ => AttrClass::Unknown,
    }
}
