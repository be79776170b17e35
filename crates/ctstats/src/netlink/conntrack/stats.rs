//! Conntrack statistics records.

use super::attrs::{
    AttrClass, CpuStatsField, ExpectStatsField, GlobalStatsField, cpu_stats_attr,
    expect_stats_attr, global_stats_attr,
};
use super::{
    IPCTNL_MSG_CT_GET_STATS, IPCTNL_MSG_CT_GET_STATS_CPU, IPCTNL_MSG_EXP_GET_STATS_CPU,
    NFNL_SUBSYS_CTNETLINK, NFNL_SUBSYS_CTNETLINK_EXP, StatsRecord, nfnl_msg_type,
};

/// Connection tracking table statistics of one CPU.
///
/// Matches the output of `conntrack -S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuStats {
    /// CPU the counters belong to (nfgenmsg resource id).
    pub cpu: u16,
    /// Lookups that found an existing entry.
    pub found: u32,
    /// Packets that could not be tracked.
    pub invalid: u32,
    /// Packets that were already tracked (untracked or templated).
    pub ignore: u32,
    /// Entries inserted into the table.
    pub insert: u32,
    /// Entries that lost an insertion race.
    pub insert_failed: u32,
    /// Packets dropped because the insertion failed.
    pub drop: u32,
    /// Entries evicted to make room when the table was full.
    pub early_drop: u32,
    /// ICMP(v6) packets carrying an invalid inner header.
    pub error: u32,
    /// Lookups restarted because of a hash resize.
    pub search_restart: u32,
    /// Insertion races resolved without dropping the packet.
    pub clash_resolve: u32,
    /// Insertions refused because a hash chain grew too long.
    pub chain_too_long: u32,
}

impl StatsRecord for CpuStats {
    const MSG_TYPE: u16 = nfnl_msg_type(NFNL_SUBSYS_CTNETLINK, IPCTNL_MSG_CT_GET_STATS_CPU);
    const NAME: &'static str = "cpu_stats";
    type Field = CpuStatsField;

    fn classify(attr_type: u16) -> AttrClass<CpuStatsField> {
        cpu_stats_attr(attr_type)
    }

    fn set(&mut self, field: CpuStatsField, value: u32) {
        let slot = match field {
            CpuStatsField::Found => &mut self.found,
            CpuStatsField::Invalid => &mut self.invalid,
            CpuStatsField::Ignore => &mut self.ignore,
            CpuStatsField::Insert => &mut self.insert,
            CpuStatsField::InsertFailed => &mut self.insert_failed,
            CpuStatsField::Drop => &mut self.drop,
            CpuStatsField::EarlyDrop => &mut self.early_drop,
            CpuStatsField::Error => &mut self.error,
            CpuStatsField::SearchRestart => &mut self.search_restart,
            CpuStatsField::ClashResolve => &mut self.clash_resolve,
            CpuStatsField::ChainTooLong => &mut self.chain_too_long,
        };
        *slot = value;
    }

    fn set_res_id(&mut self, res_id: u16) {
        self.cpu = res_id;
    }
}

/// Expectation table statistics of one CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpectStats {
    /// CPU the counters belong to (nfgenmsg resource id).
    pub cpu: u16,
    /// Expectations allocated.
    pub new: u32,
    /// Expectations inserted into the table.
    pub create: u32,
    /// Expectations removed from the table.
    pub delete: u32,
}

impl StatsRecord for ExpectStats {
    const MSG_TYPE: u16 = nfnl_msg_type(NFNL_SUBSYS_CTNETLINK_EXP, IPCTNL_MSG_EXP_GET_STATS_CPU);
    const NAME: &'static str = "expect_stats";
    type Field = ExpectStatsField;

    fn classify(attr_type: u16) -> AttrClass<ExpectStatsField> {
        expect_stats_attr(attr_type)
    }

    fn set(&mut self, field: ExpectStatsField, value: u32) {
        match field {
            ExpectStatsField::New => self.new = value,
            ExpectStatsField::Create => self.create = value,
            ExpectStatsField::Delete => self.delete = value,
        }
    }

    fn set_res_id(&mut self, res_id: u16) {
        self.cpu = res_id;
    }
}

/// Connection tracking table occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalStats {
    /// Entries currently in the table.
    pub entries: u32,
    /// Table capacity (`nf_conntrack_max`).
    pub max_entries: u32,
}

impl GlobalStats {
    /// Fraction of the table in use, from 0.0 to 1.0.
    ///
    /// Returns `None` when the kernel reported no capacity.
    pub fn usage(&self) -> Option<f64> {
        (self.max_entries != 0).then(|| self.entries as f64 / self.max_entries as f64)
    }
}

impl StatsRecord for GlobalStats {
    const MSG_TYPE: u16 = nfnl_msg_type(NFNL_SUBSYS_CTNETLINK, IPCTNL_MSG_CT_GET_STATS);
    const NAME: &'static str = "global_stats";
    type Field = GlobalStatsField;

    fn classify(attr_type: u16) -> AttrClass<GlobalStatsField> {
        global_stats_attr(attr_type)
    }

    fn set(&mut self, field: GlobalStatsField, value: u32) {
        match field {
            GlobalStatsField::Entries => self.entries = value,
            GlobalStatsField::MaxEntries => self.max_entries = value,
        }
    }
}
