//! The append-only record of missions assigned to AGVs along one beam
//! branch.

use crate::position::Position;
use crate::yard::BoxId;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionType {
    Relocation,
    Target,
}

#[derive(Clone, Debug)]
pub struct MissionLogEntry {
    pub mission_no: u64,
    pub agv_id: u32,
    pub mission_type: MissionType,
    pub container_id: BoxId,
    pub related_target_id: BoxId,
    pub src: Position,
    pub dst: Position,
    pub start_time: f64,
    pub end_time: f64,
    /// Running maximum of `end_time` across the log up to and including
    /// this entry, in the same absolute-epoch units as `end_time`.
    pub makespan: f64,
    pub sku_qty: u32,
    pub picking_duration: f64,
}

#[derive(Clone, Debug, Default)]
pub struct MissionLog {
    entries: Arc<Vec<MissionLogEntry>>,
}

impl MissionLog {
    pub fn push(&self, mut entry: MissionLogEntry) -> MissionLog {
        let running_max = self.entries.iter().map(|e| e.end_time).fold(entry.end_time, f64::max);
        entry.makespan = running_max;
        let mut next = (*self.entries).clone();
        next.push(entry);
        MissionLog { entries: Arc::new(next) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MissionLogEntry] {
        &self.entries
    }

    /// The plan's overall makespan relative to the simulation's start
    /// epoch: zero for an empty log.
    pub fn final_makespan(&self, sim_start_epoch: f64) -> f64 {
        self.entries
            .last()
            .map(|e| e.makespan - sim_start_epoch)
            .unwrap_or(0.0)
    }
}
