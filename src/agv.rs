//! The AGV pool: each vehicle's current position and time it becomes free.
//!
//! Like [`crate::yard::Yard`], the pool is `Arc`-shared as a whole and
//! copy-on-write on commit, since the vehicle count in this domain is small
//! enough that cloning the vector is cheaper than bookkeeping a delta.

use crate::position::Position;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgvState {
    pub agv_id: u32,
    pub position: Position,
    pub ready_time: f64,
}

#[derive(Clone, Debug)]
pub struct AgvPool {
    agvs: Arc<Vec<AgvState>>,
}

impl AgvPool {
    /// Stage `count` AGVs at `staging` with `ready_time` set to the
    /// simulation's start epoch.
    pub fn new_staged(count: u32, staging: Position, sim_start_epoch: f64) -> Self {
        let agvs = (0..count)
            .map(|agv_id| AgvState { agv_id, position: staging, ready_time: sim_start_epoch })
            .collect();
        AgvPool { agvs: Arc::new(agvs) }
    }

    pub fn get(&self, agv_id: u32) -> Option<AgvState> {
        self.agvs.iter().find(|a| a.agv_id == agv_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgvState> {
        self.agvs.iter()
    }

    pub fn len(&self) -> usize {
        self.agvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agvs.is_empty()
    }

    pub fn sum_ready_times(&self) -> f64 {
        self.agvs.iter().map(|a| a.ready_time).sum()
    }

    /// Return a new pool with `agv_id` moved to `position` and its
    /// `ready_time` advanced to `ready_time`.
    pub fn commit(&self, agv_id: u32, position: Position, ready_time: f64) -> AgvPool {
        let mut next = (*self.agvs).clone();
        if let Some(slot) = next.iter_mut().find(|a| a.agv_id == agv_id) {
            slot.position = position;
            slot.ready_time = ready_time;
        }
        AgvPool { agvs: Arc::new(next) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_only_touches_target_agv() {
        let pool = AgvPool::new_staged(2, Position::Yard { row: 0, bay: 0, level: 0 }, 1000.0);
        let pool2 = pool.commit(0, Position::Port(0), 1005.0);
        assert_eq!(pool2.get(0).unwrap().ready_time, 1005.0);
        assert_eq!(pool2.get(1).unwrap().ready_time, 1000.0);
        assert_eq!(pool.get(0).unwrap().ready_time, 1000.0);
    }

    #[test]
    fn sum_ready_times_adds_all_agvs() {
        let pool = AgvPool::new_staged(3, Position::Yard { row: 0, bay: 0, level: 0 }, 10.0);
        assert_eq!(pool.sum_ready_times(), 30.0);
    }
}
