//! Assertion helpers for checking a scheduler's resulting mission log.

use crate::missionlog::MissionLog;
use crate::yard::BoxId;

/// Asserts that every target id appears exactly once as a `Target` mission,
/// in the given order.
pub fn assert_retrieval_order(log: &MissionLog, expected: &[BoxId]) {
    let actual: Vec<BoxId> = log
        .entries()
        .iter()
        .filter(|e| e.mission_type == crate::missionlog::MissionType::Target)
        .map(|e| e.container_id)
        .collect();
    assert_eq!(actual, expected, "retrieval order mismatch");
}

/// Asserts that no mission in the log ends before it starts and that
/// `mission_no` strictly increases.
pub fn assert_log_well_formed(log: &MissionLog) {
    let mut last_no = 0u64;
    for entry in log.entries() {
        assert!(entry.end_time >= entry.start_time, "mission {} ends before it starts", entry.mission_no);
        assert!(entry.mission_no > last_no, "mission_no did not strictly increase");
        last_no = entry.mission_no;
    }
}

/// Asserts the plan's final makespan (epoch-relative) equals `expected`.
pub fn assert_makespan(log: &MissionLog, sim_start_epoch: f64, expected: f64) {
    let actual = log.final_makespan(sim_start_epoch);
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected makespan {expected}, got {actual}"
    );
}
