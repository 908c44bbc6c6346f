//! Beam-search AGV dispatch scheduler.
//!
//! Given a yard, a fleet of AGVs, and targets in retrieval order, the
//! scheduler processes targets one at a time. For each target it first
//! relocates blockers out of the way (one relocation per round, each round
//! branching over every `(agv, destination column)` choice and pruning back
//! to the beam width), then retrieves the target itself. Every branch
//! carries its own yard snapshot, AGV pool and mission log; expansion of
//! independent parent branches is parallelized with `rayon`, with a join
//! barrier before each round's prune.

mod expand;

use crate::agv::AgvPool;
use crate::command::Commands;
use crate::config::Config;
use crate::errors::PlannerError;
use crate::metrics::PlannerMetrics;
use crate::missionlog::MissionLog;
use crate::position::Position;
use crate::utils::OrdF64;
use crate::yard::{BoxId, Yard};
use anyhow::{Context, Result};
use std::time::Instant;

#[derive(Clone)]
pub struct BeamNode {
    pub yard: Yard,
    pub agvs: AgvPool,
    pub log: MissionLog,
    pub next_target_idx: usize,
    pub cost: f64,
    pub penalty: f64,
    pub node_id: u64,
}

impl BeamNode {
    /// Ascending sort key used both to prune a round's beam and to pick the
    /// final winner: lower cost+penalty first, then fewer log entries,
    /// then lower total AGV ready time, then lower node id.
    fn rank_key(&self) -> (OrdF64, usize, OrdF64, u64) {
        (OrdF64(self.cost + self.penalty), self.log.len(), OrdF64(self.agvs.sum_ready_times()), self.node_id)
    }
}

fn prune(mut beam: Vec<BeamNode>, width: usize) -> Vec<BeamNode> {
    beam.sort_by(|a, b| a.rank_key().cmp(&b.rank_key()));
    beam.truncate(width.max(1));
    beam
}

fn staging_position(cfg: &Config) -> Position {
    Position::Yard { row: cfg.staging_row, bay: cfg.staging_bay, level: 0 }
}

/// Run the beam search over `ordered_targets` (already produced by
/// [`crate::ordering::order_targets`]) and return the winning mission log.
pub fn run_beam_search(
    initial_yard: Yard,
    commands: &Commands,
    ordered_targets: &[BoxId],
    cfg: &Config,
    mut metrics: Option<&mut PlannerMetrics>,
) -> Result<MissionLog> {
    if ordered_targets.is_empty() {
        return Ok(MissionLog::default());
    }

    let start = Instant::now();
    let initial_agvs = AgvPool::new_staged(cfg.agv_count, staging_position(cfg), cfg.sim_start_epoch);
    let mut beam = vec![BeamNode {
        yard: initial_yard,
        agvs: initial_agvs,
        log: MissionLog::default(),
        next_target_idx: 0,
        cost: cfg.sim_start_epoch,
        penalty: 0.0,
        node_id: 0,
    }];
    let mut next_node_id = 1u64;

    for (i, &target) in ordered_targets.iter().enumerate() {
        if let Some(timeout) = cfg.timeout_secs {
            if start.elapsed().as_secs_f64() > timeout {
                return Err(PlannerError::Timeout(format!(
                    "no complete plan found within {timeout}s ({i}/{} targets processed)",
                    ordered_targets.len()
                ))
                .into());
            }
        }
        let remaining_after = &ordered_targets[i + 1..];
        beam = expand::run_target_phase(beam, target, remaining_after, commands, cfg, &mut next_node_id)
            .with_context(|| format!("processing target {target}"))?;
        if beam.is_empty() {
            return Err(PlannerError::NoFeasibleRelocation(format!(
                "no beam branch could complete target {target}"
            ))
            .into());
        }
        beam = prune(beam, cfg.beam_width);
        if let Some(m) = metrics.as_mut() {
            m.record_phase(i, beam.len());
        }
    }

    let winner = beam.into_iter().min_by(|a, b| a.rank_key().cmp(&b.rank_key())).expect("beam is non-empty");
    if let Some(m) = metrics {
        m.record_result(winner.log.len(), winner.log.final_makespan(cfg.sim_start_epoch));
    }
    Ok(winner.log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandRow, Commands};
    use crate::ordering::order_targets;

    fn commands_for(targets: &[(BoxId, u32)]) -> Commands {
        let rows: Vec<CommandRow> = targets
            .iter()
            .enumerate()
            .map(|(i, &(id, qty))| CommandRow {
                cmd_no: i as u64,
                cmd_type: "target".into(),
                parent_carrier_id: id,
                sku_qty: Some(qty),
            })
            .collect();
        Commands::from_rows(&rows).unwrap()
    }

    #[test]
    fn empty_targets_yields_empty_log() {
        let yard = Yard::from_boxes(3, 3, 3, &[]).unwrap();
        let cfg = Config::defaults_for_test();
        let cmds = commands_for(&[]);
        let log = run_beam_search(yard, &cmds, &[], &cfg, None).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.final_makespan(cfg.sim_start_epoch), 0.0);
    }

    #[test]
    fn single_accessible_target_needs_no_relocation() {
        let yard = Yard::from_boxes(3, 3, 3, &[(1, 0, 0, 0)]).unwrap();
        let cfg = Config::defaults_for_test();
        let cmds = commands_for(&[(1, 2)]);
        let order = order_targets(&yard, cmds.targets(), &cfg);
        let log = run_beam_search(yard, &cmds, &order, &cfg, None).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].container_id, 1);
    }

    #[test]
    fn one_blocker_is_relocated_before_retrieval() {
        let yard = Yard::from_boxes(3, 3, 3, &[(1, 0, 0, 0), (2, 0, 0, 1)]).unwrap();
        let cfg = Config::defaults_for_test();
        let cmds = commands_for(&[(1, 1)]);
        let order = order_targets(&yard, cmds.targets(), &cfg);
        let log = run_beam_search(yard, &cmds, &order, &cfg, None).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].container_id, 2);
        assert_eq!(log.entries()[1].container_id, 1);
    }
}
