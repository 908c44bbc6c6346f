//! Per-round branch expansion for the beam-search scheduler.

use super::BeamNode;
use crate::command::Commands;
use crate::config::Config;
use crate::missionlog::{MissionLogEntry, MissionType};
use crate::position::{travel_seconds, Position};
use crate::yard::{BoxId, ColumnKey};
use anyhow::Result;
use rayon::prelude::*;
use std::collections::HashSet;

use super::prune;

/// Run all the relocation rounds needed to uncover `target`, then the
/// single retrieval round for it.
pub fn run_target_phase(
    mut beam: Vec<BeamNode>,
    target: BoxId,
    remaining_after: &[BoxId],
    commands: &Commands,
    cfg: &Config,
    next_node_id: &mut u64,
) -> Result<Vec<BeamNode>> {
    loop {
        let max_blockers = beam
            .iter()
            .map(|n| n.yard.blockers_above(target).unwrap_or(0))
            .max()
            .unwrap_or(0);
        if max_blockers == 0 {
            break;
        }
        beam = expand_relocation_round(&beam, target, remaining_after, cfg, next_node_id)?;
        if beam.is_empty() {
            return Ok(beam);
        }
        beam = prune(beam, cfg.beam_width);
    }

    beam = expand_retrieval_round(&beam, target, commands, cfg, next_node_id)?;
    if beam.is_empty() {
        return Ok(beam);
    }
    Ok(prune(beam, cfg.beam_width))
}

fn expand_relocation_round(
    beam: &[BeamNode],
    target: BoxId,
    remaining_after: &[BoxId],
    cfg: &Config,
    next_node_id: &mut u64,
) -> Result<Vec<BeamNode>> {
    let remaining_queue: HashSet<BoxId> = std::iter::once(target).chain(remaining_after.iter().copied()).collect();
    let next_target_col = remaining_after.first().copied();

    let per_parent: Vec<Result<Vec<BeamNode>>> = beam
        .par_iter()
        .map(|node| -> Result<Vec<BeamNode>> {
            let blockers = node.yard.blockers_above(target)?;
            if blockers == 0 {
                return Ok(vec![node.clone()]);
            }
            let (src_col, _) = node.yard.locate(target).expect("target is in the yard");
            let next_target_col_key: Option<ColumnKey> =
                next_target_col.and_then(|t| node.yard.locate(t)).map(|(c, _)| c);

            let mut children = Vec::new();
            for row in 0..cfg.max_row {
                for bay in 0..cfg.max_bay {
                    let dest = (row, bay);
                    if dest == src_col {
                        continue;
                    }
                    children.extend(try_relocate(
                        node,
                        src_col,
                        dest,
                        target,
                        &remaining_queue,
                        next_target_col_key,
                        cfg,
                    )?);
                }
            }
            Ok(children)
        })
        .collect();

    let mut flat = Vec::new();
    for result in per_parent {
        flat.extend(result?);
    }
    for child in &mut flat {
        child.node_id = *next_node_id;
        *next_node_id += 1;
    }
    Ok(flat)
}

fn try_relocate(
    node: &BeamNode,
    src_col: ColumnKey,
    dest_col: ColumnKey,
    target: BoxId,
    remaining_queue: &HashSet<BoxId>,
    next_target_col: Option<ColumnKey>,
    cfg: &Config,
) -> Result<Vec<BeamNode>> {
    if node.yard.height_of(dest_col) as i32 >= node.yard.max_level {
        return Ok(Vec::new());
    }
    if let Some(top_box) = node.yard.top_of(dest_col) {
        if remaining_queue.contains(&top_box) {
            // hard filter: never bury a not-yet-retrieved target directly.
            return Ok(Vec::new());
        }
    }

    let mut penalty = 0.0;
    if node.yard.column_contains_any(dest_col, remaining_queue) {
        penalty += cfg.w_penalty_blocking;
    }
    if Some(dest_col) == next_target_col {
        penalty += cfg.w_penalty_lookahead;
    }

    let mut children = Vec::with_capacity(node.agvs.len());
    for agv in node.agvs.iter() {
        let mut child = apply_relocation(node, agv.agv_id, src_col, dest_col, target, cfg)?;
        child.penalty = node.penalty + penalty;
        children.push(child);
    }
    Ok(children)
}

fn apply_relocation(
    node: &BeamNode,
    agv_id: u32,
    src_col: ColumnKey,
    dest_col: ColumnKey,
    target: BoxId,
    cfg: &Config,
) -> Result<BeamNode> {
    let src_level = node.yard.height_of(src_col) as i32 - 1;
    let src_pos = Position::Yard { row: src_col.0, bay: src_col.1, level: src_level };
    let (after_removal, box_id) = node.yard.remove_top(src_col)?;
    let dest_level = after_removal.height_of(dest_col) as i32;
    let new_yard = after_removal.push_on(dest_col, box_id)?;
    let dst_pos = Position::Yard { row: dest_col.0, bay: dest_col.1, level: dest_level };

    let agv = node.agvs.get(agv_id).expect("agv exists in pool");
    let travel1 = travel_seconds(cfg, agv.position, src_pos);
    let travel2 = travel_seconds(cfg, src_pos, dst_pos);
    let start_time = agv.ready_time;
    let end_time = start_time + travel1 + cfg.t_handle + travel2 + cfg.t_handle;
    let new_agvs = node.agvs.commit(agv_id, dst_pos, end_time);

    let entry = MissionLogEntry {
        mission_no: node.log.len() as u64 + 1,
        agv_id,
        mission_type: MissionType::Relocation,
        container_id: box_id,
        related_target_id: target,
        src: src_pos,
        dst: dst_pos,
        start_time,
        end_time,
        makespan: 0.0,
        sku_qty: 0,
        picking_duration: 0.0,
    };
    let new_log = node.log.push(entry);
    let new_cost = new_log.entries().last().expect("just pushed").makespan;

    Ok(BeamNode {
        yard: new_yard,
        agvs: new_agvs,
        log: new_log,
        next_target_idx: node.next_target_idx,
        cost: new_cost,
        penalty: node.penalty,
        node_id: 0,
    })
}

fn expand_retrieval_round(
    beam: &[BeamNode],
    target: BoxId,
    commands: &Commands,
    cfg: &Config,
    next_node_id: &mut u64,
) -> Result<Vec<BeamNode>> {
    let sku_qty = commands.sku_qty_for(target);

    let per_parent: Vec<Result<Vec<BeamNode>>> = beam
        .par_iter()
        .map(|node| -> Result<Vec<BeamNode>> {
            let port_index = node.next_target_idx % cfg.port_count.max(1);
            let mut out = Vec::new();
            for agv in node.agvs.iter() {
                out.push(apply_retrieval(node, agv.agv_id, target, sku_qty, port_index, cfg)?);
            }
            Ok(out)
        })
        .collect();

    let mut flat = Vec::new();
    for result in per_parent {
        flat.extend(result?);
    }
    for child in &mut flat {
        child.node_id = *next_node_id;
        *next_node_id += 1;
        child.next_target_idx += 1;
    }
    Ok(flat)
}

fn apply_retrieval(
    node: &BeamNode,
    agv_id: u32,
    target: BoxId,
    sku_qty: u32,
    port_index: usize,
    cfg: &Config,
) -> Result<BeamNode> {
    let (col, level) = node.yard.locate(target).expect("target is accessible");
    let src_pos = Position::Yard { row: col.0, bay: col.1, level: level as i32 };
    let (new_yard, box_id) = node.yard.remove_top(col)?;
    debug_assert_eq!(box_id, target);
    let dst_pos = Position::Port(port_index);

    let agv = node.agvs.get(agv_id).expect("agv exists in pool");
    let travel1 = travel_seconds(cfg, agv.position, src_pos);
    let travel2 = travel_seconds(cfg, src_pos, dst_pos);
    let picking = cfg.t_pick * sku_qty as f64;
    let start_time = agv.ready_time;
    let end_time = start_time + travel1 + cfg.t_handle + travel2 + cfg.t_handle + cfg.t_process + picking;
    let new_agvs = node.agvs.commit(agv_id, dst_pos, end_time);

    let entry = MissionLogEntry {
        mission_no: node.log.len() as u64 + 1,
        agv_id,
        mission_type: MissionType::Target,
        container_id: box_id,
        related_target_id: target,
        src: src_pos,
        dst: dst_pos,
        start_time,
        end_time,
        makespan: 0.0,
        sku_qty,
        picking_duration: picking,
    };
    let new_log = node.log.push(entry);
    let new_cost = new_log.entries().last().expect("just pushed").makespan;

    Ok(BeamNode {
        yard: new_yard,
        agvs: new_agvs,
        log: new_log,
        next_target_idx: node.next_target_idx,
        cost: new_cost,
        penalty: node.penalty,
        node_id: 0,
    })
}
