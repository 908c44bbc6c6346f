//! Rule-based greedy ordering of retrieval targets.
//!
//! At each step, every column that still has an unprocessed target exposes
//! its topmost remaining target as a candidate. Each candidate is scored by
//! `w_b * B - w_u * U + w_d * D` (lower wins):
//!
//! - `B`: containers currently above the target in its column.
//! - `U`: other targets still remaining below it in the same column.
//! - `D`: Manhattan distance from the target's column to the workstation
//!   anchor.
//!
//! Ties are broken by `(row, bay)` lexicographically. The result does not
//! depend on the order targets were passed in, only on the set and the
//! yard's layout, so re-ordering an already-ordered set is a no-op.

use crate::config::Config;
use crate::position::workstation_distance;
use crate::yard::{BoxId, ColumnKey, Yard};
use std::collections::HashMap;

pub fn order_targets(yard: &Yard, targets: &[BoxId], cfg: &Config) -> Vec<BoxId> {
    let mut per_column: HashMap<ColumnKey, Vec<BoxId>> = HashMap::new();
    for &t in targets {
        if let Some((col, _level)) = yard.locate(t) {
            per_column.entry(col).or_default().push(t);
        }
    }
    for stack in per_column.values_mut() {
        stack.sort_by_key(|&b| std::cmp::Reverse(yard.locate(b).map(|(_, l)| l).unwrap_or(0)));
    }

    let mut idx: HashMap<ColumnKey, usize> = per_column.keys().map(|&c| (c, 0)).collect();
    let mut out = Vec::with_capacity(targets.len());

    loop {
        let mut best: Option<(f64, ColumnKey, BoxId)> = None;
        for (&col, stack) in &per_column {
            let i = idx[&col];
            if i >= stack.len() {
                continue;
            }
            let box_id = stack[i];
            let (_, level) = yard.locate(box_id).expect("target located above");
            let b = (yard.height_of(col) - level - 1) as f64;
            let u = (stack.len() - i - 1) as f64;
            let d = workstation_distance(col.0, col.1) as f64;
            let score = cfg.w_b * b - cfg.w_u * u + cfg.w_d * d;
            let better = match &best {
                None => true,
                Some((best_score, best_col, _)) => score < *best_score || (score == *best_score && col < *best_col),
            };
            if better {
                best = Some((score, col, box_id));
            }
        }
        match best {
            Some((_, col, box_id)) => {
                out.push(box_id);
                *idx.get_mut(&col).unwrap() += 1;
            }
            None => break,
        }
    }
    out
}
