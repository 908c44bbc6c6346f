//! Pre-built yards, configs and command sets for common test scenarios.

use crate::command::{CommandRow, Commands};
use crate::config::{Config, ConfigRow};
use crate::yard::{BoxId, Yard};

/// A [`Config`] with every tuning knob left at its documented default.
#[must_use]
pub fn default_config() -> Config {
    Config::from_row(ConfigRow {
        max_row: None,
        max_bay: None,
        max_level: None,
        agv_count: None,
        beam_width: None,
        port_count: None,
        t_travel: None,
        t_handle: None,
        t_process: None,
        t_pick: None,
        sim_start_epoch: None,
        w_penalty_blocking: None,
        w_penalty_lookahead: None,
        w_b: None,
        w_u: None,
        w_d: None,
        staging_row: None,
        staging_bay: None,
        timeout_secs: None,
    })
    .expect("default config is valid")
}

/// An empty yard (no containers) sized by `cfg`.
#[must_use]
pub fn empty_yard(cfg: &Config) -> Yard {
    Yard::from_boxes(cfg.max_row, cfg.max_bay, cfg.max_level, &[]).expect("empty yard is always valid")
}

/// A single column at `(row, bay)` stacked bottom-to-top from `boxes`.
#[must_use]
pub fn single_column_yard(cfg: &Config, row: i32, bay: i32, boxes: &[BoxId]) -> Yard {
    let entries: Vec<(BoxId, i32, i32, i32)> =
        boxes.iter().enumerate().map(|(level, &id)| (id, row, bay, level as i32)).collect();
    Yard::from_boxes(cfg.max_row, cfg.max_bay, cfg.max_level, &entries).expect("well-formed single column")
}

/// Build a [`Commands`] set treating every given id as a retrieval target
/// with the given sku quantity.
#[must_use]
pub fn targets(ids_and_sku: &[(BoxId, u32)]) -> Commands {
    let rows: Vec<CommandRow> = ids_and_sku
        .iter()
        .enumerate()
        .map(|(i, &(id, sku_qty))| CommandRow {
            cmd_no: i as u64,
            cmd_type: "target".into(),
            parent_carrier_id: id,
            sku_qty: Some(sku_qty),
        })
        .collect();
    Commands::from_rows(&rows).expect("well-formed target rows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_yard_stacks_bottom_up() {
        let cfg = default_config();
        let yard = single_column_yard(&cfg, 0, 0, &[10, 20, 30]);
        assert_eq!(yard.top_of((0, 0)), Some(30));
        assert_eq!(yard.blockers_above(10).unwrap(), 2);
    }
}
