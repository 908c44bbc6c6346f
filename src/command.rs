//! Command rows from `mock_commands.csv` and the subset the scheduler
//! actually needs: which containers are retrieval targets, and how much
//! picking time each one carries.

use crate::yard::BoxId;
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Parses `sku_qty` leniently: missing, empty, or unparseable values all
/// come out as `None` rather than a deserialization error, so the caller
/// can fall back to the documented default.
fn parse_lenient_sku_qty<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            s.parse::<u32>().ok()
        }
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandRow {
    pub cmd_no: u64,
    pub cmd_type: String,
    pub parent_carrier_id: BoxId,
    #[serde(default, deserialize_with = "parse_lenient_sku_qty")]
    pub sku_qty: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Commands {
    sku_qty: HashMap<BoxId, u32>,
    /// Target container ids, in the CSV row order they were declared.
    targets: Vec<BoxId>,
}

impl Commands {
    pub fn from_rows(rows: &[CommandRow]) -> Result<Self> {
        let mut sku_qty = HashMap::new();
        let mut targets = Vec::new();
        for row in rows {
            if row.cmd_type == "target" {
                targets.push(row.parent_carrier_id);
                sku_qty.insert(row.parent_carrier_id, row.sku_qty.unwrap_or(1));
            }
        }
        Ok(Commands { sku_qty, targets })
    }

    pub fn targets(&self) -> &[BoxId] {
        &self.targets
    }

    pub fn sku_qty_for(&self, box_id: BoxId) -> u32 {
        self.sku_qty.get(&box_id).copied().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_targets_in_row_order() {
        let rows = vec![
            CommandRow { cmd_no: 1, cmd_type: "other".into(), parent_carrier_id: 9, sku_qty: None },
            CommandRow { cmd_no: 2, cmd_type: "target".into(), parent_carrier_id: 1, sku_qty: Some(3) },
            CommandRow { cmd_no: 3, cmd_type: "target".into(), parent_carrier_id: 2, sku_qty: None },
        ];
        let cmds = Commands::from_rows(&rows).unwrap();
        assert_eq!(cmds.targets(), &[1, 2]);
        assert_eq!(cmds.sku_qty_for(1), 3);
        assert_eq!(cmds.sku_qty_for(2), 1);
    }

    #[test]
    fn unknown_cmd_types_are_treated_as_non_targets() {
        let rows = vec![CommandRow { cmd_no: 1, cmd_type: "bogus".into(), parent_carrier_id: 1, sku_qty: None }];
        let cmds = Commands::from_rows(&rows).unwrap();
        assert!(cmds.targets().is_empty());
    }
}
