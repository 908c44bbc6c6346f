//! Yard cells and workstation ports, and the closed-form travel cost model.

use crate::config::Config;

/// A physical location an AGV can occupy or travel to.
///
/// Yard cells are addressed by `(row, bay, level)`; workstation ports are
/// addressed only by their logical index, since the cost model treats every
/// port as sitting at the same travel distance from a given yard cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Yard { row: i32, bay: i32, level: i32 },
    Port(usize),
}

impl Position {
    /// The `(row, bay)` column this position sits in, ignoring level.
    /// Workstation cells use `row = -1, bay = 0` for distance purposes.
    fn column_for_distance(self) -> (i32, i32) {
        match self {
            Position::Yard { row, bay, .. } => (row, bay),
            Position::Port(_) => (-1, 0),
        }
    }
}

fn manhattan((r1, b1): (i32, i32), (r2, b2): (i32, i32)) -> i64 {
    ((r1 - r2).abs() + (b1 - b2).abs()) as i64
}

/// Travel time in seconds between two positions, using the fixed
/// per-cell travel-time unit from the planner configuration.
pub fn travel_seconds(cfg: &Config, from: Position, to: Position) -> f64 {
    cfg.t_travel * manhattan(from.column_for_distance(), to.column_for_distance()) as f64
}

/// Manhattan distance in cells from a yard column to the workstation anchor.
pub fn workstation_distance(row: i32, bay: i32) -> i64 {
    manhattan((row, bay), (-1, 0))
}

/// Render a position the way the output mission CSV expects it.
pub fn render_position(pos: Position) -> String {
    match pos {
        Position::Yard { row, bay, level } => format!("({row};{bay};{level})"),
        Position::Port(idx) => format!("work station (Port {idx})"),
    }
}
