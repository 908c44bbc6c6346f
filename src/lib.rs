//! # yardbeam
//!
//! A beam-search AGV dispatch planner for container-yard retrieval.
//!
//! Given a yard's current container layout, a fleet of AGVs, and a list of
//! retrieval targets, `yardbeam` first orders the targets with a rule-based
//! heuristic ([`ordering`]) and then searches for a low-makespan sequence of
//! relocation and retrieval missions with a pruned beam search ([`beam`]).
//!
//! ## Key features
//!
//! - **Persistent, `Arc`-shared state** — every beam branch carries its own
//!   [`yard::Yard`], [`agv::AgvPool`] and [`missionlog::MissionLog`], cloned
//!   cheaply because untouched columns/vectors are reference-counted rather
//!   than deep-copied.
//! - **Deterministic tie-breaking** — branches are ranked by
//!   `(cost, log length, AGV ready-time sum, node id)`, so two runs over the
//!   same input always produce the same plan.
//! - **Parallel branch expansion** — independent parent branches expand
//!   concurrently via `rayon`, with a join barrier before each round's prune.
//! - **CSV-driven I/O** — the planner's only external interface is four CSV
//!   files, read and written with typed, `serde`-backed readers/writers.
//! - **Metrics** — per-run counters and gauges (phase sizes, mission count,
//!   makespan) recorded on every run via [`metrics::PlannerMetrics`].
//!
//! ## Quick start
//!
//! ```no_run
//! use yardbeam::driver::Driver;
//!
//! # fn main() -> anyhow::Result<()> {
//! let driver = Driver::new(
//!     "data/yard_config.csv",
//!     "data/mock_yard.csv",
//!     "data/mock_commands.csv",
//!     "data/output_missions_python.csv",
//! );
//! let outcome = driver.run()?;
//! println!("{} missions, makespan {}s", outcome.log.len(), outcome.log.final_makespan(outcome.sim_start_epoch));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core concepts
//!
//! ### `Yard`
//!
//! A [`yard::Yard`] is a grid of columns, each a stack of containers. All
//! mutation returns a new `Yard`; siblings' columns are shared via `Arc`.
//!
//! ### `Position` and the cost model
//!
//! A [`position::Position`] is either a yard cell or a workstation port.
//! [`position::travel_seconds`] turns a pair of positions into a travel
//! time using the planner's fixed per-cell travel-time unit.
//!
//! ### Target ordering
//!
//! [`ordering::order_targets`] greedily sequences retrieval targets by a
//! weighted score of blockers above, other pending targets in the same
//! column, and distance to the workstation.
//!
//! ### The beam search
//!
//! [`beam::run_beam_search`] walks the ordered targets, relocating blockers
//! one at a time and retrieving each target, branching over every
//! `(AGV, destination)` choice and pruning back to the configured beam
//! width after every atomic action.

pub mod agv;
pub mod beam;
pub mod command;
pub mod config;
pub mod driver;
pub mod errors;
pub mod io;
pub mod metrics;
pub mod missionlog;
pub mod ordering;
pub mod position;
pub mod testing;
pub mod utils;
pub mod yard;

pub use agv::{AgvPool, AgvState};
pub use beam::{run_beam_search, BeamNode};
pub use command::{CommandRow, Commands};
pub use config::{Config, ConfigRow};
pub use driver::{Driver, RunOutcome};
pub use errors::PlannerError;
pub use missionlog::{MissionLog, MissionLogEntry, MissionType};
pub use ordering::order_targets;
pub use position::{render_position, travel_seconds, workstation_distance, Position};
pub use yard::{BoxId, ColumnKey, Yard};
