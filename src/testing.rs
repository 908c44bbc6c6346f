//! Testing utilities for the planner.
//!
//! - **Fixtures**: default config, empty/single-column yards, target sets
//! - **Builders**: a fluent [`builders::YardBuilder`] for multi-column yards
//! - **Assertions**: checks against a resulting [`crate::missionlog::MissionLog`]
//!
//! # Quick start
//!
//! ```
//! use yardbeam::testing::*;
//! use yardbeam::ordering::order_targets;
//! use yardbeam::beam::run_beam_search;
//!
//! let cfg = default_config();
//! let yard = single_column_yard(&cfg, 0, 0, &[1, 2]);
//! let cmds = targets(&[(1, 0), (2, 0)]);
//! let order = order_targets(&yard, cmds.targets(), &cfg);
//! let log = run_beam_search(yard, &cmds, &order, &cfg, None).unwrap();
//! assert_retrieval_order(&log, &[2, 1]);
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
