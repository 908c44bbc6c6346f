//! Orchestrates a full planner run: load the three input CSVs, order the
//! targets, run the beam search, and write the mission CSV.

use crate::beam::run_beam_search;
use crate::io::csv::{load_commands, load_config, load_yard, write_missions};
use crate::metrics::PlannerMetrics;
use crate::missionlog::MissionLog;
use crate::ordering::order_targets;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct Driver {
    pub config_path: PathBuf,
    pub yard_path: PathBuf,
    pub commands_path: PathBuf,
    pub output_path: PathBuf,
}

pub struct RunOutcome {
    pub log: MissionLog,
    pub sim_start_epoch: f64,
    pub metrics: PlannerMetrics,
}

impl Driver {
    pub fn new(
        config_path: impl AsRef<Path>,
        yard_path: impl AsRef<Path>,
        commands_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Self {
        Driver {
            config_path: config_path.as_ref().to_path_buf(),
            yard_path: yard_path.as_ref().to_path_buf(),
            commands_path: commands_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    pub fn run(&self) -> Result<RunOutcome> {
        let cfg = load_config(&self.config_path).context("loading yard_config.csv")?;
        let yard = load_yard(&self.yard_path, &cfg).context("loading mock_yard.csv")?;
        let commands = load_commands(&self.commands_path).context("loading mock_commands.csv")?;
        let order = order_targets(&yard, commands.targets(), &cfg);

        let mut metrics = PlannerMetrics::new();
        metrics.record_start();
        let log = run_beam_search(yard, &commands, &order, &cfg, Some(&mut metrics))
            .context("running beam search")?;
        metrics.record_end();

        write_missions(&self.output_path, &log, cfg.sim_start_epoch)
            .context("writing output_missions_python.csv")?;

        Ok(RunOutcome { log, sim_start_epoch: cfg.sim_start_epoch, metrics })
    }
}
