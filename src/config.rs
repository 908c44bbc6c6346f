//! Planner configuration, loaded from `yard_config.csv` with documented
//! defaults, and validated up front so the scheduler never has to guard
//! against malformed tuning values mid-search.

use crate::errors::PlannerError;
use anyhow::{Context, Result};
use serde::Deserialize;

/// A single config row as it appears in `yard_config.csv`. Every column is
/// optional in the file; [`Config::from_row`] fills in the documented
/// defaults and then validates the result.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigRow {
    pub max_row: Option<i32>,
    pub max_bay: Option<i32>,
    pub max_level: Option<i32>,
    pub agv_count: Option<u32>,
    pub beam_width: Option<usize>,
    pub port_count: Option<usize>,
    pub t_travel: Option<f64>,
    pub t_handle: Option<f64>,
    pub t_process: Option<f64>,
    pub t_pick: Option<f64>,
    pub sim_start_epoch: Option<f64>,
    pub w_penalty_blocking: Option<f64>,
    pub w_penalty_lookahead: Option<f64>,
    pub w_b: Option<f64>,
    pub w_u: Option<f64>,
    pub w_d: Option<f64>,
    pub staging_row: Option<i32>,
    pub staging_bay: Option<i32>,
    pub timeout_secs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_row: i32,
    pub max_bay: i32,
    pub max_level: i32,
    pub agv_count: u32,
    pub beam_width: usize,
    pub port_count: usize,
    pub t_travel: f64,
    pub t_handle: f64,
    pub t_process: f64,
    pub t_pick: f64,
    pub sim_start_epoch: f64,
    pub w_penalty_blocking: f64,
    pub w_penalty_lookahead: f64,
    pub w_b: f64,
    pub w_u: f64,
    pub w_d: f64,
    pub staging_row: i32,
    pub staging_bay: i32,
    pub timeout_secs: Option<f64>,
}

impl Config {
    pub fn from_row(row: ConfigRow) -> Result<Self> {
        let cfg = Config {
            max_row: row.max_row.unwrap_or(10),
            max_bay: row.max_bay.unwrap_or(10),
            max_level: row.max_level.unwrap_or(5),
            agv_count: row.agv_count.unwrap_or(2),
            beam_width: row.beam_width.unwrap_or(20),
            port_count: row.port_count.unwrap_or(1),
            t_travel: row.t_travel.unwrap_or(1.0),
            t_handle: row.t_handle.unwrap_or(1.0),
            t_process: row.t_process.unwrap_or(1.0),
            t_pick: row.t_pick.unwrap_or(1.0),
            sim_start_epoch: row.sim_start_epoch.unwrap_or(1000.0),
            w_penalty_blocking: row.w_penalty_blocking.unwrap_or(100.0),
            w_penalty_lookahead: row.w_penalty_lookahead.unwrap_or(10.0),
            w_b: row.w_b.unwrap_or(2.0),
            w_u: row.w_u.unwrap_or(5.0),
            w_d: row.w_d.unwrap_or(0.5),
            staging_row: row.staging_row.unwrap_or(0),
            staging_bay: row.staging_bay.unwrap_or(0),
            timeout_secs: row.timeout_secs,
        };
        cfg.validate().context("validating planner configuration")?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.max_row <= 0 || self.max_bay <= 0 || self.max_level <= 0 {
            return Err(PlannerError::ConfigInvalid(
                "max_row, max_bay and max_level must all be positive".into(),
            )
            .into());
        }
        if self.agv_count == 0 {
            return Err(PlannerError::ConfigInvalid("agv_count must be at least 1".into()).into());
        }
        if self.beam_width == 0 {
            return Err(PlannerError::ConfigInvalid("beam_width must be at least 1".into()).into());
        }
        if self.port_count == 0 {
            return Err(PlannerError::ConfigInvalid("port_count must be at least 1".into()).into());
        }
        for (name, v) in [
            ("t_travel", self.t_travel),
            ("t_handle", self.t_handle),
            ("t_process", self.t_process),
            ("t_pick", self.t_pick),
        ] {
            if v < 0.0 {
                return Err(PlannerError::ConfigInvalid(format!("{name} must be non-negative")).into());
            }
        }
        if self.staging_row < 0 || self.staging_bay < 0 {
            return Err(PlannerError::ConfigInvalid("staging position must be non-negative".into()).into());
        }
        if let Some(t) = self.timeout_secs {
            if t <= 0.0 {
                return Err(PlannerError::ConfigInvalid("timeout_secs must be positive when set".into()).into());
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn defaults_for_test() -> Self {
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
}
