//! Typed CSV readers/writers, plus the loaders and writer specific to the
//! planner's four CSV files: `yard_config.csv`, `mock_yard.csv`,
//! `mock_commands.csv` (inputs) and `output_missions_python.csv` (output).

use crate::command::{CommandRow, Commands};
use crate::config::{Config, ConfigRow};
use crate::missionlog::MissionLog;
use crate::position::render_position;
use crate::yard::Yard;
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{create_dir_all, File};
use std::path::Path;

/// Read a CSV file into a typed `Vec<T>`, with row-numbered error context.
pub fn read_csv_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(f);
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        let v = rec.with_context(|| format!("parse CSV record #{} in {}", i + 1, path.display()))?;
        out.push(v);
    }
    Ok(out)
}

/// Write a typed slice to a CSV file with a header row, creating parent
/// directories if needed.
pub fn write_csv_vec<T: Serialize>(path: impl AsRef<Path>, data: &[T]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
        }
    }
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    for (i, row) in data.iter().enumerate() {
        wtr.serialize(row).with_context(|| format!("serialize row #{} to {}", i, path.display()))?;
    }
    wtr.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(data.len())
}

/// Load and validate the planner configuration from `yard_config.csv`. The
/// file holds exactly one data row.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let mut rows: Vec<ConfigRow> = read_csv_vec(&path)?;
    let row = rows
        .pop()
        .with_context(|| format!("{} has no config row", path.as_ref().display()))?;
    Config::from_row(row)
}

#[derive(Debug, Clone, serde::Deserialize)]
struct BoxRow {
    container_id: u32,
    row: i32,
    bay: i32,
    level: i32,
}

/// Load the initial yard layout from `mock_yard.csv`.
pub fn load_yard(path: impl AsRef<Path>, cfg: &Config) -> Result<Yard> {
    let rows: Vec<BoxRow> = read_csv_vec(&path)?;
    let boxes: Vec<(u32, i32, i32, i32)> = rows.into_iter().map(|r| (r.container_id, r.row, r.bay, r.level)).collect();
    Yard::from_boxes(cfg.max_row, cfg.max_bay, cfg.max_level, &boxes)
        .with_context(|| format!("building yard from {}", path.as_ref().display()))
}

/// Load the command set from `mock_commands.csv`.
pub fn load_commands(path: impl AsRef<Path>) -> Result<Commands> {
    let rows: Vec<CommandRow> = read_csv_vec(&path)?;
    Commands::from_rows(&rows).with_context(|| format!("building commands from {}", path.as_ref().display()))
}

#[derive(Debug, Clone, serde::Serialize)]
struct OutputRow {
    mission_no: u64,
    agv_id: u32,
    mission_type: &'static str,
    container_id: u32,
    related_target_id: u32,
    #[serde(rename = "src_pos")]
    src: String,
    #[serde(rename = "dst_pos")]
    dst: String,
    start_time: f64,
    end_time: f64,
    start_s: f64,
    end_s: f64,
    makespan: f64,
    sku_qty: u32,
    #[serde(rename = "picking_duration(s)")]
    picking_duration_s: f64,
}

/// Write the winning mission log to `output_missions_python.csv`, rendering
/// positions and converting absolute times to epoch-relative seconds.
pub fn write_missions(path: impl AsRef<Path>, log: &MissionLog, sim_start_epoch: f64) -> Result<usize> {
    let rows: Vec<OutputRow> = log
        .entries()
        .iter()
        .map(|e| OutputRow {
            mission_no: e.mission_no,
            agv_id: e.agv_id,
            mission_type: match e.mission_type {
                crate::missionlog::MissionType::Relocation => "relocation",
                crate::missionlog::MissionType::Target => "target",
            },
            container_id: e.container_id,
            related_target_id: e.related_target_id,
            src: render_position(e.src),
            dst: render_position(e.dst),
            start_time: e.start_time,
            end_time: e.end_time,
            start_s: e.start_time - sim_start_epoch,
            end_s: e.end_time - sim_start_epoch,
            makespan: e.makespan - sim_start_epoch,
            sku_qty: e.sku_qty,
            picking_duration_s: e.picking_duration,
        })
        .collect();
    write_csv_vec(path, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::missionlog::{MissionLogEntry, MissionType};
    use crate::position::Position;

    #[test]
    fn round_trips_through_a_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("yard_config.csv");
        std::fs::write(&cfg_path, "max_row,max_bay,max_level,agv_count,beam_width,port_count,t_travel,t_handle,t_process,t_pick,sim_start_epoch,w_penalty_blocking,w_penalty_lookahead,w_b,w_u,w_d,staging_row,staging_bay,timeout_secs\n3,3,3,2,10,1,1.0,1.0,1.0,1.0,1000.0,100.0,10.0,2.0,5.0,0.5,0,0,\n").unwrap();
        let cfg = load_config(&cfg_path).unwrap();
        assert_eq!(cfg.max_row, 3);
        assert_eq!(cfg.agv_count, 2);

        let yard_path = dir.path().join("mock_yard.csv");
        std::fs::write(&yard_path, "container_id,row,bay,level\n1,0,0,0\n2,0,0,1\n").unwrap();
        let yard = load_yard(&yard_path, &cfg).unwrap();
        assert_eq!(yard.height_of((0, 0)), 2);

        let out_path = dir.path().join("output_missions_python.csv");
        let log = MissionLog::default().push(MissionLogEntry {
            mission_no: 1,
            agv_id: 0,
            mission_type: MissionType::Target,
            container_id: 1,
            related_target_id: 1,
            src: Position::Yard { row: 0, bay: 0, level: 0 },
            dst: Position::Port(0),
            start_time: 1000.0,
            end_time: 1011.0,
            makespan: 0.0,
            sku_qty: 2,
            picking_duration: 2.0,
        });
        write_missions(&out_path, &log, 1000.0).unwrap();
        let contents = std::fs::read_to_string(&out_path).unwrap();
        assert!(contents.contains("work station (Port 0)"));
        assert!(contents.contains("11"));
    }
}
