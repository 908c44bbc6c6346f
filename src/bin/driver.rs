//! CLI entry point: run the planner against a directory containing
//! `yard_config.csv`, `mock_yard.csv` and `mock_commands.csv`, writing
//! `output_missions_python.csv` alongside them.
//!
//! Usage: `driver [<data-dir>]` (defaults to the current directory).

use std::path::PathBuf;
use std::process::ExitCode;
use yardbeam::driver::Driver;

fn main() -> ExitCode {
    let data_dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let driver = Driver::new(
        data_dir.join("yard_config.csv"),
        data_dir.join("mock_yard.csv"),
        data_dir.join("mock_commands.csv"),
        data_dir.join("output_missions_python.csv"),
    );

    match driver.run() {
        Ok(outcome) => {
            eprintln!(
                "wrote {} missions, makespan {:.3}s",
                outcome.log.len(),
                outcome.log.final_makespan(outcome.sim_start_epoch)
            );
            outcome.metrics.print();
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
