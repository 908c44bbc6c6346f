use anyhow::Result;
use yardbeam::io::csv::{load_commands, load_config, load_yard, write_missions};
use yardbeam::{order_targets, run_beam_search};

#[test]
fn end_to_end_through_csv_files() -> Result<()> {
    let dir = tempfile::tempdir()?;

    std::fs::write(
        dir.path().join("yard_config.csv"),
        "max_row,max_bay,max_level,agv_count,beam_width,port_count,t_travel,t_handle,t_process,t_pick,sim_start_epoch,w_penalty_blocking,w_penalty_lookahead,w_b,w_u,w_d,staging_row,staging_bay,timeout_secs\n\
         5,5,5,1,10,1,1.0,1.0,1.0,1.0,1000.0,100.0,10.0,2.0,5.0,0.5,0,0,\n",
    )?;
    std::fs::write(
        dir.path().join("mock_yard.csv"),
        "container_id,row,bay,level\n1,0,0,0\n2,0,0,1\n",
    )?;
    std::fs::write(
        dir.path().join("mock_commands.csv"),
        "cmd_no,cmd_type,parent_carrier_id,sku_qty\n1,target,1,3\n",
    )?;

    let cfg = load_config(dir.path().join("yard_config.csv"))?;
    let yard = load_yard(dir.path().join("mock_yard.csv"), &cfg)?;
    let commands = load_commands(dir.path().join("mock_commands.csv"))?;
    let order = order_targets(&yard, commands.targets(), &cfg);
    let log = run_beam_search(yard, &commands, &order, &cfg, None)?;

    let out_path = dir.path().join("output_missions_python.csv");
    write_missions(&out_path, &log, cfg.sim_start_epoch)?;

    let written = std::fs::read_to_string(&out_path)?;
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("mission_no"));
    assert_eq!(lines.count(), log.len());
    Ok(())
}
