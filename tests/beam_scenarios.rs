use anyhow::Result;
use yardbeam::testing::*;
use yardbeam::{order_targets, run_beam_search, MissionType};

#[test]
fn empty_target_set_produces_an_empty_plan() -> Result<()> {
    let cfg = default_config();
    let yard = empty_yard(&cfg);
    let cmds = targets(&[]);
    let order = order_targets(&yard, cmds.targets(), &cfg);
    let log = run_beam_search(yard, &cmds, &order, &cfg, None)?;
    assert!(log.is_empty());
    assert_makespan(&log, cfg.sim_start_epoch, 0.0);
    Ok(())
}

#[test]
fn single_accessible_target_is_retrieved_directly() -> Result<()> {
    let cfg = default_config();
    let yard = single_column_yard(&cfg, 0, 0, &[1]);
    let cmds = targets(&[(1, 2)]);
    let order = order_targets(&yard, cmds.targets(), &cfg);
    let log = run_beam_search(yard, &cmds, &order, &cfg, None)?;
    assert_retrieval_order(&log, &[1]);
    assert_log_well_formed(&log);
    assert_eq!(log.entries()[0].mission_type, MissionType::Target);
    Ok(())
}

#[test]
fn one_blocker_relocates_then_retrieves() -> Result<()> {
    let cfg = default_config();
    let yard = single_column_yard(&cfg, 0, 0, &[1, 2]);
    let cmds = targets(&[(1, 0)]);
    let order = order_targets(&yard, cmds.targets(), &cfg);
    let log = run_beam_search(yard, &cmds, &order, &cfg, None)?;
    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[0].mission_type, MissionType::Relocation);
    assert_eq!(log.entries()[0].container_id, 2);
    assert_eq!(log.entries()[1].mission_type, MissionType::Target);
    assert_eq!(log.entries()[1].container_id, 1);
    assert_log_well_formed(&log);
    Ok(())
}

#[test]
fn two_blockers_with_two_agvs_still_completes() -> Result<()> {
    let mut cfg = default_config();
    cfg.agv_count = 2;
    let yard = single_column_yard(&cfg, 0, 0, &[1, 2, 3]);
    let cmds = targets(&[(1, 0)]);
    let order = order_targets(&yard, cmds.targets(), &cfg);
    let log = run_beam_search(yard, &cmds, &order, &cfg, None)?;
    assert_eq!(log.len(), 3);
    assert_retrieval_order(&log, &[1]);
    assert_log_well_formed(&log);
    Ok(())
}

#[test]
fn relocated_blocker_never_lands_on_a_pending_target() -> Result<()> {
    use yardbeam::testing::builders::YardBuilder;
    use yardbeam::Yard;

    let mut cfg = default_config();
    cfg.max_row = 1;
    cfg.max_bay = 3;
    cfg.max_level = 3;
    // column (0,0): target 1 buried under blocker 99; column (0,1): pending
    // target 20 sitting alone; column (0,2): empty, the only legal
    // destination for the blocker.
    let boxes = YardBuilder::new().column(0, 0, &[1, 99]).column(0, 1, &[20]).build();
    let yard = Yard::from_boxes(cfg.max_row, cfg.max_bay, cfg.max_level, &boxes)?;
    let cmds = targets(&[(1, 0), (20, 0)]);
    // Force target 1 to be processed first, while 20 is still pending.
    let order = vec![1, 20];
    let log = run_beam_search(yard, &cmds, &order, &cfg, None)?;

    let relocation = log.entries().iter().find(|e| e.mission_type == MissionType::Relocation).unwrap();
    assert_eq!(relocation.container_id, 99);
    assert_eq!(relocation.dst, yardbeam::Position::Yard { row: 0, bay: 2, level: 0 });
    assert_log_well_formed(&log);
    Ok(())
}

#[test]
fn beam_width_one_still_produces_a_valid_plan() -> Result<()> {
    let mut cfg = default_config();
    cfg.beam_width = 1;
    let yard = single_column_yard(&cfg, 0, 0, &[1, 2]);
    let cmds = targets(&[(1, 0)]);
    let order = order_targets(&yard, cmds.targets(), &cfg);
    let log = run_beam_search(yard, &cmds, &order, &cfg, None)?;
    assert_retrieval_order(&log, &[1]);
    assert_log_well_formed(&log);
    Ok(())
}
