use anyhow::Result;
use yardbeam::testing::*;
use yardbeam::order_targets;

#[test]
fn deeper_targets_come_out_before_shallower_ones_in_a_column() -> Result<()> {
    let cfg = default_config();
    let yard = single_column_yard(&cfg, 2, 2, &[1, 2, 3, 4]);
    let cmds = targets(&[(1, 0), (2, 0), (3, 0), (4, 0)]);
    let order = order_targets(&yard, cmds.targets(), &cfg);
    assert_eq!(order, vec![4, 3, 2, 1]);
    Ok(())
}

#[test]
fn ordering_is_independent_of_input_order() -> Result<()> {
    let cfg = default_config();
    let yard = single_column_yard(&cfg, 0, 0, &[1, 2, 3]);
    let cmds = targets(&[(1, 0), (2, 0), (3, 0)]);
    let forward = order_targets(&yard, cmds.targets(), &cfg);
    let shuffled = order_targets(&yard, &[3, 1, 2], &cfg);
    assert_eq!(forward, shuffled);
    Ok(())
}

#[test]
fn targets_not_present_in_the_yard_are_skipped() -> Result<()> {
    let cfg = default_config();
    let yard = single_column_yard(&cfg, 0, 0, &[1]);
    let order = order_targets(&yard, &[1, 999], &cfg);
    assert_eq!(order, vec![1]);
    Ok(())
}
