use std::sync::Arc;

use indoc::indoc;

use super::StatementWriter;
use crate::engine::types::{SplitPlan, SplitPoint, SqlValue, Strategy, TableRef};
use crate::test_helpers::factory::Factory;

fn values_plan(points: Vec<SplitPoint>) -> SplitPlan {
    SplitPlan::new(
        TableRef::new("shop", "orders"),
        Some("idx_name".into()),
        Strategy::Sampling,
        points,
    )
    .unwrap()
}

#[test]
fn renders_index_statement_with_typed_literals() {
    let writer = StatementWriter::new(Arc::new(Factory::sink()), 1000);
    let plan = values_plan(vec![
        SplitPoint::Values(vec![SqlValue::Text("a'b".into()), SqlValue::Int(1)]),
        SplitPoint::Values(vec![SqlValue::Text("c".into()), SqlValue::Int(2)]),
    ]);

    let expected = indoc! {"
        -- presplit: strategy=sampling table=shop.orders points=2 index=idx_name
        SPLIT TABLE `shop`.`orders` INDEX `idx_name` BY ('a''b', 1),('c', 2);
    "};
    assert_eq!(writer.render(&plan), expected);
}

#[test]
fn renders_raw_keys_as_hex_literals() {
    let writer = StatementWriter::new(Arc::new(Factory::sink()), 1000);
    let plan = SplitPlan::new(
        TableRef::new("shop", "orders"),
        None,
        Strategy::Key,
        vec![
            SplitPoint::Key(vec![0x74, 0x80, 0x01]),
            SplitPoint::Key(vec![0x74, 0x80, 0xff]),
        ],
    )
    .unwrap();

    let expected = indoc! {"
        -- presplit: strategy=key table=shop.orders points=2
        SPLIT TABLE `shop`.`orders` BY (x'748001'),(x'7480ff');
    "};
    assert_eq!(writer.render(&plan), expected);
}

#[test]
fn batches_long_plans_in_order() {
    let writer = StatementWriter::new(Arc::new(Factory::sink()), 2);
    let plan = SplitPlan::new(
        TableRef::new("shop", "orders"),
        None,
        Strategy::Range,
        (1..=5).map(|v| SplitPoint::value(SqlValue::Int(v))).collect(),
    )
    .unwrap()
    .approximate();

    let expected = indoc! {"
        -- presplit: strategy=range table=shop.orders points=5 approximate
        SPLIT TABLE `shop`.`orders` BY (1),(2);
        SPLIT TABLE `shop`.`orders` BY (3),(4);
        SPLIT TABLE `shop`.`orders` BY (5);
    "};
    assert_eq!(writer.render(&plan), expected);
}

#[test]
fn empty_plan_renders_header_only() {
    let writer = StatementWriter::new(Arc::new(Factory::sink()), 10);
    let plan = values_plan(Vec::new()).short(true);

    let rendered = writer.render(&plan);
    assert!(rendered.starts_with("-- presplit: strategy=sampling"));
    assert!(rendered.contains(" short\n"));
    assert!(!rendered.contains("SPLIT TABLE"));
}

#[test]
fn write_creates_one_entry_per_table() {
    let sink = Arc::new(Factory::sink());
    let writer = StatementWriter::new(sink.clone(), 10);
    let plan = values_plan(vec![SplitPoint::value(SqlValue::Int(7))]);

    writer.write(&plan).unwrap();
    writer.write(&plan).unwrap();

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.entry(&plan.table), Some(writer.render(&plan)));
}
