use crate::engine::writer::OutputSink;
use crate::test_helpers::factory::Factory;

#[test]
fn test_memory_sink_stores_and_fails_per_table() {
    let ok = Factory::table_ref().with_name("a").create();
    let bad = Factory::table_ref().with_name("b").create();
    let sink = Factory::sink().failing_for(&bad);

    sink.write_entry(&ok, "first").unwrap();
    sink.write_entry(&ok, "second").unwrap();
    assert!(sink.write_entry(&bad, "x").is_err());

    assert_eq!(sink.entry(&ok).as_deref(), Some("second"));
    assert_eq!(sink.names(), vec!["shop.a".to_string()]);
}
