use crate::engine::sql::TableReader;
use crate::engine::types::SqlValue;
use crate::test_helpers::factory::Factory;

#[tokio::test]
async fn test_memory_reader_distinct_tuples_skip_nulls_and_sort() {
    let table = Factory::table_ref().create();
    let definition = Factory::memory_table().column(
        "k",
        crate::engine::types::ColumnType::Integer { unsigned: false },
        vec![
            SqlValue::Int(3),
            SqlValue::Null,
            SqlValue::Int(1),
            SqlValue::Int(3),
            SqlValue::Int(2),
        ],
    );
    let reader = Factory::table_reader().table(table.clone(), definition);
    let cols = vec!["k".to_string()];

    assert_eq!(reader.distinct_count(&table, &cols).await.unwrap(), 3);
    let values = reader.distinct_values(&table, &cols).await.unwrap();
    assert_eq!(
        values,
        vec![
            vec![SqlValue::Int(1)],
            vec![SqlValue::Int(2)],
            vec![SqlValue::Int(3)]
        ]
    );

    let page = reader
        .distinct_page(&table, &cols, Some(&[SqlValue::Int(1)]), 1)
        .await
        .unwrap();
    assert_eq!(page, vec![vec![SqlValue::Int(2)]]);
    assert_eq!(reader.page_reads(), 1);
}

#[tokio::test]
async fn test_memory_reader_failing_table() {
    let table = Factory::table_ref().create();
    let reader = Factory::table_reader().failing(table.clone());

    assert!(reader.database_exists("shop").await.unwrap());
    assert_eq!(reader.list_tables("shop").await.unwrap(), vec!["orders".to_string()]);
    assert!(reader.table_stats(&table).await.is_err());
}
