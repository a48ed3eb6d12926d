use crate::test_helpers::factory::Factory;

#[test]
fn test_table_ref_factory_defaults_and_overrides() {
    let table = Factory::table_ref().create();
    assert_eq!(table.to_string(), "shop.orders");

    let table = Factory::table_ref().with_schema("crm").with_name("leads").create();
    assert_eq!(table.schema, "crm");
    assert_eq!(table.name, "leads");
}

#[test]
fn test_table_ref_factory_list_shares_schema() {
    let tables = Factory::table_ref().with_schema("crm").create_list(&["a", "b"]);
    assert_eq!(tables.len(), 2);
    assert!(tables.iter().all(|t| t.schema == "crm"));
}
