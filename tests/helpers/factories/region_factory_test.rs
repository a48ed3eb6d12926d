use crate::test_helpers::factory::Factory;

#[test]
fn test_region_factory_builds_contiguous_layout() {
    let regions = Factory::regions()
        .with_bounds(b"a", b"z")
        .with_boundary(b"g")
        .with_boundary(b"p")
        .with_first_id(10)
        .create();

    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0].start_key, b"a".to_vec());
    assert_eq!(regions[0].end_key, regions[1].start_key);
    assert_eq!(regions[1].end_key, regions[2].start_key);
    assert_eq!(regions[2].end_key, b"z".to_vec());
    assert_eq!(
        regions.iter().map(|r| r.region_id).collect::<Vec<_>>(),
        vec![10, 11, 12]
    );
}
