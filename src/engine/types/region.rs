/// A live boundary pair reported by the cluster for one storage region.
///
/// Keys are in the engine's native encoding. An empty `start_key` means the
/// region is unbounded below, an empty `end_key` unbounded above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    pub region_id: u64,
    pub start_key: Vec<u8>,
    pub end_key: Vec<u8>,
}

impl RegionDescriptor {
    pub fn new(region_id: u64, start_key: Vec<u8>, end_key: Vec<u8>) -> Self {
        Self {
            region_id,
            start_key,
            end_key,
        }
    }
}

/// A table's reported regions plus its catalog id when the source knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegions {
    pub table_id: Option<i64>,
    pub regions: Vec<RegionDescriptor>,
}

impl TableRegions {
    pub fn new(table_id: Option<i64>, regions: Vec<RegionDescriptor>) -> Self {
        Self { table_id, regions }
    }
}

/// Key prefix `t{id}` with the id in memcomparable form.
pub fn table_prefix(table_id: i64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(b't');
    key.extend_from_slice(&((table_id as u64) ^ (1u64 << 63)).to_be_bytes());
    key
}

/// Checks that an ordered run spans `[t{id}, t{id+1})`. Empty keys are unbounded.
pub fn check_coverage(ordered: &[RegionDescriptor], table_id: i64) -> Result<(), String> {
    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return Err("no regions reported".to_string());
    };
    let start = table_prefix(table_id);
    let end = table_prefix(table_id.saturating_add(1));
    if !first.start_key.is_empty() && first.start_key > start {
        return Err(format!(
            "region {} starts at {}, after table {table_id} begins at {}",
            first.region_id,
            hex::encode(&first.start_key),
            hex::encode(&start)
        ));
    }
    if !last.end_key.is_empty() && last.end_key < end {
        return Err(format!(
            "region {} ends at {}, before table {table_id} ends at {}",
            last.region_id,
            hex::encode(&last.end_key),
            hex::encode(&end)
        ));
    }
    Ok(())
}

/// Orders regions by start key and checks that they form one gap-free,
/// non-overlapping run. Returns a description of the first violation.
pub fn order_contiguous(mut regions: Vec<RegionDescriptor>) -> Result<Vec<RegionDescriptor>, String> {
    if regions.is_empty() {
        return Err("no regions reported".to_string());
    }
    regions.sort_by(|a, b| a.start_key.cmp(&b.start_key));
    regions.dedup_by(|a, b| a.region_id == b.region_id);

    for pair in regions.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        if left.end_key != right.start_key {
            return Err(format!(
                "region {} ends at {} but region {} starts at {}",
                left.region_id,
                hex::encode(&left.end_key),
                right.region_id,
                hex::encode(&right.start_key)
            ));
        }
    }
    Ok(regions)
}
