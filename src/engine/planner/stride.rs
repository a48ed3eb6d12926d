//! Evenly strided picks over an ordered distinct-value domain.
//!
//! With `d` distinct values and `r` requested regions the stride is
//! `max(d / r, 1)`; boundaries sit at the 1-based positions `k * stride`
//! for `k = 1 .. r - 1`, dropping positions past the end of the domain.

const MIB: u128 = 1024 * 1024;

pub fn stride(distinct: u64, regions: u64) -> u64 {
    if regions == 0 {
        return 1;
    }
    (distinct / regions).max(1)
}

/// 1-based positions of the boundary values, ascending.
pub fn positions(distinct: u64, regions: u64) -> Vec<u64> {
    if regions <= 1 || distinct == 0 {
        return Vec::new();
    }
    let step = stride(distinct, regions);
    (1..regions)
        .map(|k| k * step)
        .take_while(|pos| *pos <= distinct)
        .collect()
}

/// Whether the domain is smaller than the number of requested regions.
pub fn is_short(distinct: u64, regions: u64) -> bool {
    distinct < regions
}

/// Picks boundary values from an ascending distinct set.
pub fn pick<T: Clone>(values: &[T], regions: u64) -> Vec<T> {
    positions(values.len() as u64, regions)
        .into_iter()
        .map(|pos| values[(pos - 1) as usize].clone())
        .collect()
}

/// `ceil(target_bytes / region_bytes)`, never below one region.
pub fn regions_for_bytes(target_bytes: u128, region_size_mb: u64) -> u64 {
    let region_bytes = (region_size_mb.max(1) as u128) * MIB;
    target_bytes.div_ceil(region_bytes).max(1) as u64
}

/// `ceil(rows / rows_per_region)`, never below one region.
pub fn regions_for_rows(rows: u64, rows_per_region: u64) -> u64 {
    rows.div_ceil(rows_per_region.max(1)).max(1)
}

pub fn mib_to_bytes(mb: u64) -> u128 {
    mb as u128 * MIB
}
