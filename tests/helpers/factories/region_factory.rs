use crate::engine::types::RegionDescriptor;

/// Builds a gap-free region layout from its interior boundaries.
pub struct RegionFactory {
    table_start: Vec<u8>,
    table_end: Vec<u8>,
    boundaries: Vec<Vec<u8>>,
    first_id: u64,
}

impl RegionFactory {
    pub fn new() -> Self {
        Self {
            table_start: b"t\x80\x00\x00\x00\x00\x00\x00\x2a".to_vec(),
            table_end: b"t\x80\x00\x00\x00\x00\x00\x00\x2b".to_vec(),
            boundaries: Vec::new(),
            first_id: 1,
        }
    }

    pub fn with_bounds(mut self, start: &[u8], end: &[u8]) -> Self {
        self.table_start = start.to_vec();
        self.table_end = end.to_vec();
        self
    }

    pub fn with_boundary(mut self, key: &[u8]) -> Self {
        self.boundaries.push(key.to_vec());
        self
    }

    pub fn with_first_id(mut self, id: u64) -> Self {
        self.first_id = id;
        self
    }

    /// `boundaries.len() + 1` regions covering `[start, end)`.
    pub fn create(self) -> Vec<RegionDescriptor> {
        let mut edges = Vec::with_capacity(self.boundaries.len() + 2);
        edges.push(self.table_start);
        edges.extend(self.boundaries);
        edges.push(self.table_end);

        edges
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                RegionDescriptor::new(self.first_id + i as u64, pair[0].clone(), pair[1].clone())
            })
            .collect()
    }
}
