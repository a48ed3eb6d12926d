use crate::engine::types::TableRef;

pub struct TableRefFactory {
    schema: String,
    name: String,
}

impl TableRefFactory {
    pub fn new() -> Self {
        Self {
            schema: "shop".into(),
            name: "orders".into(),
        }
    }

    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn create(self) -> TableRef {
        TableRef::new(self.schema, self.name)
    }

    /// One ref per name, all in the factory's schema.
    pub fn create_list(self, names: &[&str]) -> Vec<TableRef> {
        names
            .iter()
            .map(|n| TableRef::new(self.schema.clone(), *n))
            .collect()
    }
}
