pub mod resolver;

pub use resolver::TableResolver;
