pub mod model;

pub use model::{
    LoggingConfig, MysqlConfig, Settings, SplitConfig, StatusConfig, load_settings,
    load_settings_from,
};
