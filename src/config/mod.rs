// Core configuration types
mod core;
mod loader;

pub use self::core::{DocpruneConfig, FixerConfig, IgnoreConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
