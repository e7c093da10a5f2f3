//! Configuration record handling
//!
//! - Shallow merge of field changes into the held record
//! - Loading a record from a JSON or TOML file with provenance

mod load;
mod merge;

pub use load::{load_config, ConfigError, ConfigFormat, ConfigSource, LoadedConfig};
pub use merge::{merge_values, shallow_merge};
