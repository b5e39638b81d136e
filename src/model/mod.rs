pub mod config;
pub mod news;
pub mod verification;

pub use config::{Config, ConfigError, DimensionDefaults, OutletConfig, SearchStrategy};
pub use news::*;
pub use verification::*;
