//! Session configuration
//!
//! Defaults come from `shared::constants`; YAML files override them per
//! section and are validated on load.

pub mod error;
pub mod io;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use io::VisConfigFileV1;
pub use settings::{CellConfig, DoiConfig, FilterAction, LayeringConfig, VisConfig};
