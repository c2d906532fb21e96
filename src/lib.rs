pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::http::XivApiClient;
pub use config::TomlConfig;
pub use core::assembly::{FreeCompanyAssembler, FreeCompanyLookup, ROOT_LABEL};
pub use core::naming::{to_compound_capitalized, to_lower_separated};
pub use core::transform::transform;
pub use domain::model::{Mapping, Record, RecordList, StructuredNode};
pub use utils::error::{FcError, Result};
