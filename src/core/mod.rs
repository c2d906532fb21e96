pub mod assembly;
pub mod naming;
pub mod transform;

pub use crate::domain::model::{Mapping, Record, RecordList, StructuredNode};
pub use crate::domain::ports::{ConfigProvider, FreeCompanySource};
pub use crate::utils::error::Result;
