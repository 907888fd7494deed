pub mod error;
pub mod file;
pub mod registry;

pub use error::ToolConfigError;
pub use file::{ToolFile, ToolFileFormat, ToolSpec};
pub use registry::ToolRegistry;
