pub mod config;
pub mod error;
pub mod headings;
pub mod models;

pub use config::StagingConfig;
pub use error::{ErrorKind, StagingError, StagingResult};
pub use headings::{parse_heading_line, scan_headings};
pub use models::*;
