pub mod catalog;
pub mod config;
pub mod error;
pub mod generate;
pub mod launch;
pub mod platform;
pub mod session;
pub mod status;

pub use crate::catalog::{Catalog, CatalogSummary, FileEntry};
pub use crate::config::AppConfig;
pub use crate::error::{Error, Result};
pub use crate::generate::{GenerateOptions, GenerateReport, GeneratedScript, LoopCount};
pub use crate::launch::{LaunchOptions, LaunchReport, ProcessLauncher, WindowManager};
pub use crate::session::Session;
pub use crate::status::{Notice, SilentReporter, StatusReporter};
