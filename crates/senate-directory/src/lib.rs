pub mod config;
pub mod directory;
pub mod error;
pub mod telemetry;

pub use directory::{
    Category, Directory, DirectoryHandle, DirectoryLoader, DirectorySession, FilterState,
    Legislator, LegislatorId, LoadError, SortDirection, SortField,
};
pub use error::AppError;
