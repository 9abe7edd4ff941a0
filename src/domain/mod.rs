//! Domain models and types for onexport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`NotebookId`])
//! - **Job descriptors** ([`ExportJob`], [`OutputKind`], [`LocationHint`])
//! - **Outcomes** ([`JobOutcome`], [`JobStatus`])
//! - **Listing models** ([`NotebookInfo`], [`VersionInfo`])
//! - **Error types** ([`OnexportError`], [`AutomationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use onexport::domain::{ExportJob, LocationHint, NotebookId, OutputKind};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let job = ExportJob::new(
//!     NotebookId::new("{5E2B}{1}{B0}")?,
//!     "Work",
//!     LocationHint::Network,
//!     "C:/Backups/OneNote",
//!     OutputKind::Pdf,
//! )?;
//! assert_eq!(job.output_kind().extension(), ".pdf");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod job;
pub mod notebook;
pub mod outcome;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{AutomationError, OnexportError};
pub use ids::NotebookId;
pub use job::{ExportJob, LocationHint, OutputKind};
pub use notebook::{NotebookInfo, VersionInfo};
pub use outcome::{JobOutcome, JobStatus};
pub use result::Result;
