//! External system integrations for onexport.
//!
//! - [`automation`] - Trait for the OneNote scripting surface
//! - [`helper`] - Helper-program implementation of that trait
//! - [`filesystem`] - Filesystem access for export artifacts and the backup folder
//! - [`process`] - Host process termination on cancel, opening folders
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the export core can
//! be tested with scripted fakes:
//!
//! ```rust,no_run
//! use onexport::adapters::{HelperClient, LocalFilesystem, NotebookAutomation};
//! use onexport::config::HelperConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HelperClient::discover(&HelperConfig::default())?;
//! for notebook in client.list_notebooks().await? {
//!     println!("{} ({})", notebook.name, notebook.location_hint());
//! }
//! # Ok(())
//! # }
//! ```

pub mod automation;
pub mod filesystem;
pub mod helper;
pub mod process;

pub use automation::{NotebookAutomation, OpenedHandle};
pub use filesystem::{ArtifactFilesystem, BackupFilesystem, DirEntryInfo, LocalFilesystem};
pub use helper::HelperClient;
pub use process::{open_folder, HostProcessTerminator, TerminationReport};
