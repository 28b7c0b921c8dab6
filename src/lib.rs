//! # wca-export
//!
//! Request builder and response materializer for the "export raw recipient
//! data" operation of the WCA XML API.
//!
//! ## Design Philosophy
//!
//! wca-export is designed to be:
//! - **Order exact** - Elements are emitted in the sequence the remote schema expects
//! - **Sparse** - Fields the caller never set never reach the wire
//! - **Strict on input from the engine** - Malformed job parameters are errors, not guesses
//! - **Collaborator driven** - Transport, polling and file transfer are injected
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use wca_export::{
//!     JobPollingContainer, JobResponse, NoOpFileTransfer, RawRecipientDataExportCommand,
//!     RawRecipientDataExportOptions,
//! };
//!
//! let command = RawRecipientDataExportCommand::new(Arc::new(NoOpFileTransfer));
//! let options = RawRecipientDataExportOptions::default().with_list_id(3);
//!
//! // Hand this to whatever submits jobs to the engine
//! let request = command.build_request(&options)?;
//! assert!(request.as_str().contains("<LIST_ID>3</LIST_ID>"));
//!
//! // ...and turn the finished job back into a typed response
//! let polling = JobPollingContainer::new(34).with_parameter("FILE_PATH", "/download/export.csv");
//! let job = JobResponse::new("Raw recipient export").with_parameter("EXPORTED_ROW_COUNT", "55");
//! let container = command.read_response(&polling, &job, &options)?;
//! assert_eq!(container.response.exported_row_count, 55);
//! # Ok::<(), wca_export::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Command object and job runner seam
pub mod command;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Export options
pub mod options;
/// Request document builder
pub mod request;
/// Job completion materializer
pub mod response;
/// File transfer collaborators
pub mod transfer;
/// Core wire types
pub mod types;

// Re-export commonly used types
pub use command::{JobRunner, RawRecipientDataExportCommand};
pub use config::{Config, RequestConfig, TransferConfig};
pub use error::{Error, ResponseError, Result};
pub use options::{MailingTypes, RawRecipientDataExportOptions};
pub use request::{RequestBuilder, XmlRequest};
pub use response::{
    JobPollingContainer, JobResponse, RawRecipientDataExportResponse, ResponseContainer,
    materialize,
};
pub use transfer::{FileTransfer, LocalFileTransfer, NoOpFileTransfer};
pub use types::{DateTimeRange, ExportFormat, FileEncoding, JobId, MailingReportId, Visibility};
