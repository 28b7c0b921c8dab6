//! Response materializer for completed export jobs
//!
//! Turns the generic job records handed back by the submission/polling layer
//! into a typed [`RawRecipientDataExportResponse`], and pulls the exported file
//! to a local path when the caller asked for one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{ResponseError, Result};
use crate::options::RawRecipientDataExportOptions;
use crate::transfer::FileTransfer;
use crate::types::{FileEncoding, JobId};

/// Completion parameter keys read by the materializer
pub mod keys {
    /// Remote path of the exported file
    pub const FILE_PATH: &str = "FILE_PATH";
    /// Free-form summary of exported event types
    pub const EVENT_TYPES: &str = "EVENT_TYPES";
    /// Encoding token of the exported file
    pub const FILE_ENCODING: &str = "FILE_ENCODING";
    /// Number of exported rows
    pub const EXPORTED_ROW_COUNT: &str = "EXPORTED_ROW_COUNT";
    /// Free-form summary of exported mailing types
    pub const MAILING_TYPE_ARRAY: &str = "MAILING_TYPE_ARRAY";
    /// Time zone offset the export was produced in
    pub const TIME_ZONE: &str = "TIME_ZONE";
}

/// Job handle returned when the export is submitted
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPollingContainer {
    /// Remote job identifier
    pub job_id: JobId,
    /// Parameters returned alongside the job id (FILE_PATH lives here)
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl JobPollingContainer {
    /// Container for a job with no parameters yet
    pub fn new(job_id: i64) -> Self {
        Self {
            job_id: JobId(job_id),
            parameters: HashMap::new(),
        }
    }

    /// Add a parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Status record of a job that has finished
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResponse {
    /// Free-text job description
    #[serde(default)]
    pub description: String,
    /// Upper-case keyed job parameters
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl JobResponse {
    /// Record with a description and no parameters
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            parameters: HashMap::new(),
        }
    }

    /// Add a parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Typed result of a raw recipient data export
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecipientDataExportResponse {
    /// Remote job identifier
    pub job_id: JobId,
    /// Job description
    pub description: String,
    /// Encoding of the exported file
    pub file_encoding: FileEncoding,
    /// Event types summary
    pub event_types: String,
    /// Number of exported rows
    pub exported_row_count: i64,
    /// Mailing types summary
    pub mailing_types: String,
    /// Time zone offset
    pub time_zone: i32,
    /// File name in the remote store, as reported by the job
    pub remote_file_name: String,
    /// Local copy, when one was downloaded
    pub local_file: Option<PathBuf>,
}

impl RawRecipientDataExportResponse {
    /// Whether the exported file was copied locally
    pub fn was_downloaded(&self) -> bool {
        self.local_file.is_some()
    }
}

/// Response paired with the job that produced it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContainer<T> {
    /// Remote job identifier
    pub job_id: JobId,
    /// The typed response
    pub response: T,
}

impl<T> ResponseContainer<T> {
    /// Wrap a response
    pub fn new(job_id: JobId, response: T) -> Self {
        Self { job_id, response }
    }

    /// Unwrap into the inner response
    pub fn into_response(self) -> T {
        self.response
    }
}

/// Build the typed response and fetch the file if requested
///
/// Missing parameters resolve to empty strings, zero, or the default
/// encoding. Parameters that are present but malformed are reported as
/// [`ResponseError`]s and no download is attempted.
///
/// The download runs exactly once when `options.move_to_ftp()` holds and a
/// non-empty local path is set; otherwise the transfer collaborator is not
/// touched. Transfer errors are returned unchanged.
pub fn materialize(
    polling: &JobPollingContainer,
    job: &JobResponse,
    options: &RawRecipientDataExportOptions,
    transfer: &dyn FileTransfer,
) -> Result<RawRecipientDataExportResponse> {
    let params = &job.parameters;
    let job_id = polling.job_id;

    let file_encoding = match non_blank(params, keys::FILE_ENCODING) {
        Some(token) => FileEncoding::from_str(token).inspect_err(|e| {
            warn!(job_id = job_id.get(), error = %e, "unrecognized export encoding");
        })?,
        None => FileEncoding::default(),
    };

    let remote_file_name = text(&polling.parameters, keys::FILE_PATH)
        .or_else(|| text(params, keys::FILE_PATH))
        .unwrap_or_default()
        .to_string();

    let mut response = RawRecipientDataExportResponse {
        job_id,
        description: job.description.clone(),
        file_encoding,
        event_types: text(params, keys::EVENT_TYPES).unwrap_or_default().to_string(),
        exported_row_count: integer(job_id, params, keys::EXPORTED_ROW_COUNT)?,
        mailing_types: text(params, keys::MAILING_TYPE_ARRAY)
            .unwrap_or_default()
            .to_string(),
        time_zone: integer(job_id, params, keys::TIME_ZONE)?,
        remote_file_name,
        local_file: None,
    };

    match (options.move_to_ftp(), options.local_file()) {
        (true, Some(local)) => {
            info!(
                job_id = job_id.get(),
                remote = %response.remote_file_name,
                local = %local.display(),
                transfer = transfer.name(),
                "downloading exported file"
            );
            transfer.download(&response.remote_file_name, local)?;
            response.local_file = Some(local.to_path_buf());
        }
        (false, _) => {
            debug!(job_id = job_id.get(), "move to FTP disabled, skipping download");
        }
        (true, None) => {
            debug!(job_id = job_id.get(), "no local path requested, skipping download");
        }
    }

    Ok(response)
}

fn text<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str)
}

fn non_blank<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    text(params, key).map(str::trim).filter(|v| !v.is_empty())
}

fn integer<T: FromStr + Default>(
    job_id: JobId,
    params: &HashMap<String, String>,
    key: &str,
) -> std::result::Result<T, ResponseError> {
    let Some(raw) = non_blank(params, key) else {
        return Ok(T::default());
    };
    raw.parse().map_err(|_| {
        warn!(job_id = job_id.get(), key, value = raw, "non-integer job parameter");
        ResponseError::InvalidInteger {
            key: key.to_string(),
            value: raw.to_string(),
        }
    })
}
