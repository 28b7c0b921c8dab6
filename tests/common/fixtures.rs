//! Shared fixtures: canned job records and a recording transfer double

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use wca_export::response::keys;
use wca_export::{FileTransfer, JobPollingContainer, JobResponse, Result};

pub const REMOTE_FILE: &str = "/path/to/file.csv";
pub const LOCAL_FILE: &str = "/local/path/data.csv";

pub const DEFAULT_REQUEST: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#,
    "<Envelope><Body><RawRecipientDataExport>",
    "<EXPORT_FORMAT>CSV</EXPORT_FORMAT>",
    "<FILE_ENCODING>utf-8</FILE_ENCODING>",
    "<MOVE_TO_FTP/><SENT_MAILINGS/><ALL_EVENT_TYPES/>",
    "</RawRecipientDataExport></Body></Envelope>",
);

/// Records download calls without touching any store
#[derive(Default)]
pub struct RecordingTransfer {
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingTransfer {
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl FileTransfer for RecordingTransfer {
    fn download(&self, remote_path: &str, local_path: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((remote_path.to_string(), local_path.to_path_buf()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

pub fn polling_container() -> JobPollingContainer {
    JobPollingContainer::new(34).with_parameter(keys::FILE_PATH, REMOTE_FILE)
}

pub fn completed_job() -> JobResponse {
    JobResponse::new("String Job Description")
        .with_parameter(keys::EVENT_TYPES, "Test List")
        .with_parameter(keys::FILE_ENCODING, "iso-8859-1")
        .with_parameter(keys::EXPORTED_ROW_COUNT, "55")
        .with_parameter(keys::MAILING_TYPE_ARRAY, "")
        .with_parameter(keys::TIME_ZONE, "4")
}
