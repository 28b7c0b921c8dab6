//! Command object tying the request builder to the response materializer
//!
//! The command owns no connection state. Job submission and polling are
//! delegated to a [`JobRunner`], file retrieval to a [`FileTransfer`]; both
//! are injected so callers (and tests) decide how they are implemented.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::options::RawRecipientDataExportOptions;
use crate::request::{RequestBuilder, XmlRequest};
use crate::response::{
    self, JobPollingContainer, JobResponse, RawRecipientDataExportResponse, ResponseContainer,
};
use crate::transfer::FileTransfer;

/// Submits a request document and waits for the resulting job to finish
///
/// Implementations own transport, authentication, polling intervals and
/// retry policy. Errors they return reach the caller of
/// [`RawRecipientDataExportCommand::execute`] unchanged.
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Send `request`, wait for completion, and return the job records
    async fn run(&self, request: &XmlRequest) -> Result<(JobPollingContainer, JobResponse)>;
}

/// The "export raw recipient data" operation
#[derive(Clone)]
pub struct RawRecipientDataExportCommand {
    builder: RequestBuilder,
    transfer: Arc<dyn FileTransfer>,
}

impl std::fmt::Debug for RawRecipientDataExportCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawRecipientDataExportCommand")
            .field("builder", &self.builder)
            .field("transfer", &self.transfer.name())
            .finish()
    }
}

impl RawRecipientDataExportCommand {
    /// Command with default request settings and the given transfer backend
    pub fn new(transfer: Arc<dyn FileTransfer>) -> Self {
        Self {
            builder: RequestBuilder::new(),
            transfer,
        }
    }

    /// Command wired from a [`Config`]
    pub fn from_config(config: &Config) -> Self {
        Self {
            builder: RequestBuilder::with_config(config.request.clone()),
            transfer: config.file_transfer(),
        }
    }

    /// Replace the transfer backend
    pub fn with_transfer(mut self, transfer: Arc<dyn FileTransfer>) -> Self {
        self.transfer = transfer;
        self
    }

    /// Build the request document for `options`
    pub fn build_request(&self, options: &RawRecipientDataExportOptions) -> Result<XmlRequest> {
        self.builder.build_request(options)
    }

    /// Materialize finished job records, downloading the file if requested
    pub fn read_response(
        &self,
        polling: &JobPollingContainer,
        job: &JobResponse,
        options: &RawRecipientDataExportOptions,
    ) -> Result<ResponseContainer<RawRecipientDataExportResponse>> {
        let response = response::materialize(polling, job, options, self.transfer.as_ref())?;
        Ok(ResponseContainer::new(polling.job_id, response))
    }

    /// Build, run and materialize in one call
    pub async fn execute(
        &self,
        runner: &dyn JobRunner,
        options: &RawRecipientDataExportOptions,
    ) -> Result<ResponseContainer<RawRecipientDataExportResponse>> {
        let request = self.build_request(options)?;
        let (polling, job) = runner.run(&request).await?;
        info!(job_id = polling.job_id.get(), "raw recipient data export finished");
        self.read_response(&polling, &job, options)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::response::keys;
    use crate::transfer::NoOpFileTransfer;
    use crate::types::JobId;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransfer {
        calls: Mutex<Vec<(String, PathBuf)>>,
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

    struct CannedRunner {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JobRunner for CannedRunner {
        async fn run(&self, request: &XmlRequest) -> Result<(JobPollingContainer, JobResponse)> {
            self.seen.lock().unwrap().push(request.as_str().to_string());
            Ok((
                JobPollingContainer::new(12).with_parameter(keys::FILE_PATH, "/export.csv"),
                JobResponse::new("done").with_parameter(keys::EXPORTED_ROW_COUNT, "3"),
            ))
        }
    }

    struct FailingRunner;

    #[async_trait]
    impl JobRunner for FailingRunner {
        async fn run(&self, _request: &XmlRequest) -> Result<(JobPollingContainer, JobResponse)> {
            Err(Error::Job("job 12 ended in ERROR".to_string()))
        }
    }

    #[tokio::test]
    async fn execute_submits_built_request() {
        let command = RawRecipientDataExportCommand::new(Arc::new(NoOpFileTransfer));
        let runner = CannedRunner {
            seen: Mutex::new(Vec::new()),
        };
        let options = RawRecipientDataExportOptions::default().with_list_id(9);

        let container = command.execute(&runner, &options).await.unwrap();

        assert_eq!(container.job_id, JobId(12));
        assert_eq!(container.response.exported_row_count, 3);
        assert_eq!(container.response.remote_file_name, "/export.csv");
        let seen = runner.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("<LIST_ID>9</LIST_ID>"));
    }

    #[tokio::test]
    async fn execute_propagates_runner_errors() {
        let command = RawRecipientDataExportCommand::new(Arc::new(NoOpFileTransfer));
        let result = command
            .execute(&FailingRunner, &RawRecipientDataExportOptions::default())
            .await;
        assert!(matches!(result, Err(Error::Job(_))));
    }

    #[test]
    fn noop_backend_surfaces_when_local_copy_requested() {
        let command = RawRecipientDataExportCommand::new(Arc::new(NoOpFileTransfer));
        let options = RawRecipientDataExportOptions::default().with_local_file("/tmp/out.csv");
        let result = command.read_response(
            &JobPollingContainer::new(1).with_parameter(keys::FILE_PATH, "/export.csv"),
            &JobResponse::default(),
            &options,
        );
        assert!(matches!(result, Err(Error::NotSupported(_))));
    }

    #[test]
    fn from_config_applies_request_settings() {
        let config = Config::from_json_str(r#"{"request": {"xml_declaration": false}}"#).unwrap();
        let command = RawRecipientDataExportCommand::from_config(&config);
        let xml = command
            .build_request(&RawRecipientDataExportOptions::default())
            .unwrap();
        assert!(xml.as_str().starts_with("<Envelope>"));
        assert!(format!("{command:?}").contains("noop"));
    }

    #[test]
    fn with_transfer_replaces_backend() {
        let recording = Arc::new(RecordingTransfer::default());
        let command = RawRecipientDataExportCommand::new(Arc::new(NoOpFileTransfer))
            .with_transfer(recording.clone());
        let options = RawRecipientDataExportOptions::default().with_local_file("/tmp/out.csv");

        let container = command
            .read_response(
                &JobPollingContainer::new(1).with_parameter(keys::FILE_PATH, "/export.csv"),
                &JobResponse::default(),
                &options,
            )
            .unwrap();

        assert_eq!(
            container.response.local_file.as_deref(),
            Some(Path::new("/tmp/out.csv"))
        );
        let calls = recording.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("/export.csv".to_string(), PathBuf::from("/tmp/out.csv"))]
        );
        assert!(format!("{command:?}").contains("recording"));
    }
}
