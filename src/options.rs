//! Caller-facing option set for a raw recipient data export

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{DateTimeRange, ExportFormat, FileEncoding, MailingReportId, Visibility};

/// Per-type mailing inclusion flags
///
/// Each flag that is `true` emits its own marker element; the order of the
/// fields is the order on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailingTypes {
    /// `<SENDING>`
    pub sending: bool,
    /// `<OPTIN_CONFIRMATION>`
    pub optin_confirmation: bool,
    /// `<PROFILE_CONFIRMATION>`
    pub profile_confirmation: bool,
    /// `<AUTOMATED>`
    pub automated: bool,
    /// `<CAMPAIGN_ACTIVE>`
    pub campaign_active: bool,
    /// `<CAMPAIGN_COMPLETED>`
    pub campaign_completed: bool,
    /// `<CAMPAIGN_CANCELLED>`
    pub campaign_cancelled: bool,
    /// `<CAMPAIGN_SCRAPE_TEMPLATE>`
    pub campaign_scrape_template: bool,
    /// `<INCLUDE_TEST_MAILINGS>`
    pub test_mailings: bool,
}

impl MailingTypes {
    /// Element names of the flags that are set, in wire order
    pub fn enabled_elements(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.sending, "SENDING"),
            (self.optin_confirmation, "OPTIN_CONFIRMATION"),
            (self.profile_confirmation, "PROFILE_CONFIRMATION"),
            (self.automated, "AUTOMATED"),
            (self.campaign_active, "CAMPAIGN_ACTIVE"),
            (self.campaign_completed, "CAMPAIGN_COMPLETED"),
            (self.campaign_cancelled, "CAMPAIGN_CANCELLED"),
            (self.campaign_scrape_template, "CAMPAIGN_SCRAPE_TEMPLATE"),
            (self.test_mailings, "INCLUDE_TEST_MAILINGS"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
    }
}

/// Options for a raw recipient data export
///
/// Every field defaults to "unset". Unset fields never reach the request
/// document, except the handful of elements the remote API always expects
/// (format, encoding and the three umbrella switches, which default to on).
///
/// # Examples
///
/// ```
/// use wca_export::{RawRecipientDataExportOptions, Visibility};
///
/// let options = RawRecipientDataExportOptions::default()
///     .with_list_id(3)
///     .with_columns(["Email", "Opt In Date"])
///     .with_visibility(Visibility::Shared)
///     .with_local_file("/var/exports/recipients.csv");
///
/// assert!(options.move_to_ftp());
/// assert_eq!(options.columns.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecipientDataExportOptions {
    /// Mailing/report pairs to export events for
    pub mailing_report_ids: Option<Vec<MailingReportId>>,

    /// Restrict to events of one campaign
    pub campaign_id: Option<i64>,

    /// Restrict to recipients of one database, contact list or query
    pub list_id: Option<i64>,

    /// Include child lists of `list_id`; only `Some(true)` reaches the wire
    pub include_children: Option<bool>,

    /// Restrict by event timestamp
    pub event_range: Option<DateTimeRange>,

    /// Restrict by mailing send timestamp
    pub send_range: Option<DateTimeRange>,

    /// Export file layout (CSV when unset)
    pub export_format: Option<ExportFormat>,

    /// Export file encoding (utf-8 when unset)
    pub file_encoding: Option<FileEncoding>,

    /// Override for the generated export file name
    pub export_file_name: Option<String>,

    /// Ask the engine to move the result to the FTP store (on when unset)
    pub move_to_ftp: Option<bool>,

    /// Include all sent mailings (on when unset)
    pub include_sent_mailings: Option<bool>,

    /// Per-type mailing inclusion flags
    pub mailing_types: MailingTypes,

    /// Include all event types (on when unset)
    pub include_all_event_types: Option<bool>,

    /// Explicit export column names, in output order
    pub columns: Option<Vec<String>>,

    /// Visibility of the export file
    pub visibility: Visibility,

    /// Only export events not exported before
    pub all_non_exported: bool,

    /// Add the mailing's from-address column
    pub return_from_address: bool,

    /// Add the mailing's from-name column
    pub return_from_name: bool,

    /// Where to store a local copy of the export once the job completes
    pub local_absolute_file_path: Option<PathBuf>,
}

impl RawRecipientDataExportOptions {
    /// Effective move-to-FTP switch
    pub fn move_to_ftp(&self) -> bool {
        self.move_to_ftp.unwrap_or(true)
    }

    /// Effective sent-mailings switch
    pub fn include_sent_mailings(&self) -> bool {
        self.include_sent_mailings.unwrap_or(true)
    }

    /// Effective all-event-types switch
    pub fn include_all_event_types(&self) -> bool {
        self.include_all_event_types.unwrap_or(true)
    }

    /// Local destination for the exported file, if one was requested
    ///
    /// An empty path counts as not requested.
    pub fn local_file(&self) -> Option<&std::path::Path> {
        self.local_absolute_file_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Set the list filter
    pub fn with_list_id(mut self, list_id: i64) -> Self {
        self.list_id = Some(list_id);
        self
    }

    /// Set the campaign filter
    pub fn with_campaign_id(mut self, campaign_id: i64) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }

    /// Set the event date range
    pub fn with_event_range(mut self, range: DateTimeRange) -> Self {
        self.event_range = Some(range);
        self
    }

    /// Set the send date range
    pub fn with_send_range(mut self, range: DateTimeRange) -> Self {
        self.send_range = Some(range);
        self
    }

    /// Set the export columns
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the file visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Request a local copy of the exported file
    pub fn with_local_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_absolute_file_path = Some(path.into());
        self
    }
}
