//! Core wire types for wca-export

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// Date/time pattern used for every range element on the wire
pub const WIRE_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Identifier of an asynchronous job on the remote engine
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl JobId {
    /// Create a new JobId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<JobId> for i64 {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for JobId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Layout of the exported file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Comma separated values
    #[default]
    #[serde(rename = "CSV")]
    Csv,
    /// Tab separated values
    #[serde(rename = "TAB")]
    Tab,
    /// Pipe separated values
    #[serde(rename = "PIPE")]
    Pipe,
}

impl ExportFormat {
    /// Token sent inside `<EXPORT_FORMAT>`
    pub fn wire_token(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Tab => "TAB",
            ExportFormat::Pipe => "PIPE",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_token())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CSV" => Ok(ExportFormat::Csv),
            "TAB" => Ok(ExportFormat::Tab),
            "PIPE" => Ok(ExportFormat::Pipe),
            _ => Err(ResponseError::UnknownFormat(s.to_string())),
        }
    }
}

/// Character encoding of the exported file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileEncoding {
    /// UTF-8
    #[default]
    #[serde(rename = "utf-8", alias = "UTF-8")]
    Utf8,
    /// ISO-8859-1 (Latin-1)
    #[serde(rename = "iso-8859-1", alias = "ISO-8859-1")]
    Iso8859_1,
}

impl FileEncoding {
    /// Token sent inside `<FILE_ENCODING>` and reported back in FILE_ENCODING
    pub fn wire_token(&self) -> &'static str {
        match self {
            FileEncoding::Utf8 => "utf-8",
            FileEncoding::Iso8859_1 => "iso-8859-1",
        }
    }
}

impl std::fmt::Display for FileEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_token())
    }
}

impl std::str::FromStr for FileEncoding {
    type Err = ResponseError;

    /// Case-insensitive match against the known wire tokens
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        [FileEncoding::Utf8, FileEncoding::Iso8859_1]
            .into_iter()
            .find(|encoding| encoding.wire_token().eq_ignore_ascii_case(token))
            .ok_or_else(|| ResponseError::UnknownEncoding(s.to_string()))
    }
}

/// Who can see the exported file in the remote file store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    /// Leave it to the account default; nothing goes on the wire
    #[default]
    Unset,
    /// Only the exporting user
    Private,
    /// Everyone in the organization
    Shared,
}

impl Visibility {
    /// Element name carrying `TRUE`, or `None` when nothing is emitted
    pub fn element_name(&self) -> Option<&'static str> {
        match self {
            Visibility::Unset => None,
            Visibility::Private => Some("PRIVATE"),
            Visibility::Shared => Some("SHARED"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "UNSET" => Ok(Visibility::Unset),
            "PRIVATE" => Ok(Visibility::Private),
            "SHARED" => Ok(Visibility::Shared),
            _ => Err(ResponseError::UnknownVisibility(s.to_string())),
        }
    }
}

/// Closed date/time interval; both ends are always present
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeRange {
    /// Start of the interval
    pub start: NaiveDateTime,
    /// End of the interval
    pub end: NaiveDateTime,
}

impl DateTimeRange {
    /// Create a range. The ends are taken as given.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Start formatted as `MM/dd/yyyy HH:mm:ss`
    pub fn wire_start(&self) -> String {
        format_wire_date(&self.start)
    }

    /// End formatted as `MM/dd/yyyy HH:mm:ss`
    pub fn wire_end(&self) -> String {
        format_wire_date(&self.end)
    }
}

/// Format a timestamp with [`WIRE_DATE_FORMAT`]
pub fn format_wire_date(value: &NaiveDateTime) -> String {
    value.format(WIRE_DATE_FORMAT).to_string()
}

/// One `<MAILING>` filter entry; each id is emitted only when present
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingReportId {
    /// Mailing identifier (`<MAILING_ID>`)
    #[serde(default)]
    pub mailing_id: Option<i64>,
    /// Report identifier (`<REPORT_ID>`)
    #[serde(default)]
    pub report_id: Option<i64>,
}

impl MailingReportId {
    /// Entry with both ids set
    pub fn new(mailing_id: i64, report_id: i64) -> Self {
        Self {
            mailing_id: Some(mailing_id),
            report_id: Some(report_id),
        }
    }
}
