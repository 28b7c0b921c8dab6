//! Request builder for the RawRecipientDataExport envelope
//!
//! The remote API is sensitive to sibling order, so the builder walks the
//! options in one fixed sequence and emits an element only when the caller
//! set the corresponding field. The few elements the API always expects
//! (format, encoding and the umbrella switches) fall back to their defaults.
//!
//! ## Usage
//!
//! ```
//! use wca_export::{RawRecipientDataExportOptions, RequestBuilder};
//!
//! let options = RawRecipientDataExportOptions::default().with_campaign_id(2);
//! let request = RequestBuilder::new().build_request(&options)?;
//!
//! assert!(request.as_str().contains("<CAMPAIGN_ID>2</CAMPAIGN_ID>"));
//! # Ok::<(), wca_export::Error>(())
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::config::RequestConfig;
use crate::error::{Error, Result};
use crate::options::RawRecipientDataExportOptions;
use crate::types::DateTimeRange;

/// Name of the operation element under `<Body>`
pub const OPERATION: &str = "RawRecipientDataExport";

/// Serialized request document, ready for transmission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlRequest {
    xml: String,
}

impl XmlRequest {
    /// The document as UTF-8 text
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Consume the request and return the document text
    pub fn into_string(self) -> String {
        self.xml
    }
}

impl AsRef<str> for XmlRequest {
    fn as_ref(&self) -> &str {
        &self.xml
    }
}

impl std::fmt::Display for XmlRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.xml)
    }
}

/// Builds `<Envelope><Body><RawRecipientDataExport>` documents
///
/// Holds only serialization settings; one builder can serve any number of
/// independent option sets, including concurrently.
#[derive(Clone, Debug, Default)]
pub struct RequestBuilder {
    config: RequestConfig,
}

impl RequestBuilder {
    /// Builder with default serialization settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit serialization settings
    pub fn with_config(config: RequestConfig) -> Self {
        Self { config }
    }

    /// Build a request, rejecting absent options
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `options` is `None`; no partial
    /// document is produced.
    pub fn build(&self, options: Option<&RawRecipientDataExportOptions>) -> Result<XmlRequest> {
        let options = options.ok_or_else(|| {
            Error::InvalidArgument("raw recipient data export options are required".to_string())
        })?;
        self.build_request(options)
    }

    /// Build a request from the given options
    ///
    /// Values are passed through without range checks.
    pub fn build_request(&self, options: &RawRecipientDataExportOptions) -> Result<XmlRequest> {
        let mut doc = DocumentWriter::new(&self.config);

        if self.config.xml_declaration {
            doc.declaration()?;
        }
        doc.open("Envelope")?;
        doc.open("Body")?;
        doc.open(OPERATION)?;
        write_export_body(&mut doc, options)?;
        doc.close(OPERATION)?;
        doc.close("Body")?;
        doc.close("Envelope")?;

        let elements = doc.elements;
        let xml = doc.finish()?;
        debug!(elements, bytes = xml.len(), "built {} request", OPERATION);
        Ok(XmlRequest { xml })
    }
}

fn write_export_body(doc: &mut DocumentWriter, options: &RawRecipientDataExportOptions) -> Result<()> {
    if let Some(pairs) = &options.mailing_report_ids {
        for pair in pairs {
            doc.open("MAILING")?;
            if let Some(mailing_id) = pair.mailing_id {
                doc.text_element("MAILING_ID", &mailing_id.to_string())?;
            }
            if let Some(report_id) = pair.report_id {
                doc.text_element("REPORT_ID", &report_id.to_string())?;
            }
            doc.close("MAILING")?;
        }
    }

    if let Some(campaign_id) = options.campaign_id {
        doc.text_element("CAMPAIGN_ID", &campaign_id.to_string())?;
    }

    if let Some(list_id) = options.list_id {
        doc.text_element("LIST_ID", &list_id.to_string())?;
        if options.include_children == Some(true) {
            doc.marker("INCLUDE_CHILDREN")?;
        }
    }

    if let Some(range) = &options.event_range {
        doc.range("EVENT_DATE_START", "EVENT_DATE_END", range)?;
    }
    if let Some(range) = &options.send_range {
        doc.range("SEND_DATE_START", "SEND_DATE_END", range)?;
    }

    doc.text_element(
        "EXPORT_FORMAT",
        options.export_format.unwrap_or_default().wire_token(),
    )?;

    if options.return_from_address {
        doc.marker("RETURN_FROM_ADDRESS")?;
    }
    if options.return_from_name {
        doc.marker("RETURN_FROM_NAME")?;
    }

    doc.text_element(
        "FILE_ENCODING",
        options.file_encoding.unwrap_or_default().wire_token(),
    )?;

    if let Some(name) = options.export_file_name.as_deref().filter(|n| !n.is_empty()) {
        doc.text_element("EXPORT_FILE_NAME", name)?;
    }

    if options.move_to_ftp() {
        doc.marker("MOVE_TO_FTP")?;
    }

    if options.include_sent_mailings() {
        doc.marker("SENT_MAILINGS")?;
    }
    for name in options.mailing_types.enabled_elements() {
        doc.marker(name)?;
    }

    if options.include_all_event_types() {
        doc.marker("ALL_EVENT_TYPES")?;
    }

    if let Some(columns) = options.columns.as_ref().filter(|c| !c.is_empty()) {
        doc.open("COLUMNS")?;
        for column in columns {
            doc.open("COLUMN")?;
            doc.text_element("NAME", column)?;
            doc.close("COLUMN")?;
        }
        doc.close("COLUMNS")?;
    }

    if let Some(name) = options.visibility.element_name() {
        doc.text_element(name, "TRUE")?;
    }

    if options.all_non_exported {
        doc.marker("ALL_NON_EXPORTED")?;
    }

    Ok(())
}

/// Thin event-level wrapper around the quick-xml writer
struct DocumentWriter {
    writer: Writer<Vec<u8>>,
    elements: usize,
}

impl DocumentWriter {
    fn new(config: &RequestConfig) -> Self {
        let writer = match config.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };
        Self {
            writer,
            elements: 0,
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }

    fn declaration(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))
    }

    fn open(&mut self, name: &str) -> Result<()> {
        self.elements += 1;
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn marker(&mut self, name: &str) -> Result<()> {
        self.elements += 1;
        self.write(Event::Empty(BytesStart::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.open(name)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn range(&mut self, start: &str, end: &str, range: &DateTimeRange) -> Result<()> {
        self.text_element(start, &range.wire_start())?;
        self.text_element(end, &range.wire_end())
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
    }
}
