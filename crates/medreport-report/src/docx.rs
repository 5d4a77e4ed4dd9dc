//! Minimal WordprocessingML package: one Title heading and one body paragraph.
//!
//! The report text goes into a single run. Every `\n` and every `\r` becomes a
//! `<w:br/>` and tabs become `<w:tab/>`. Characters XML 1.0 cannot carry are an
//! error rather than being dropped. Markdown in the report is not interpreted.

use std::io::{Cursor, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const REPORT_HEADING: &str = "Comprehensive Healthcare Report";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = concat!(
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"</Relationships>"#,
);

const DOCUMENT_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#,
);

const STYLES: &str = concat!(
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="300"/></w:pPr>"#,
    r#"<w:rPr><w:color w:val="17365D"/><w:sz w:val="52"/></w:rPr></w:style>"#,
    r#"</w:styles>"#,
);

const SECTION_PROPERTIES: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
    r#"<w:pgMar w:top="1440" w:right="1800" w:bottom="1440" w:left="1800" w:header="720" w:footer="720" w:gutter="0"/>"#,
    r#"</w:sectPr>"#,
);

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("report text contains a character not allowed in a document: {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },
}

/// A finished `.docx` byte stream. Immutable once built.
#[derive(Debug, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn build(report: &str) -> Result<Self, ArtifactError> {
        Self::build_at(report, Utc::now())
    }

    /// Build with an explicit creation timestamp for the core properties part.
    pub fn build_at(report: &str, created: DateTime<Utc>) -> Result<Self, ArtifactError> {
        let parts = [
            ("[Content_Types].xml", with_decl(CONTENT_TYPES)),
            ("_rels/.rels", with_decl(PACKAGE_RELS)),
            ("docProps/core.xml", core_properties(created)),
            ("word/_rels/document.xml.rels", with_decl(DOCUMENT_RELS)),
            ("word/styles.xml", with_decl(STYLES)),
            ("word/document.xml", document_xml(report)?),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, body) in parts {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
        }
        let bytes = zip.finish()?.into_inner();
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn with_decl(body: &str) -> String {
    format!("{XML_DECL}\n{body}")
}

fn core_properties(created: DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        "{XML_DECL}\n<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{REPORT_HEADING}</dc:title>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
         <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>\
         </cp:coreProperties>"
    )
}

fn document_xml(report: &str) -> Result<String, ArtifactError> {
    let mut xml = String::with_capacity(report.len() + 1024);
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!("<w:document xmlns:w=\"{W_NS}\"><w:body>"));
    xml.push_str("<w:p><w:pPr><w:pStyle w:val=\"Title\"/></w:pPr><w:r>");
    push_run_content(&mut xml, REPORT_HEADING)?;
    xml.push_str("</w:r></w:p>");
    xml.push_str("<w:p><w:r>");
    push_run_content(&mut xml, report)?;
    xml.push_str("</w:r></w:p>");
    xml.push_str(SECTION_PROPERTIES);
    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

/// Write `text` as run content: `<w:t>` segments separated by breaks and tabs.
fn push_run_content(xml: &mut String, text: &str) -> Result<(), ArtifactError> {
    let mut segment = String::new();
    for (offset, ch) in text.char_indices() {
        match ch {
            '\r' | '\n' => {
                flush_text(xml, &mut segment);
                xml.push_str("<w:br/>");
            }
            '\t' => {
                flush_text(xml, &mut segment);
                xml.push_str("<w:tab/>");
            }
            '&' => segment.push_str("&amp;"),
            '<' => segment.push_str("&lt;"),
            '>' => segment.push_str("&gt;"),
            '"' => segment.push_str("&quot;"),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {
                return Err(ArtifactError::InvalidCharacter { ch: c, offset });
            }
            c => segment.push(c),
        }
    }
    flush_text(xml, &mut segment);
    Ok(())
}

fn flush_text(xml: &mut String, segment: &mut String) {
    if segment.is_empty() {
        return;
    }
    xml.push_str("<w:t xml:space=\"preserve\">");
    xml.push_str(segment);
    xml.push_str("</w:t>");
    segment.clear();
}
