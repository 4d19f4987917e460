/*!
 * Word document export.
 *
 * Writes the smallest WordprocessingML package Word and LibreOffice
 * accept: content types, the package relationship and `word/document.xml`
 * with one paragraph per line of text.
 */

use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::errors::ExportError;
use crate::text::escape_html;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_FOOTER: &str = "</w:body></w:document>";

/// Lines that become paragraphs; empty text is a single empty paragraph
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Body of `word/document.xml`
pub fn document_xml(text: &str) -> String {
    let mut xml = String::from(DOCUMENT_HEADER);
    for paragraph in paragraphs(text) {
        if paragraph.is_empty() {
            xml.push_str("<w:p/>");
        } else {
            xml.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
            xml.push_str(&escape_html(paragraph));
            xml.push_str("</w:t></w:r></w:p>");
        }
    }
    xml.push_str(DOCUMENT_FOOTER);
    xml
}

/// Package `text` as a .docx file
pub fn render_docx(text: &str) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        ("word/document.xml", document_xml(text)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)
            .map_err(|e| ExportError::Document(format!("{}: {}", name, e)))?;
        zip.write_all(body.as_bytes())?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ExportError::Document(e.to_string()))?;
    Ok(cursor.into_inner())
}
