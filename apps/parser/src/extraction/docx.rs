use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractionResult;

const DOCUMENT_PART: &str = "word/document.xml";

/// Non-empty paragraph texts from the main document part, joined by newlines.
pub(super) fn extract(path: &Path) -> ExtractionResult<String> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    Ok(paragraphs(&xml)?.join("\n"))
}

/// Collects the text of every `w:p` element in document order.
///
/// Paragraphs can nest (text boxes inside a paragraph), so open paragraphs are kept on a
/// stack and each one is emitted when its own end tag closes.
fn paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<String> = Vec::new();
    let mut done = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(current) = open.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => current.push('\t'),
                        b"w:br" | b"w:cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) if in_text_run => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) if in_text_run => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if let Some(text) = open.pop() {
                        if !text.is_empty() {
                            done.push(text);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
    <w:p></w:p>
    <w:p><w:r><w:t>jane&amp;co@example.com</w:t></w:r></w:p>
    <w:p><w:r><w:t>Name</w:t><w:tab/><w:t>Value</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Rust</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
  </w:body>
</w:document>"#;

    fn write_docx(document_xml: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut zip = zip::ZipWriter::new(file.reopen().unwrap());
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
        file
    }

    #[test]
    fn test_paragraphs_skip_empty_and_join_runs() {
        let paras = paragraphs(BODY).unwrap();
        assert_eq!(
            paras,
            vec!["Jane Doe", "jane&co@example.com", "Name\tValue", "Rust"]
        );
    }

    #[test]
    fn test_whitespace_between_tags_is_ignored() {
        let xml = "<w:p>\n  <w:r>\n    <w:t>Hello</w:t>\n  </w:r>\n</w:p>";
        assert_eq!(paragraphs(xml).unwrap(), vec!["Hello"]);
    }

    #[test]
    fn test_extract_reads_document_part_from_archive() {
        let file = write_docx(BODY);
        let text = extract(file.path()).unwrap();
        assert_eq!(text, "Jane Doe\njane&co@example.com\nName\tValue\nRust");
    }

    #[test]
    fn test_archive_without_document_part_is_an_error() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut zip = zip::ZipWriter::new(file.reopen().unwrap());
        zip.start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        assert!(extract(file.path()).is_err());
    }
}
