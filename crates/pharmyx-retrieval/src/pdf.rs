//! lopdf-based text extraction for regulatory label PDFs.
//!
//! The bulário serves scanned-and-OCRed as well as born-digital PDFs; both
//! carry a text layer this module can read. Page texts are joined with a
//! single newline, matching how the rest of the system expects label text
//! to look.

use std::path::Path;

use lopdf::Document;
use tracing::warn;

use pharmyx_common::{PharmyxError, Result};

/// Extract text from every page of a PDF file, joined by newlines.
/// Pages that fail to decode contribute an empty line instead of aborting
/// the whole document.
pub fn extract_pdf_text(pdf_path: &Path) -> Result<String> {
    let doc = Document::load(pdf_path).map_err(|e| PharmyxError::Pdf(e.to_string()))?;
    Ok(extract_all_pages(&doc))
}

/// Same as [`extract_pdf_text`] but over an in-memory buffer.
pub fn extract_pdf_text_from_bytes(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes).map_err(|e| PharmyxError::Pdf(e.to_string()))?;
    Ok(extract_all_pages(&doc))
}

fn extract_all_pages(doc: &Document) -> String {
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut page_texts: Vec<String> = Vec::with_capacity(page_numbers.len());

    for page in page_numbers {
        match doc.extract_text(&[page]) {
            Ok(text) => page_texts.push(text.trim_end().to_string()),
            Err(e) => {
                warn!(page, "Page text extraction failed: {}", e);
                page_texts.push(String::new());
            }
        }
    }

    page_texts.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Builds a one-page PDF whose content stream shows `text`.
    fn build_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_extract_text_single_page() {
        let bytes = build_pdf("Bula do medicamento dipirona");
        let texto = extract_pdf_text_from_bytes(&bytes).unwrap();
        assert!(texto.contains("Bula do medicamento dipirona"));
    }

    #[test]
    fn test_extract_text_from_file() {
        let bytes = build_pdf("Conteudo via arquivo");
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut tmp, &bytes).unwrap();
        let texto = extract_pdf_text(tmp.path()).unwrap();
        assert!(texto.contains("Conteudo via arquivo"));
    }

    #[test]
    fn test_garbage_bytes_error() {
        assert!(extract_pdf_text_from_bytes(b"not a pdf at all").is_err());
    }
}
