//! PDF text extraction.
//!
//! Pages are decoded one at a time with `lopdf` and concatenated in page order
//! with no separator. A page that fails to decode contributes nothing and is
//! logged; the rest of the document still comes through. If `lopdf` cannot
//! load the file at all, `pdf-extract` gets one attempt at the whole document.

use tracing::{debug, warn};

use crate::extraction::{ExtractionError, TextExtractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        match lopdf::Document::load_mem(bytes) {
            Ok(document) => Ok(extract_pages(&document)),
            Err(primary) => {
                warn!("lopdf could not load PDF ({primary}), trying pdf-extract");
                pdf_extract::extract_text_from_mem(bytes).map_err(|fallback| {
                    ExtractionError::Malformed {
                        primary: primary.to_string(),
                        fallback: fallback.to_string(),
                    }
                })
            }
        }
    }
}

fn extract_pages(document: &lopdf::Document) -> String {
    let pages = document.get_pages();
    let mut text = String::new();

    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!(page = page_number, "Skipping undecodable page: {e}"),
        }
    }

    debug!(pages = pages.len(), chars = text.len(), "Extracted PDF text");
    text
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a minimal PDF with one Courier text line per page.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        build_pdf_with_broken_page(pages, None)
    }

    /// Like `build_pdf`, but page `broken` (0-based) points its `Contents`
    /// at an object that does not exist.
    fn build_pdf_with_broken_page(pages: &[&str], broken: Option<usize>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for (index, line) in pages.iter().enumerate() {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = if broken == Some(index) {
                (doc.max_id + 1000, 0)
            } else {
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
            };
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

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
    fn test_extracts_single_page() {
        let pdf = build_pdf(&["Experienced Python developer"]);
        let text = PdfTextExtractor.extract(&pdf).unwrap();
        assert!(text.contains("Experienced Python developer"), "got {text:?}");
    }

    #[test]
    fn test_concatenates_pages_in_order() {
        let pdf = build_pdf(&["Tableau dashboards", "Power BI reports"]);
        let text = PdfTextExtractor.extract(&pdf).unwrap();
        let first = text.find("Tableau").expect("first page text");
        let second = text.find("Power BI").expect("second page text");
        assert!(first < second);
    }

    #[test]
    fn test_skips_undecodable_page() {
        let pdf = build_pdf_with_broken_page(&["Alpha page", "Beta page", "Gamma page"], Some(1));
        let text = PdfTextExtractor.extract(&pdf).unwrap();
        assert!(text.contains("Alpha page"), "got {text:?}");
        assert!(text.contains("Gamma page"), "got {text:?}");
        assert!(!text.contains("Beta page"), "got {text:?}");
        assert!(text.find("Alpha").unwrap() < text.find("Gamma").unwrap());
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfTextExtractor.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed { .. }));
    }
}
