//! Page size extraction from PDF files using lopdf

use std::path::Path;
use lopdf::{Document, Object, ObjectId};
use crate::classify::Geometry;
use crate::error::{Error, Result};
use crate::source::GeometrySource;

/// Guard against cyclic or absurdly deep page trees
const MAX_TREE_DEPTH: usize = 64;

/// A loaded PDF whose pages can be measured one at a time
pub struct PdfSource {
    doc: Document,
    /// Page object IDs in document order
    pages: Vec<ObjectId>,
}

impl PdfSource {
    /// Load a PDF file from disk
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already parsed document
    pub fn from_document(doc: Document) -> Self {
        // get_pages() is keyed by page number, so values come out in order
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }
}

impl GeometrySource for PdfSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_geometry(&self, page_index: usize) -> Result<Geometry> {
        let page_id = page_index
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .copied()
            .ok_or_else(|| Error::SourceAcquisition {
                page: page_index,
                reason: format!("page out of range (document has {} pages)", self.pages.len()),
            })?;

        let media_box = find_media_box(&self.doc, page_id).map_err(|reason| {
            Error::SourceAcquisition {
                page: page_index,
                reason,
            }
        })?;

        Ok(Geometry::new(
            (media_box[2] - media_box[0]).abs(),
            (media_box[3] - media_box[1]).abs(),
        ))
    }
}

/// Get the MediaBox for a page, inheriting from ancestors in the page tree
fn find_media_box(doc: &Document, page_id: ObjectId) -> std::result::Result<[f64; 4], String> {
    let mut current = page_id;

    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc
            .get_dictionary(current)
            .map_err(|e| format!("object {:?} is not a dictionary: {}", current, e))?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            return parse_box_array(doc, media_box);
        }

        match dict.get(b"Parent").and_then(|parent| parent.as_reference()) {
            Ok(parent_id) => current = parent_id,
            Err(_) => return Err("no MediaBox on page or its ancestors".to_string()),
        }
    }

    Err("page tree is too deep or cyclic".to_string())
}

/// Parse a rectangle [x1, y1, x2, y2], following indirect references
fn parse_box_array(doc: &Document, object: &Object) -> std::result::Result<[f64; 4], String> {
    let array = resolve(doc, object)?
        .as_array()
        .map_err(|_| "MediaBox is not an array".to_string())?;

    if array.len() != 4 {
        return Err(format!("MediaBox must have 4 elements, found {}", array.len()));
    }

    let mut rect = [0.0; 4];
    for (i, element) in array.iter().enumerate() {
        rect[i] = match resolve(doc, element)? {
            Object::Integer(n) => *n as f64,
            Object::Real(n) => *n as f64,
            _ => return Err(format!("MediaBox element {} is not a number", i)),
        };
    }

    Ok(rect)
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> std::result::Result<&'a Object, String> {
    match object {
        Object::Reference(id) => doc
            .get_object(*id)
            .map_err(|e| format!("broken reference {:?}: {}", id, e)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Dictionary};

    /// Build a document whose Pages node carries `inherited` and whose
    /// pages carry the given boxes (None = inherit)
    fn document(inherited: Option<Vec<Object>>, boxes: Vec<Option<Vec<Object>>>) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for media_box in boxes {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            };
            if let Some(media_box) = media_box {
                page.set("MediaBox", media_box);
            }
            kids.push(Object::Reference(doc.add_object(page)));
        }

        let mut pages: Dictionary = dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(kids.len() as i64),
            "Kids" => kids,
        };
        if let Some(media_box) = inherited {
            pages.set("MediaBox", media_box);
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn rect(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<Object> {
        vec![Object::Real(x1), Object::Real(y1), Object::Real(x2), Object::Real(y2)]
    }

    #[test]
    fn test_reads_pages_in_order() {
        let doc = document(
            None,
            vec![
                Some(rect(0.0, 0.0, 595.0, 842.0)),
                Some(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(792),
                    Object::Integer(612),
                ]),
            ],
        );
        let source = PdfSource::from_document(doc);

        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page_geometry(1).unwrap(), Geometry::new(595.0, 842.0));
        assert_eq!(source.page_geometry(2).unwrap(), Geometry::new(792.0, 612.0));
    }

    #[test]
    fn test_inherits_media_box_from_parent() {
        let doc = document(Some(rect(0.0, 0.0, 612.0, 792.0)), vec![None, None]);
        let source = PdfSource::from_document(doc);

        assert_eq!(source.page_geometry(2).unwrap(), Geometry::new(612.0, 792.0));
    }

    #[test]
    fn test_offset_and_flipped_boxes() {
        let doc = document(None, vec![Some(rect(100.0, 842.0, 695.0, 0.0))]);
        let source = PdfSource::from_document(doc);

        assert_eq!(source.page_geometry(1).unwrap(), Geometry::new(595.0, 842.0));
    }

    #[test]
    fn test_missing_media_box() {
        let doc = document(None, vec![None]);
        let source = PdfSource::from_document(doc);

        assert!(matches!(
            source.page_geometry(1),
            Err(Error::SourceAcquisition { page: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_media_box() {
        let doc = document(
            None,
            vec![Some(vec![Object::Integer(0), Object::Integer(0), Object::Integer(10)])],
        );
        let source = PdfSource::from_document(doc);

        assert!(source.page_geometry(1).is_err());
    }

    #[test]
    fn test_open_nonexistent_file() {
        let result = PdfSource::open(Path::new("nonexistent.pdf"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
