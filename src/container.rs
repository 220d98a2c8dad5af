use crate::error::ConvertError;
use epub::doc::EpubDoc;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One (X)HTML document from the book, in reading order.
#[derive(Debug, Clone)]
pub struct DocumentItem {
    pub id: Option<String>,
    pub markup: String,
}

/// Lazily walks the spine of an EPUB, yielding only document items.
pub struct DocumentItems {
    doc: EpubDoc<BufReader<File>>,
    exhausted: bool,
}

impl DocumentItems {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let doc = EpubDoc::new(path).map_err(|e| ConvertError::ContainerRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Opened {} ({} spine entries)", path.display(), doc.get_num_pages());

        Ok(Self {
            doc,
            exhausted: false,
        })
    }
}

impl Iterator for DocumentItems {
    type Item = DocumentItem;

    fn next(&mut self) -> Option<DocumentItem> {
        while !self.exhausted {
            let id = self.doc.get_current_id();
            let current = self.doc.get_current_str();
            if !self.doc.go_next() {
                self.exhausted = true;
            }

            match current {
                Some((markup, mime)) if is_document_mime(&mime) => {
                    return Some(DocumentItem { id, markup });
                }
                Some((_, mime)) => debug!("Skipping {id:?} with media type {mime}"),
                None => debug!("Skipping unreadable spine entry {id:?}"),
            }
        }
        None
    }
}

fn is_document_mime(mime: &str) -> bool {
    matches!(
        mime.to_ascii_lowercase().as_str(),
        "application/xhtml+xml" | "text/html" | "application/xml" | "text/xml"
    )
}
