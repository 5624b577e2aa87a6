//! Binary parts uploaded with a request.

use bytes::Bytes;
use std::io::Cursor;

/// A named binary upload carried in a request.
///
/// The content is reference counted, so cloning a part or opening several
/// streams over it never copies the payload.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use wsapi_core::Part;
///
/// let part = Part::new("<xml/>", "report.xml");
///
/// let mut content = String::new();
/// part.input_stream().read_to_string(&mut content).unwrap();
/// assert_eq!(content, "<xml/>");
/// assert_eq!(part.file_name(), "report.xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    content: Bytes,
    file_name: String,
}

impl Part {
    /// Creates a part from its content and file name.
    #[must_use]
    pub fn new(content: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
        }
    }

    /// Returns a fresh stream positioned at the start of the content.
    #[must_use]
    pub fn input_stream(&self) -> Cursor<Bytes> {
        Cursor::new(self.content.clone())
    }

    /// Returns the raw content.
    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Returns the file name sent by the client.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the part has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
