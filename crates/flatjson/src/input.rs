//! Mutable views over the document bytes.

use alloc::string::String;
use alloc::vec::Vec;

/// The UTF-8 byte range a document is parsed from.
///
/// The string decoder resolves escape sequences in place, overwriting the
/// escaped form with the decoded bytes, so the parser needs mutable access
/// for the duration of the parse. An input either borrows a caller-owned
/// buffer (the rewrites stay visible to the caller once the document is
/// dropped) or owns a copy made at construction. Bytes outside string
/// literals are never touched.
#[derive(Debug)]
pub struct MutableInput<'a> {
    bytes: Bytes<'a>,
}

#[derive(Debug)]
enum Bytes<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl MutableInput<'_> {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match &self.bytes {
            Bytes::Owned(v) => v,
            Bytes::Borrowed(b) => b,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.bytes {
            Bytes::Owned(v) => v,
            Bytes::Borrowed(b) => b,
        }
    }
}

impl From<&str> for MutableInput<'_> {
    /// Copies the text; the caller's string is left untouched.
    fn from(text: &str) -> Self {
        MutableInput {
            bytes: Bytes::Owned(text.as_bytes().to_vec()),
        }
    }
}

impl From<String> for MutableInput<'_> {
    fn from(text: String) -> Self {
        MutableInput {
            bytes: Bytes::Owned(text.into_bytes()),
        }
    }
}

impl From<&[u8]> for MutableInput<'_> {
    /// Copies the bytes; the caller's slice is left untouched.
    fn from(bytes: &[u8]) -> Self {
        MutableInput {
            bytes: Bytes::Owned(bytes.to_vec()),
        }
    }
}

impl From<Vec<u8>> for MutableInput<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        MutableInput {
            bytes: Bytes::Owned(bytes),
        }
    }
}

impl<'a> From<&'a mut [u8]> for MutableInput<'a> {
    /// Borrows the caller's buffer; decoded strings are written back into it.
    fn from(bytes: &'a mut [u8]) -> Self {
        MutableInput {
            bytes: Bytes::Borrowed(bytes),
        }
    }
}
