//! Read-only navigation over a parsed document.
//!
//! A [`Document`] owns the input view and the installed AST words; every
//! [`Value`], [`Array`], and [`Object`] is a copyable view borrowing from
//! it. Nothing here mutates: once installed, an AST is immutable, and
//! concurrent readers of one document need no synchronization.

use alloc::string::{String, ToString};

use crate::arena::AstWords;
use crate::ast::{self, key_order, ValueKind, Word};
use crate::error::{ErrorCode, ParseError};
use crate::input::MutableInput;
use crate::number;

/// A parse result: either a navigable AST or the first error encountered.
#[derive(Debug)]
pub struct Document<'a> {
    input: MutableInput<'a>,
    words: AstWords<'a>,
    state: DocumentState,
}

#[derive(Debug)]
enum DocumentState {
    Uninitialized,
    Valid { root: Word },
    Failed(ParseError),
}

impl Default for Document<'_> {
    /// A default-constructed document is invalid and reports
    /// `"uninitialized document"`.
    fn default() -> Self {
        Document {
            input: MutableInput::from(""),
            words: AstWords::empty(),
            state: DocumentState::Uninitialized,
        }
    }
}

impl<'a> Document<'a> {
    pub(crate) fn valid(input: MutableInput<'a>, words: AstWords<'a>, root: Word) -> Self {
        Document {
            input,
            words,
            state: DocumentState::Valid { root },
        }
    }

    pub(crate) fn failed(input: MutableInput<'a>, error: ParseError) -> Self {
        Document {
            input,
            words: AstWords::empty(),
            state: DocumentState::Failed(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, DocumentState::Valid { .. })
    }

    /// The root value. `None` unless the document is valid; the root is
    /// always an array or an object.
    pub fn root(&self) -> Option<Value<'_>> {
        match self.state {
            DocumentState::Valid { root } => Some(Value {
                word: root,
                words: self.words.as_slice(),
                input: self.input.as_slice(),
            }),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        match &self.state {
            DocumentState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// The recorded error code; [`ErrorCode::NoError`] for a valid (or
    /// merely uninitialized) document.
    pub fn error_code(&self) -> ErrorCode {
        self.error().map_or(ErrorCode::NoError, |e| e.code)
    }

    /// 1-based line of the error, 0 when there is none.
    pub fn error_line(&self) -> usize {
        self.error().map_or(0, |e| e.line)
    }

    /// 1-based byte column of the error, 0 when there is none.
    pub fn error_column(&self) -> usize {
        self.error().map_or(0, |e| e.column)
    }

    /// The error message without position information.
    pub fn error_message(&self) -> String {
        match &self.state {
            DocumentState::Uninitialized => "uninitialized document".into(),
            DocumentState::Valid { .. } => ErrorCode::NoError.to_string(),
            DocumentState::Failed(error) => error.code.to_string(),
        }
    }

    /// The AST word buffer, mainly for layout inspection.
    ///
    /// Under the shared-buffer strategies ([`AllocationStrategy::Single`]
    /// and [`AllocationStrategy::Bounded`]) this is the whole buffer:
    /// word 0 holds the root tagged word, the scratch span is zeroed, and
    /// the tree sits at the high end. Under
    /// [`AllocationStrategy::Dynamic`] it contains the live tree only.
    ///
    /// [`AllocationStrategy::Single`]: crate::AllocationStrategy::Single
    /// [`AllocationStrategy::Bounded`]: crate::AllocationStrategy::Bounded
    /// [`AllocationStrategy::Dynamic`]: crate::AllocationStrategy::Dynamic
    pub fn ast_words(&self) -> &[Word] {
        self.words.as_slice()
    }
}

/// One node of a parsed document.
///
/// Values are cheap copies of a tagged word plus the document's buffers;
/// they never own anything and cannot outlive their document.
#[derive(Debug, Clone, Copy)]
pub struct Value<'a> {
    word: Word,
    words: &'a [Word],
    input: &'a [u8],
}

impl Default for Value<'_> {
    /// The default value is `null`.
    fn default() -> Self {
        Value {
            word: ast::make_word(ValueKind::Null, 0),
            words: &[],
            input: &[],
        }
    }
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> ValueKind {
        ast::word_kind(self.word)
    }

    fn payload(&self) -> usize {
        ast::word_payload(self.word) as usize
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind(), ValueKind::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind(), ValueKind::False | ValueKind::True)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind(), ValueKind::Integer)
    }

    pub fn is_double(&self) -> bool {
        matches!(self.kind(), ValueKind::Double)
    }

    /// True for both numeric kinds.
    pub fn is_number(&self) -> bool {
        matches!(self.kind(), ValueKind::Integer | ValueKind::Double)
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind(), ValueKind::String)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind(), ValueKind::Array)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind(), ValueKind::Object)
    }

    /// Element count for containers, decoded byte length for strings,
    /// zero for everything else.
    pub fn length(&self) -> usize {
        match self.kind() {
            ValueKind::Array | ValueKind::Object => self.words[self.payload()] as usize,
            ValueKind::String => {
                let (start, end) = self.string_range();
                end - start
            }
            _ => 0,
        }
    }

    pub fn boolean_value(&self) -> Option<bool> {
        match self.kind() {
            ValueKind::True => Some(true),
            ValueKind::False => Some(false),
            _ => None,
        }
    }

    pub fn integer_value(&self) -> Option<i32> {
        match self.kind() {
            ValueKind::Integer => Some(ast::integer_value(self.word, self.words)),
            _ => None,
        }
    }

    pub fn double_value(&self) -> Option<f64> {
        match self.kind() {
            ValueKind::Double => {
                let at = self.payload();
                Some(ast::double_value(self.words[at], self.words[at + 1]))
            }
            _ => None,
        }
    }

    /// Both numeric kinds as binary64. Integers widen exactly (every
    /// 32-bit integer is representable), so comparing against integer
    /// literals through this accessor is lossless.
    pub fn number_value(&self) -> Option<f64> {
        match self.kind() {
            ValueKind::Integer => Some(f64::from(ast::integer_value(self.word, self.words))),
            ValueKind::Double => self.double_value(),
            _ => None,
        }
    }

    /// The value as an exact integer, if it is numeric and integral within
    /// `[-2^53, 2^53]`. A `10.0` double qualifies; `10.5` does not.
    pub fn int53_value(&self) -> Option<i64> {
        match self.kind() {
            ValueKind::Integer => Some(i64::from(ast::integer_value(self.word, self.words))),
            ValueKind::Double => self.double_value().and_then(number::int53_from_double),
            _ => None,
        }
    }

    /// The decoded string contents, straight out of the input view.
    pub fn as_str(&self) -> Option<&'a str> {
        match self.kind() {
            ValueKind::String => {
                let (start, end) = self.string_range();
                let bytes = &self.input[start..end];
                // SAFETY: the decoder validated this range and rewrote it
                // as UTF-8 during parsing; it has been immutable since.
                Some(unsafe { core::str::from_utf8_unchecked(bytes) })
            }
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Array<'a>> {
        match self.kind() {
            ValueKind::Array => Some(Array { value: *self }),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<Object<'a>> {
        match self.kind() {
            ValueKind::Object => Some(Object { value: *self }),
            _ => None,
        }
    }

    fn string_range(&self) -> (usize, usize) {
        let at = self.payload();
        (self.words[at] as usize, self.words[at + 1] as usize)
    }

    fn with_word(&self, word: Word) -> Value<'a> {
        Value {
            word,
            words: self.words,
            input: self.input,
        }
    }
}

/// A typed view over an array value. Elements keep source order.
#[derive(Debug, Clone, Copy)]
pub struct Array<'a> {
    value: Value<'a>,
}

impl<'a> Array<'a> {
    pub fn len(&self) -> usize {
        self.value.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        if index < self.len() {
            let at = self.value.payload() + 1 + index;
            Some(self.value.with_word(self.value.words[at]))
        } else {
            None
        }
    }

    pub fn iter(&self) -> ArrayIter<'a> {
        ArrayIter {
            array: *self,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for Array<'a> {
    type Item = Value<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Array<'a> {
    type Item = Value<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}

/// Iterator over array elements in source order.
#[derive(Debug, Clone)]
pub struct ArrayIter<'a> {
    array: Array<'a>,
    index: usize,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Value<'a>> {
        let value = self.array.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}

/// A typed view over an object value.
///
/// Entries are indexed in the key index's sorted order (key length
/// ascending, then key bytes ascending), which is also what the binary
/// search in [`Object::find_key`] relies on. Duplicate keys are preserved
/// and keep their source order relative to each other.
#[derive(Debug, Clone, Copy)]
pub struct Object<'a> {
    value: Value<'a>,
}

impl<'a> Object<'a> {
    pub fn len(&self) -> usize {
        self.value.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The key at sorted index `index`.
    pub fn key(&self, index: usize) -> Option<&'a str> {
        if index < self.len() {
            let bytes = self.key_bytes(index);
            // SAFETY: keys pass through the same in-place decoder as every
            // other string; the range is valid UTF-8.
            Some(unsafe { core::str::from_utf8_unchecked(bytes) })
        } else {
            None
        }
    }

    /// The value at sorted index `index`.
    pub fn value(&self, index: usize) -> Option<Value<'a>> {
        if index < self.len() {
            let at = self.value.payload() + 1 + 3 * index;
            Some(self.value.with_word(self.value.words[at + 2]))
        } else {
            None
        }
    }

    /// Binary-searches the key index. Returns the index of a matching
    /// entry (which duplicate is unspecified) or `len()` when the key is
    /// absent, so the result is always in `0..=len()`.
    pub fn find_key(&self, key: &str) -> usize {
        let length = self.len();
        let (mut low, mut high) = (0, length);
        while low < high {
            let mid = low + (high - low) / 2;
            match key_order(self.key_bytes(mid), key.as_bytes()) {
                core::cmp::Ordering::Less => low = mid + 1,
                core::cmp::Ordering::Greater => high = mid,
                core::cmp::Ordering::Equal => return mid,
            }
        }
        length
    }

    /// The value under `key`, or a synthetic `null` value when absent;
    /// a missing key is not an error.
    pub fn value_of_key(&self, key: &str) -> Value<'a> {
        match self.get(key) {
            Some(value) => value,
            None => self.value.with_word(ast::make_word(ValueKind::Null, 0)),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value<'a>> {
        let index = self.find_key(key);
        self.value(index)
    }

    /// Iterates `(key, value)` pairs in sorted index order.
    pub fn iter(&self) -> ObjectIter<'a> {
        ObjectIter {
            object: *self,
            index: 0,
        }
    }

    fn key_bytes(&self, index: usize) -> &'a [u8] {
        let at = self.value.payload() + 1 + 3 * index;
        let start = self.value.words[at] as usize;
        let end = self.value.words[at + 1] as usize;
        &self.value.input[start..end]
    }
}

impl<'a> IntoIterator for Object<'a> {
    type Item = (&'a str, Value<'a>);
    type IntoIter = ObjectIter<'a>;

    fn into_iter(self) -> ObjectIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Object<'a> {
    type Item = (&'a str, Value<'a>);
    type IntoIter = ObjectIter<'a>;

    fn into_iter(self) -> ObjectIter<'a> {
        self.iter()
    }
}

/// Iterator over object entries in sorted index order.
#[derive(Debug, Clone)]
pub struct ObjectIter<'a> {
    object: Object<'a>,
    index: usize,
}

impl<'a> Iterator for ObjectIter<'a> {
    type Item = (&'a str, Value<'a>);

    fn next(&mut self) -> Option<(&'a str, Value<'a>)> {
        let key = self.object.key(self.index)?;
        let value = self.object.value(self.index)?;
        self.index += 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.object.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ObjectIter<'_> {}
