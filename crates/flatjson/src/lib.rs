//! Strict in-memory JSON parsing into a word-packed, immutable AST.
//!
//! flatjson parses a UTF-8 JSON document (RFC 8259, with a mandatory
//! array-or-object root) in one pass, decoding string escapes in place in
//! the input buffer and building the entire AST as tagged 32-bit words in
//! a single contiguous allocation. Objects carry a key index sorted at
//! parse time, so lookups are `O(log n)` without any hashing. A paired
//! serializer emits compact or pretty text from any parsed value.
//!
//! # Examples
//!
//! ```rust
//! use flatjson::{parse, AllocationStrategy};
//!
//! let doc = parse(
//!     AllocationStrategy::Single,
//!     r#"{"name": "flat", "sizes": [1, 2, 3]}"#,
//! );
//! assert!(doc.is_valid());
//!
//! let root = doc.root().unwrap().as_object().unwrap();
//! assert_eq!(root.value_of_key("name").as_str(), Some("flat"));
//!
//! let sizes = root.value_of_key("sizes").as_array().unwrap();
//! assert_eq!(sizes.len(), 3);
//! assert_eq!(sizes.get(2).unwrap().integer_value(), Some(3));
//! ```
//!
//! Allocation is pluggable: [`AllocationStrategy::Single`] serves the
//! parse stack and the AST from one input-sized buffer,
//! [`AllocationStrategy::Dynamic`] grows two buffers on demand, and
//! [`AllocationStrategy::Bounded`] works entirely inside a caller-supplied
//! word buffer and reports [`ErrorCode::OutOfMemory`] when it runs out.

#![no_std]
#![allow(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod arena;
mod ast;
mod error;
mod input;
mod number;
mod parser;
mod ser;
mod strings;
mod value;

pub use arena::AllocationStrategy;
pub use ast::{ValueKind, Word};
pub use error::{ErrorCode, ParseError};
pub use input::MutableInput;
pub use parser::parse;
pub use ser::{to_string, to_string_pretty, write, write_pretty, OutputSink};
pub use value::{Array, ArrayIter, Document, Object, ObjectIter, Value};

#[cfg(test)]
mod tests;
