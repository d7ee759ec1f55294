//! The structural parser.
//!
//! A single pass drives the number and string lexers, maintains the parse
//! stack inside the word arena, and installs containers as they close.
//! Container depth lives entirely on that stack (each open container is a
//! marker word whose tag is the container kind and whose payload links back
//! to the enclosing marker), so arbitrarily deep inputs never recurse on
//! the host stack.

use crate::arena::{AllocationStrategy, WordArena};
use crate::ast::{self, ValueKind, Word};
use crate::error::{ErrorCode, ParseError};
use crate::input::MutableInput;
use crate::number::{self, Number};
use crate::strings;
use crate::value::Document;

/// Parses `input` under the given allocation strategy.
///
/// Parsing is total: the returned [`Document`] is either valid or carries
/// the first error with its line and column. The root of a document must
/// be an array or an object.
///
/// # Examples
///
/// ```
/// use flatjson::{parse, AllocationStrategy};
///
/// let doc = parse(AllocationStrategy::Single, r#"{"answer": 42}"#);
/// let root = doc.root().unwrap();
/// let object = root.as_object().unwrap();
/// assert_eq!(object.value_of_key("answer").integer_value(), Some(42));
/// ```
pub fn parse<'a, I>(strategy: AllocationStrategy<'a>, input: I) -> Document<'a>
where
    I: Into<MutableInput<'a>>,
{
    let mut input = input.into();
    if input.len() > ast::MAX_ADDRESSABLE {
        // Payload offsets could not address the tail of the buffer.
        let error = ParseError {
            code: ErrorCode::OutOfMemory,
            line: 1,
            column: 1,
        };
        return Document::failed(input, error);
    }

    let outcome = {
        let bytes = input.as_mut_slice();
        let arena = WordArena::new(strategy, bytes.len());
        let mut parser = Parser {
            bytes,
            pos: 0,
            line: 1,
            line_start: 0,
            arena,
        };
        match parser.run() {
            Ok(()) => Ok(parser.arena.finalize()),
            Err(error) => Err(error),
        }
    };

    match outcome {
        Ok((root, words)) => Document::valid(input, words, root),
        Err(error) => Document::failed(input, error),
    }
}

/// Where the parser stands relative to the innermost open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Right after `[` or `{`: expect the first entry or an empty close.
    ContainerStart,
    /// A value just completed: expect `,` or the closing bracket.
    AfterValue,
}

struct Parser<'i, 'b> {
    bytes: &'i mut [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    arena: WordArena<'b>,
}

impl Parser<'_, '_> {
    fn run(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        let mut base = match self.peek() {
            None => return Err(self.error(ErrorCode::MissingRootElement)),
            Some(b'[') => self.open_container(ValueKind::Array, None)?,
            Some(b'{') => self.open_container(ValueKind::Object, None)?,
            Some(_) => return Err(self.error(ErrorCode::BadRoot)),
        };
        let mut state = State::ContainerStart;

        loop {
            self.skip_whitespace();
            let in_object = matches!(
                ast::word_kind(self.arena.stack_word(base)),
                ValueKind::Object
            );
            let next = match state {
                State::ContainerStart => match self.peek() {
                    None => return Err(self.error(ErrorCode::UnexpectedEnd)),
                    Some(b']') if !in_object => {
                        self.advance();
                        self.close_container(&mut base)?
                    }
                    Some(b'}') if in_object => {
                        self.advance();
                        self.close_container(&mut base)?
                    }
                    Some(_) => {
                        if in_object {
                            self.parse_key_and_colon()?;
                            self.skip_whitespace();
                        }
                        Some(self.parse_value(&mut base)?)
                    }
                },
                State::AfterValue => match self.peek() {
                    None => return Err(self.error(ErrorCode::UnexpectedEnd)),
                    Some(b',') => {
                        self.advance();
                        self.skip_whitespace();
                        if in_object {
                            self.parse_key_and_colon()?;
                            self.skip_whitespace();
                        } else {
                            match self.peek() {
                                None => return Err(self.error(ErrorCode::UnexpectedEnd)),
                                Some(b']') => return Err(self.error(ErrorCode::ExpectedValue)),
                                Some(b',') => return Err(self.error(ErrorCode::UnexpectedComma)),
                                Some(_) => {}
                            }
                        }
                        Some(self.parse_value(&mut base)?)
                    }
                    Some(b']') if !in_object => {
                        self.advance();
                        self.close_container(&mut base)?
                    }
                    Some(b'}') if in_object => {
                        self.advance();
                        self.close_container(&mut base)?
                    }
                    Some(_) => return Err(self.error(ErrorCode::ExpectedComma)),
                },
            };
            match next {
                Some(s) => state = s,
                None => return Ok(()),
            }
        }
    }

    /// Parses one value at the cursor; containers switch the current frame.
    fn parse_value(&mut self, base: &mut usize) -> Result<State, ParseError> {
        match self.peek() {
            None => Err(self.error(ErrorCode::UnexpectedEnd)),
            Some(b'[') => {
                *base = self.open_container(ValueKind::Array, Some(*base))?;
                Ok(State::ContainerStart)
            }
            Some(b'{') => {
                *base = self.open_container(ValueKind::Object, Some(*base))?;
                Ok(State::ContainerStart)
            }
            Some(b'"') => {
                let (start, end) = self.decode_string()?;
                let offset = self.emit(&[start, end])?;
                self.push(ast::make_word(ValueKind::String, offset))?;
                Ok(State::AfterValue)
            }
            Some(b'-' | b'0'..=b'9') => {
                self.parse_number_value()?;
                Ok(State::AfterValue)
            }
            Some(b'.') => Err(self.error(ErrorCode::InvalidNumber)),
            Some(b'n') => {
                self.expect_literal(b"null", ErrorCode::ExpectedNull)?;
                self.push(ast::make_word(ValueKind::Null, 0))?;
                Ok(State::AfterValue)
            }
            Some(b't') => {
                self.expect_literal(b"true", ErrorCode::ExpectedTrue)?;
                self.push(ast::make_word(ValueKind::True, 0))?;
                Ok(State::AfterValue)
            }
            Some(b'f') => {
                self.expect_literal(b"false", ErrorCode::ExpectedFalse)?;
                self.push(ast::make_word(ValueKind::False, 0))?;
                Ok(State::AfterValue)
            }
            Some(b',') => Err(self.error(ErrorCode::UnexpectedComma)),
            Some(_) => Err(self.error(ErrorCode::ExpectedValue)),
        }
    }

    /// Pushes the key's byte range and consumes the `:` separator.
    fn parse_key_and_colon(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            None => return Err(self.error(ErrorCode::UnexpectedEnd)),
            Some(b'"') => {
                let (start, end) = self.decode_string()?;
                self.push(start)?;
                self.push(end)?;
            }
            Some(_) => return Err(self.error(ErrorCode::MissingObjectKey)),
        }
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error(ErrorCode::UnexpectedEnd)),
            Some(b':') => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(self.error(ErrorCode::ExpectedColon)),
        }
    }

    fn parse_number_value(&mut self) -> Result<(), ParseError> {
        let (num, after) = number::parse_number(self.bytes, self.pos)
            .map_err(|(code, at)| self.error_at(at, code))?;
        self.pos = after;
        let word = match num {
            Number::Integer(v) if ast::fits_inline(v) => ast::inline_integer(v),
            Number::Integer(v) => {
                let offset = self.emit(&[v as Word])?;
                ast::indirect_integer(offset)
            }
            Number::Double(d) => {
                let offset = self.emit(&ast::double_words(d))?;
                ast::make_word(ValueKind::Double, offset)
            }
        };
        self.push(word)
    }

    /// Consumes `[` or `{` and pushes the container marker. The marker's
    /// payload links to the enclosing marker's stack index, biased by one
    /// so that zero means "root".
    fn open_container(
        &mut self,
        kind: ValueKind,
        enclosing: Option<usize>,
    ) -> Result<usize, ParseError> {
        self.advance();
        let marker = self.arena.stack_len();
        let link = enclosing.map_or(0, |b| b as Word + 1);
        self.push(ast::make_word(kind, link))?;
        Ok(marker)
    }

    /// Installs the container whose marker is at `*base` and replaces its
    /// stack range with the installed tagged word. Returns the parser state
    /// to resume in, or `None` once the root container closed.
    fn close_container(&mut self, base: &mut usize) -> Result<Option<State>, ParseError> {
        let marker = self.arena.stack_word(*base);
        let kind = ast::word_kind(marker);
        let link = ast::word_payload(marker);
        let elems_start = *base + 1;
        let offset = match kind {
            ValueKind::Object => self
                .arena
                .install_object(elems_start, self.bytes)
                .map_err(|code| self.error(code))?,
            _ => self
                .arena
                .install_array(elems_start)
                .map_err(|code| self.error(code))?,
        };
        self.arena.truncate_stack(*base);
        self.push(ast::make_word(kind, offset))?;

        if link == 0 {
            self.skip_whitespace();
            if self.peek().is_some() {
                return Err(self.error(ErrorCode::ExpectedEndOfInput));
            }
            Ok(None)
        } else {
            *base = (link - 1) as usize;
            Ok(Some(State::AfterValue))
        }
    }

    fn decode_string(&mut self) -> Result<(Word, Word), ParseError> {
        match strings::decode_string(self.bytes, self.pos) {
            Ok(decoded) => {
                self.pos = decoded.new_pos;
                Ok((decoded.start, decoded.end))
            }
            Err((code, at)) => Err(self.error_at(at, code)),
        }
    }

    fn expect_literal(
        &mut self,
        literal: &'static [u8],
        code: ErrorCode,
    ) -> Result<(), ParseError> {
        for (i, expected) in literal.iter().enumerate() {
            match self.bytes.get(self.pos + i) {
                None => return Err(self.error_at(self.bytes.len(), ErrorCode::UnexpectedEnd)),
                Some(b) if b != expected => return Err(self.error_at(self.pos + i, code)),
                Some(_) => {}
            }
        }
        self.pos += literal.len();
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                }
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn push(&mut self, word: Word) -> Result<(), ParseError> {
        self.arena.push_word(word).map_err(|code| self.error(code))
    }

    fn emit(&mut self, words: &[Word]) -> Result<Word, ParseError> {
        self.arena
            .emit_ast_words(words)
            .map_err(|code| self.error(code))
    }

    fn error(&self, code: ErrorCode) -> ParseError {
        self.error_at(self.pos, code)
    }

    fn error_at(&self, at: usize, code: ErrorCode) -> ParseError {
        ParseError {
            code,
            line: self.line,
            column: at - self.line_start + 1,
        }
    }
}
