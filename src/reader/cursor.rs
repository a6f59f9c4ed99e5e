//! Front-consuming cursor over the remaining unparsed text

use std::{borrow::Cow, str::CharIndices};

use super::{MalformedKind, ParseError};

/// Cursor over a piece of the JSON document
///
/// The cursor only ever moves forward. Containers are parsed by splitting off a
/// sub-cursor over the text between their brackets, see [`take_enclosed`](Self::take_enclosed).
/// Every cursor knows the absolute offset of its text within the complete document so that
/// errors report positions relative to the original input.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    /// Byte offset of `text` within the complete document
    base: usize,
    /// Byte index of the next unconsumed character within `text`
    pos: usize,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Finds the index of the quote closing the string whose content starts at `start`
fn find_string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut index = start;
    while index < bytes.len() {
        match bytes[index] {
            // Skip the escaped char; if it is a quote it does not end the string
            b'\\' => index += 2,
            b'"' => return Some(index),
            _ => index += 1,
        }
    }
    None
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str, base: usize) -> Self {
        Cursor { text, base, pos: 0 }
    }

    /// Peeks at the next byte without consuming it
    pub(crate) fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consumes `count` bytes
    pub(crate) fn advance(&mut self, count: usize) {
        debug_assert!(self.pos + count <= self.text.len());
        self.pos += count;
    }

    /// The text which has not been consumed yet
    pub(crate) fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Absolute byte position of the cursor within the complete document
    pub(crate) fn position(&self) -> usize {
        self.base + self.pos
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consumes the byte if it is the next one
    pub(crate) fn consume_if(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn error(&self, kind: MalformedKind) -> ParseError {
        self.error_at(self.pos, kind)
    }

    /// Creates an error for the byte index `index` within the text of this cursor
    fn error_at(&self, index: usize, kind: MalformedKind) -> ParseError {
        ParseError::MalformedInput {
            kind,
            position: self.base + index,
        }
    }

    /// Finds the bracket matching the opening bracket at the current position
    ///
    /// Scans forward starting at depth 1, incrementing the depth for every `open` and
    /// decrementing it for every `close`. Brackets inside quoted strings are ignored. Returns
    /// the index of the closing bracket relative to the current position.
    pub(crate) fn find_closing(&self, open: u8, close: u8) -> Result<usize, ParseError> {
        debug_assert_eq!(self.peek(), Some(open));
        let bytes = self.text.as_bytes();
        let mut depth = 1_usize;
        let mut index = self.pos + 1;

        while index < bytes.len() {
            let b = bytes[index];
            if b == b'"' {
                index = find_string_end(bytes, index + 1)
                    .ok_or_else(|| self.error_at(index, MalformedKind::UnterminatedString))?;
            } else if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(index - self.pos);
                }
            }
            index += 1;
        }

        Err(self.error(MalformedKind::UnmatchedBracket))
    }

    /// Finds the end of an unquoted token
    ///
    /// Returns the index, relative to the current position, of the next `,`, `}` or `]`
    /// outside of quoted strings, or the length of the remaining text if there is none.
    pub(crate) fn find_token_end(&self) -> Result<usize, ParseError> {
        let bytes = self.text.as_bytes();
        let mut index = self.pos;

        while index < bytes.len() {
            match bytes[index] {
                b',' | b'}' | b']' => break,
                b'"' => {
                    index = find_string_end(bytes, index + 1)
                        .ok_or_else(|| self.error_at(index, MalformedKind::UnterminatedString))?;
                }
                _ => {}
            }
            index += 1;
        }

        Ok(index - self.pos)
    }

    /// Splits off a cursor over the content between the bracket at the current position and
    /// the bracket at relative index `close`, and advances past the closing bracket
    pub(crate) fn take_enclosed(&mut self, close: usize) -> Cursor<'a> {
        let start = self.pos + 1;
        let end = self.pos + close;
        self.pos = end + 1;
        Cursor::new(&self.text[start..end], self.base + start)
    }

    /// Reads the quoted string at the current position and resolves its escape sequences
    pub(crate) fn read_string(&mut self) -> Result<String, ParseError> {
        debug_assert_eq!(self.peek(), Some(b'"'));
        let start = self.pos + 1;
        let end = find_string_end(self.text.as_bytes(), start)
            .ok_or_else(|| self.error(MalformedKind::UnterminatedString))?;

        let value = unescape(&self.text[start..end])
            .map_err(|offset| self.error_at(start + offset, MalformedKind::InvalidEscapeSequence))?
            .into_owned();
        self.pos = end + 1;
        Ok(value)
    }
}

/// Resolves escape sequences; on failure returns the byte offset of the malformed escape
fn unescape(raw: &str) -> Result<Cow<'_, str>, usize> {
    if !raw.contains('\\') {
        return Ok(Cow::Borrowed(raw));
    }

    fn read_hex4(chars: &mut CharIndices<'_>) -> Option<u32> {
        let mut value = 0;
        for _ in 0..4 {
            let (_, c) = chars.next()?;
            value = value * 16 + c.to_digit(16)?;
        }
        Some(value)
    }

    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((index, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        let unescaped = match chars.next().ok_or(index)?.1 {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                let high = read_hex4(&mut chars).ok_or(index)?;
                let code_point = if (0xD800..0xDC00).contains(&high) {
                    // High surrogate must be followed by an escaped low surrogate
                    match (chars.next(), chars.next()) {
                        (Some((_, '\\')), Some((_, 'u'))) => {}
                        _ => return Err(index),
                    }
                    let low = read_hex4(&mut chars).ok_or(index)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(index);
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                // Fails for unpaired low surrogates
                char::from_u32(code_point).ok_or(index)?
            }
            _ => return Err(index),
        };
        result.push(unescaped);
    }

    Ok(Cow::Owned(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn assert_malformed(result: Result<impl std::fmt::Debug, ParseError>, kind: MalformedKind, position: usize) {
        match result {
            Err(ParseError::MalformedInput {
                kind: actual_kind,
                position: actual_position,
            }) => {
                assert_eq!(kind, actual_kind);
                assert_eq!(position, actual_position);
            }
            r => panic!("unexpected result: {r:?}"),
        }
    }

    #[test]
    fn peek_advance_remaining() {
        let mut cursor = Cursor::new("ab c", 10);
        assert_eq!(Some(b'a'), cursor.peek());
        cursor.advance(2);
        assert_eq!(" c", cursor.remaining());
        assert_eq!(12, cursor.position());
        cursor.skip_whitespace();
        assert!(cursor.consume_if(b'c'));
        assert!(cursor.is_empty());
        assert_eq!(None, cursor.peek());
        assert!(!cursor.consume_if(b'c'));
    }

    #[test]
    fn find_closing_nested() -> TestResult {
        let cursor = Cursor::new("[[1,2],[3,[4,5]]],", 0);
        assert_eq!(16, cursor.find_closing(b'[', b']')?);

        let cursor = Cursor::new("{\"a\":{\"b\":{}}} tail", 0);
        assert_eq!(13, cursor.find_closing(b'{', b'}')?);

        // Other bracket kind does not affect depth
        let cursor = Cursor::new("{[}", 0);
        assert_eq!(2, cursor.find_closing(b'{', b'}')?);
        Ok(())
    }

    #[test]
    fn find_closing_ignores_quoted_brackets() -> TestResult {
        let cursor = Cursor::new(r#"["]", "\"]", "["]"#, 0);
        assert_eq!(16, cursor.find_closing(b'[', b']')?);
        Ok(())
    }

    #[test]
    fn find_closing_unmatched() {
        let cursor = Cursor::new("[[1,2]", 5);
        assert_malformed(cursor.find_closing(b'[', b']'), MalformedKind::UnmatchedBracket, 5);

        let cursor = Cursor::new("{\"a", 0);
        assert_malformed(cursor.find_closing(b'{', b'}'), MalformedKind::UnterminatedString, 1);
    }

    #[test]
    fn find_token_end() -> TestResult {
        assert_eq!(3, Cursor::new("123,4", 0).find_token_end()?);
        assert_eq!(4, Cursor::new("true}", 0).find_token_end()?);
        assert_eq!(1, Cursor::new("1]", 0).find_token_end()?);
        assert_eq!(7, Cursor::new("a b   c", 0).find_token_end()?);
        assert_eq!(0, Cursor::new("", 0).find_token_end()?);
        Ok(())
    }

    #[test]
    fn take_enclosed() -> TestResult {
        let mut cursor = Cursor::new("x[1,[2]],3", 0);
        cursor.advance(1);
        let close = cursor.find_closing(b'[', b']')?;
        let inner = cursor.take_enclosed(close);
        assert_eq!("1,[2]", inner.remaining());
        assert_eq!(2, inner.position());
        assert_eq!(",3", cursor.remaining());
        Ok(())
    }

    #[test]
    fn read_string() -> TestResult {
        let mut cursor = Cursor::new(r#""a\"b\\c\/\nä😀",rest"#, 0);
        assert_eq!("a\"b\\c/\n\u{e4}\u{1F600}", cursor.read_string()?);
        assert_eq!(",rest", cursor.remaining());

        // Raw control characters are kept as they are
        let mut cursor = Cursor::new("\"line\nbreak\"", 0);
        assert_eq!("line\nbreak", cursor.read_string()?);
        Ok(())
    }

    #[test]
    fn read_string_malformed() {
        assert_malformed(
            Cursor::new("\"abc", 3).read_string(),
            MalformedKind::UnterminatedString,
            3,
        );
        assert_malformed(
            Cursor::new(r#""ab\x""#, 0).read_string(),
            MalformedKind::InvalidEscapeSequence,
            3,
        );
        assert_malformed(
            Cursor::new(r#""\u12""#, 0).read_string(),
            MalformedKind::InvalidEscapeSequence,
            1,
        );
        // Unpaired surrogates
        assert_malformed(
            Cursor::new(r#""\ud83d""#, 0).read_string(),
            MalformedKind::InvalidEscapeSequence,
            1,
        );
        assert_malformed(
            Cursor::new(r#""\ude00""#, 0).read_string(),
            MalformedKind::InvalidEscapeSequence,
            1,
        );
    }
}
