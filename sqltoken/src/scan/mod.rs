// sqltoken - SQL tokenizing for several dialects.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Scanning.
//!
//! The scanner divides SQL text into a sequence of [Token]s.  Concatenating
//! the text of the tokens always reproduces the input exactly, whatever the
//! input and [Config].  The scanner never fails: an unterminated string or
//! comment extends to the end of the input, and anything it cannot classify
//! becomes [TokenKind::Other].
//!
//! The scanner is a state machine that makes a single pass over its input.
//! Most states examine one byte at a time and only decode a full `char` when
//! they encounter a non-ASCII byte, since SQL is mostly ASCII.  Adjacent
//! tokens of the same kind are merged, except for the kinds that
//! [Config::merges] excludes.
//!
//! With [Features::DELIMITER], a `DELIMITER` directive (see [delimiter])
//! changes the statement terminator.  While a custom terminator is in effect,
//! the scanner first finds the next occurrence of the terminator and then
//! tokenizes the text before it, so that the terminator is recognized even if
//! it would otherwise be part of a longer token.

use log::{debug, trace};
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::{
    config::{Config, Features},
    token::{Token, TokenKind, Tokens},
};

pub mod delimiter;

/// Splits `input` into tokens according to `config`.
pub fn scan(input: &str, config: Config) -> Tokens {
    Scanner::new(input, config).run()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Base,
    BlockComment,
    LineComment,

    /// Inside a string quoted with the given byte.
    Quoted(u8),
    Word,
    Identifier,
    AtWordStart,
    AtWord,
    ColonWordStart,
    ColonWord,

    /// After `.`, which might start a number.
    PossibleNumber,
    Number,

    /// A number that already has its decimal point.
    NumberNoDot,

    /// After the first digit of an exponent.
    Exponent,
    ExponentConfirmed,
    HexNumber,
    BinaryNumber,
    QuotedHex,
    QuotedBinary,
    Whitespace,

    /// After `q'` or `nq'`, at the opening delimiter.
    Deliminated,

    /// Inside an Oracle `q'` string, waiting for the given character followed
    /// by `'`.
    DeliminatedBy(char),
    Dollar,

    /// After the word `DELIMITER` at the start of a line.
    Directive,

    /// At the end of the input or at a custom statement terminator.
    EndOfRegion,
    Done,
}

struct Scanner<'a> {
    input: &'a str,
    config: Config,
    tokens: Vec<Token>,

    /// Start of the token being scanned.
    start: usize,

    /// Current position.
    pos: usize,

    /// Offset of the next custom statement terminator, or the length of the
    /// input if there is none.
    stop: usize,

    /// Custom statement terminator, if a `DELIMITER` directive set one.
    terminator: Option<String>,
}

fn is_letter(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Letter
}

fn is_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

fn is_punct_symbol_or_mark(c: char) -> bool {
    use GeneralCategoryGroup::*;

    [Punctuation, Symbol, Mark].contains(&c.general_category_group())
}

fn is_space_or_control(c: char) -> bool {
    c.is_whitespace() || c.is_control()
}

fn is_ascii_space(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\r' | b'\t' | 0x08 | 0x0b | 0x0c)
}

/// The Unicode decimal separator, an alternative to `.` in numbers.
const DECIMAL_SEPARATOR: char = '⎖';

impl<'a> Scanner<'a> {
    fn new(input: &'a str, config: Config) -> Self {
        Self {
            input,
            config,
            tokens: Vec::with_capacity(input.len() / 5),
            start: 0,
            pos: 0,
            stop: input.len(),
            terminator: None,
        }
    }

    fn run(mut self) -> Tokens {
        let mut state = State::Base;
        loop {
            state = match state {
                State::Base => self.base(),
                State::BlockComment => self.block_comment(),
                State::LineComment => self.line_comment(),
                State::Quoted(quote) => self.quoted(quote),
                State::Word => self.word(),
                State::Identifier => self.identifier(),
                State::AtWordStart => self.at_word_start(),
                State::AtWord => self.at_word(),
                State::ColonWordStart => self.colon_word_start(),
                State::ColonWord => self.colon_word(),
                State::PossibleNumber => self.possible_number(),
                State::Number => self.number(true),
                State::NumberNoDot => self.number(false),
                State::Exponent => self.exponent(),
                State::ExponentConfirmed => self.exponent_confirmed(),
                State::HexNumber => self.radix_number(|c| c.is_ascii_hexdigit(), false),
                State::BinaryNumber => self.radix_number(|c| matches!(c, b'0' | b'1'), false),
                State::QuotedHex => self.radix_number(|c| c.is_ascii_hexdigit(), true),
                State::QuotedBinary => self.radix_number(|c| matches!(c, b'0' | b'1'), true),
                State::Whitespace => self.whitespace(),
                State::Deliminated => self.deliminated(),
                State::DeliminatedBy(closer) => self.deliminated_by(closer),
                State::Dollar => self.dollar(),
                State::Directive => self.directive(),
                State::EndOfRegion => self.end_of_region(),
                State::Done => break,
            };
        }
        Tokens(self.tokens)
    }

    fn has(&self, features: Features) -> bool {
        self.config.contains(features)
    }

    /// Returns the byte at `index`, if it is before the end of the current
    /// region.
    fn byte(&self, index: usize) -> Option<u8> {
        if index < self.stop {
            self.input.as_bytes().get(index).copied()
        } else {
            None
        }
    }

    fn peek(&self) -> Option<u8> {
        self.byte(self.pos)
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..self.stop)?.chars().next()
    }

    /// Ends the current token, which extends from `self.start` to `self.pos`,
    /// as `kind`.
    fn emit(&mut self, kind: TokenKind) {
        if self.pos == self.start {
            return;
        }
        let input = self.input;
        let text = &input[self.start..self.pos];
        trace!("{kind}: {text:?}");
        match self.tokens.last_mut() {
            Some(last) if last.kind == kind && self.config.merges(kind) => last.text.push_str(text),
            _ => self.tokens.push(Token::new(kind, text)),
        }
        self.start = self.pos;
    }

    fn base(&mut self) -> State {
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'/' => {
                    if self.peek() == Some(b'*') {
                        return State::BlockComment;
                    }
                    self.emit(TokenKind::Punctuation);
                }
                b'\'' | b'"' => return State::Quoted(c),
                b'-' => {
                    if self.peek() == Some(b'-') {
                        return State::LineComment;
                    }
                    self.emit(TokenKind::Punctuation);
                }
                b'#' => {
                    if self.has(Features::HASH_COMMENT) {
                        return State::LineComment;
                    } else if self.has(Features::IDENTIFIERS) {
                        return State::Identifier;
                    }
                    self.emit(TokenKind::Punctuation);
                }
                b'@' => {
                    if self.has(Features::AT_WORD) {
                        return State::AtWordStart;
                    } else if self.has(Features::IDENTIFIERS) {
                        return State::Identifier;
                    }
                    self.emit(TokenKind::Punctuation);
                }
                b';' => {
                    if self.terminator.is_some() {
                        self.emit(TokenKind::Punctuation);
                    } else {
                        self.emit(TokenKind::Delimiter);
                    }
                }
                b'?' => {
                    if self.has(Features::QUESTION_MARK) {
                        self.emit(TokenKind::QuestionMark);
                    } else {
                        self.emit(TokenKind::Punctuation);
                    }
                }
                _ if is_ascii_space(c) => return State::Whitespace,
                b'.' => return State::PossibleNumber,
                b':' => {
                    if self.has(Features::COLON_WORD) {
                        return State::ColonWordStart;
                    }
                    self.emit(TokenKind::Punctuation);
                }
                b'$' => {
                    if self.config.features().intersects(
                        Features::DOLLAR_QUOTES
                            | Features::DOLLAR_NUMBER
                            | Features::MONEY_CONSTANTS,
                    ) {
                        return State::Dollar;
                    }
                    self.emit(TokenKind::Punctuation);
                }
                b'U' => {
                    // U&'d\0061t\+000061'
                    if self.has(Features::U_AMP_PREFIX)
                        && self.peek() == Some(b'&')
                        && self.byte(self.pos + 1) == Some(b'\'')
                    {
                        self.pos += 2;
                        return State::Quoted(b'\'');
                    }
                    return State::Word;
                }
                b'x' | b'X' => {
                    if self.has(Features::HEX_NUMBERS) && self.peek() == Some(b'\'') {
                        self.pos += 1;
                        return State::QuotedHex;
                    }
                    return State::Word;
                }
                b'b' | b'B' => {
                    if self.has(Features::BINARY_NUMBERS) && self.peek() == Some(b'\'') {
                        self.pos += 1;
                        return State::QuotedBinary;
                    }
                    return State::Word;
                }
                b'n' | b'N' => {
                    if self.has(Features::NOTIONAL_STRINGS) && self.pos + 1 < self.stop {
                        match self.peek() {
                            Some(b'q' | b'Q')
                                if self.has(Features::DELIMINATED_STRINGS)
                                    && self.pos + 2 < self.stop
                                    && self.byte(self.pos + 1) == Some(b'\'') =>
                            {
                                self.pos += 2;
                                return State::Deliminated;
                            }
                            Some(b'\'') => {
                                self.pos += 1;
                                return State::Quoted(b'\'');
                            }
                            _ => (),
                        }
                    }
                    return State::Word;
                }
                b'q' | b'Q' => {
                    if self.has(Features::DELIMINATED_STRINGS) && self.peek() == Some(b'\'') {
                        self.pos += 1;
                        return State::Deliminated;
                    }
                    return State::Word;
                }
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => return State::Word,
                b'0' => {
                    if self.has(Features::HEX_NUMBERS) && self.peek() == Some(b'x') {
                        self.pos += 1;
                        return State::HexNumber;
                    }
                    if self.has(Features::BINARY_NUMBERS) && self.peek() == Some(b'b') {
                        self.pos += 1;
                        return State::BinaryNumber;
                    }
                    return State::Number;
                }
                b'1'..=b'9' => return State::Number,
                b'~' | b'`' | b'!' | b'%' | b'^' | b'&' | b'*' | b'(' | b')' | b'+' | b'='
                | b'{' | b'}' | b'[' | b']' | b'|' | b'\\' | b'<' | b'>' | b',' => {
                    self.emit(TokenKind::Punctuation)
                }
                // Every printable ASCII character is handled above, so this is
                // a control character.
                _ if c.is_ascii() => return State::Whitespace,
                _ => {
                    let Some(c) = self.input[self.pos - 1..].chars().next() else {
                        break;
                    };
                    self.pos += c.len_utf8() - 1;
                    if c == DECIMAL_SEPARATOR {
                        return State::NumberNoDot;
                    } else if is_digit(c) {
                        return State::Number;
                    } else if is_punct_symbol_or_mark(c) {
                        self.emit(TokenKind::Punctuation);
                    } else if is_letter(c) {
                        return State::Word;
                    } else if is_space_or_control(c) {
                        return State::Whitespace;
                    } else {
                        self.emit(TokenKind::Other);
                    }
                }
            }
        }
        State::EndOfRegion
    }

    fn block_comment(&mut self) -> State {
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == b'*' && self.peek() == Some(b'/') {
                self.pos += 1;
                break;
            }
        }
        self.emit(TokenKind::Comment);
        State::Base
    }

    fn line_comment(&mut self) -> State {
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == b'\n' {
                break;
            }
        }
        self.emit(TokenKind::Comment);
        State::Base
    }

    fn quoted(&mut self, quote: u8) -> State {
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == quote {
                break;
            } else if c == b'\\' {
                if let Some(escaped) = self.peek_char() {
                    self.pos += escaped.len_utf8();
                }
            }
        }
        self.emit(TokenKind::Literal);
        State::Base
    }

    fn word(&mut self) -> State {
        while let Some(c) = self.peek() {
            match c {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => self.pos += 1,
                b'#' | b'@' | b'$' => {
                    if self.has(Features::IDENTIFIERS) {
                        return State::Identifier;
                    }
                    break;
                }
                b' ' | b'\t' => {
                    if self.at_directive() {
                        return State::Directive;
                    }
                    break;
                }
                b'\'' if self.at_charset_literal() => {
                    self.pos += 1;
                    return State::Quoted(b'\'');
                }
                _ if c.is_ascii() => break,
                _ => match self.peek_char() {
                    Some(c) if is_letter(c) || is_digit(c) => self.pos += c.len_utf8(),
                    _ => break,
                },
            }
        }
        self.emit(TokenKind::Word);
        State::Base
    }

    /// Returns true if the word just scanned is `DELIMITER` at the start of a
    /// line.
    fn at_directive(&self) -> bool {
        self.has(Features::DELIMITER)
            && unicase::eq(&self.input[self.start..self.pos], "delimiter")
            && (self.start == 0 || self.input.as_bytes()[self.start - 1] == b'\n')
    }

    /// Returns true if the word just scanned is a character set prefix for a
    /// string, as in `_latin1'string'` or `n'string'`.
    fn at_charset_literal(&self) -> bool {
        self.has(Features::CHARSET_LITERAL)
            && match self.input.as_bytes()[self.start] {
                b'n' | b'N' => self.pos - self.start == 1,
                b'_' => true,
                _ => false,
            }
    }

    fn identifier(&mut self) -> State {
        while let Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'#' | b'@' | b'$' | b'_') =
            self.peek()
        {
            self.pos += 1;
        }
        if self.pos - self.start == 1 {
            // Just `#` or `@`.
            self.emit(TokenKind::Punctuation);
        } else {
            self.emit(TokenKind::Identifier);
        }
        State::Base
    }

    fn at_word_start(&mut self) -> State {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                self.pos += 1;
                State::AtWord
            }
            _ if self.has(Features::IDENTIFIERS) => State::Identifier,
            _ => {
                self.emit(TokenKind::Punctuation);
                State::Base
            }
        }
    }

    fn at_word(&mut self) -> State {
        while let Some(c) = self.peek() {
            match c {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => self.pos += 1,
                b'#' | b'@' | b'$' | b'_' if self.has(Features::IDENTIFIERS) => {
                    return State::Identifier;
                }
                _ => break,
            }
        }
        self.emit(TokenKind::AtWord);
        State::Base
    }

    fn colon_word_start(&mut self) -> State {
        match self.peek() {
            Some(b':') => {
                // `::word` is `::` followed by `word`.
                while self.peek() == Some(b':') {
                    self.pos += 1;
                }
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.pos += 1;
                return State::ColonWord;
            }
            Some(c) if !c.is_ascii() && self.has(Features::COLON_WORD_UNICODE) => {
                if let Some(c) = self.peek_char().filter(|&c| is_letter(c)) {
                    self.pos += c.len_utf8();
                    return State::ColonWord;
                }
            }
            _ => (),
        }
        self.emit(TokenKind::Punctuation);
        State::Base
    }

    fn colon_word(&mut self) -> State {
        let unicode = self.has(Features::COLON_WORD_UNICODE);
        while let Some(c) = self.peek() {
            match c {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => self.pos += 1,
                b'.' if unicode => self.pos += 1,
                _ if c.is_ascii() || !unicode => break,
                _ => match self.peek_char() {
                    Some(c) if is_letter(c) || is_digit(c) => self.pos += c.len_utf8(),
                    _ => break,
                },
            }
        }
        self.emit(TokenKind::ColonWord);
        State::Base
    }

    fn possible_number(&mut self) -> State {
        match self.peek_char() {
            Some(c) if is_digit(c) => {
                self.pos += c.len_utf8();
                State::NumberNoDot
            }
            _ => {
                self.emit(TokenKind::Punctuation);
                State::Base
            }
        }
    }

    /// Scans the digits of a number.  If `dot` is true, the number may still
    /// contain a decimal point.
    fn number(&mut self, dot: bool) -> State {
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'0'..=b'9' => (),
                b'.' if dot => return State::NumberNoDot,
                b'e' | b'E' => return self.exponent_marker(),
                b'd' | b'D' | b'f' | b'F' => return self.type_suffix(),
                _ if c.is_ascii() => {
                    self.pos -= 1;
                    break;
                }
                _ => {
                    self.pos -= 1;
                    match self.peek_char() {
                        Some(DECIMAL_SEPARATOR) if dot => {
                            self.pos += DECIMAL_SEPARATOR.len_utf8();
                            return State::NumberNoDot;
                        }
                        Some(c) if is_digit(c) => self.pos += c.len_utf8(),
                        _ => break,
                    }
                }
            }
        }
        self.emit(TokenKind::Number);
        State::Base
    }

    /// Called just after `e` or `E` in a number.  Without a digit to follow,
    /// the `e` starts a word instead.
    fn exponent_marker(&mut self) -> State {
        match self.peek_char() {
            Some(c) if is_digit(c) => {
                self.pos += c.len_utf8();
                State::Exponent
            }
            _ => {
                self.pos -= 1;
                self.emit(TokenKind::Number);
                State::Word
            }
        }
    }

    /// Called just after `d`, `D`, `f`, or `F` in a number, which is part of
    /// the number only for dialects with typed numbers.
    fn type_suffix(&mut self) -> State {
        if !self.has(Features::TYPED_NUMBERS) {
            self.pos -= 1;
        }
        self.emit(TokenKind::Number);
        State::Base
    }

    fn exponent(&mut self) -> State {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.pos += 1;
                State::ExponentConfirmed
            }
            _ => self.exponent_confirmed(),
        }
    }

    fn exponent_confirmed(&mut self) -> State {
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'0'..=b'9' => (),
                b'd' | b'D' | b'f' | b'F' => return self.type_suffix(),
                _ if c.is_ascii() => {
                    self.pos -= 1;
                    break;
                }
                _ => {
                    self.pos -= 1;
                    match self.peek_char() {
                        Some(c) if is_digit(c) => self.pos += c.len_utf8(),
                        _ => break,
                    }
                }
            }
        }
        self.emit(TokenKind::Number);
        State::Base
    }

    /// Scans digits accepted by `is_digit`.  If `quoted` is true, a closing
    /// `'` is also part of the number, as in `x'1f'`.
    fn radix_number(&mut self, is_digit: fn(u8) -> bool, quoted: bool) -> State {
        while let Some(c) = self.peek() {
            if is_digit(c) {
                self.pos += 1;
            } else {
                if quoted && c == b'\'' {
                    self.pos += 1;
                }
                break;
            }
        }
        self.emit(TokenKind::Number);
        State::Base
    }

    fn whitespace(&mut self) -> State {
        while let Some(c) = self.peek() {
            if c.is_ascii() {
                if c.is_ascii_graphic() {
                    break;
                }
                self.pos += 1;
            } else {
                match self.peek_char() {
                    Some(c) if is_space_or_control(c) => self.pos += c.len_utf8(),
                    _ => break,
                }
            }
        }
        self.emit(TokenKind::Whitespace);
        State::Base
    }

    /// Starts an Oracle deliminated string such as `q'!...!'`.
    fn deliminated(&mut self) -> State {
        let closer = match self.peek_char() {
            Some('(') => ')',
            Some('<') => '>',
            Some('[') => ']',
            Some('{') => '}',
            Some(')' | '>' | ']' | '}') | None => return self.not_deliminated(),
            Some(c) if c.is_ascii() && is_ascii_space(c as u8) => return self.not_deliminated(),
            Some(c) => c,
        };
        self.pos += closer.len_utf8();
        State::DeliminatedBy(closer)
    }

    /// The opening delimiter of a `q'` string is invalid, so the `q` or `nq` is
    /// just a word and the `'` starts an ordinary string.
    fn not_deliminated(&mut self) -> State {
        self.pos -= 1;
        self.emit(TokenKind::Word);
        self.pos += 1;
        State::Quoted(b'\'')
    }

    fn deliminated_by(&mut self, closer: char) -> State {
        let end = format!("{closer}'");
        match self.input[self.pos..self.stop].find(&end) {
            Some(offset) => self.pos += offset + end.len(),
            None => self.pos = self.stop,
        }
        self.emit(TokenKind::Literal);
        State::Base
    }

    /// Scans `$1`, `$$...$$`, `$tag$...$tag$`, or `$10.32`, depending on the
    /// configuration, after the `$`.
    fn dollar(&mut self) -> State {
        let after_dollar = self.pos;
        match self.peek_char() {
            Some('$') if self.has(Features::DOLLAR_QUOTES) => {
                if let Some(offset) = self.input[self.pos + 1..self.stop].find("$$") {
                    self.pos += 1 + offset + 2;
                    self.emit(TokenKind::Literal);
                    return State::Base;
                }
            }
            Some(c) if is_letter(c) && self.has(Features::DOLLAR_QUOTES) => {
                if self.dollar_quoted() {
                    self.emit(TokenKind::Literal);
                    return State::Base;
                }
                self.pos = after_dollar;
            }
            Some('0'..='9') if self.has(Features::DOLLAR_NUMBER) => {
                while let Some(b'0'..=b'9') = self.peek() {
                    self.pos += 1;
                }
                self.emit(TokenKind::DollarNumber);
                return State::Base;
            }
            Some('0'..='9') if self.has(Features::MONEY_CONSTANTS) => return State::Number,
            _ => (),
        }
        self.emit(TokenKind::Punctuation);
        State::Base
    }

    /// Tries to scan `tag$...$tag$` after an initial `$`.  Returns true if
    /// successful, otherwise false with `self.pos` in an unspecified position.
    fn dollar_quoted(&mut self) -> bool {
        let input = self.input;
        while let Some(c) = self.peek_char() {
            if c == '$' {
                self.pos += 1;
                let tag = &input[self.start..self.pos];
                return match input[self.pos..self.stop].find(tag) {
                    Some(offset) => {
                        self.pos += offset + tag.len();
                        true
                    }
                    None => false,
                };
            } else if is_letter(c) {
                self.pos += c.len_utf8();
            } else {
                return false;
            }
        }
        false
    }

    fn directive(&mut self) -> State {
        let Some(directive) = delimiter::parse_directive(self.input, self.pos) else {
            debug!(
                "{:?} at offset {} is not a valid DELIMITER directive",
                &self.input[self.start..self.pos],
                self.start
            );
            self.emit(TokenKind::Word);
            return State::Base;
        };
        self.pos = directive.end;
        debug!("statement terminator changed to {:?}", directive.value);
        self.tokens.push(Token {
            delimiter: Some(directive.value.clone()),
            ..Token::new(
                TokenKind::DelimiterStatement,
                &self.input[self.start..self.pos],
            )
        });
        self.start = self.pos;
        self.terminator = (directive.value != ";").then_some(directive.value);
        self.find_stop();
        State::Base
    }

    /// Sets `self.stop` to the offset of the next custom statement terminator.
    fn find_stop(&mut self) {
        self.stop = self
            .terminator
            .as_deref()
            .and_then(|terminator| delimiter::find_terminator(self.input, self.pos, terminator))
            .unwrap_or(self.input.len());
    }

    fn end_of_region(&mut self) -> State {
        if self.pos >= self.input.len() {
            return State::Done;
        }
        let terminator_len = self
            .terminator
            .as_deref()
            .filter(|terminator| {
                self.pos == self.stop && self.input[self.pos..].starts_with(terminator)
            })
            .map(str::len);
        match terminator_len {
            Some(len) => {
                self.pos += len;
                self.emit(TokenKind::Delimiter);
                self.find_stop();
            }
            None => self.stop = self.input.len(),
        }
        State::Base
    }
}
