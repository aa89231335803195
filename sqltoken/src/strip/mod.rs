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

//! Normalizing token sequences.
//!
//! [Tokens::strip] reduces a command to its essentials: no comments, no
//! leading or trailing white space or terminators, and single spaces between
//! words.  Each token in the result that stands in for something different in
//! the input records what it replaced in its `strip` field, so
//! [Tokens::unstrip] can reconstruct the input exactly, as long as at least
//! one token survived stripping.

use log::trace;

use crate::token::{Token, TokenKind, Tokens};

impl Tokens {
    /// Returns a normalized copy of these tokens:
    ///
    /// - Comments are dropped.
    ///
    /// - Leading white space and terminators are dropped, and so are trailing
    ///   white space and `;` terminators.
    ///
    /// - Internal runs of white space become a single space, except that white
    ///   space just before a `DELIMITER` directive becomes a new-line.  White
    ///   space directly after a terminator is dropped.
    ///
    /// - Within a region governed by a custom terminator, a terminator that
    ///   directly follows another one is dropped.  The first token of the
    ///   result records the custom terminator in its `delimiter` field.
    ///
    /// If all the tokens are dropped, the result is empty and cannot be
    /// unstripped.
    pub fn strip(&self) -> Tokens {
        let stripped = Stripper::new(self).run();
        trace!("stripped {} tokens to {}", self.len(), stripped.len());
        stripped
    }

    /// Reverses [Tokens::strip].
    pub fn unstrip(&self) -> Tokens {
        let mut tokens = Vec::with_capacity(self.len());
        for token in self {
            match &token.strip {
                Some(origin) => tokens.extend(origin.iter().cloned()),
                None => tokens.push(token.clone()),
            }
        }
        Tokens(tokens)
    }
}

/// Returns true if `token` ends in a blank or a new-line.
fn ends_with_whitespace(token: Option<&Token>) -> bool {
    token
        .and_then(|token| token.text.bytes().last())
        .is_some_and(|c| matches!(c, b' ' | b'\n' | b'\r' | 0x08 | b'\t'))
}

struct Stripper<'a> {
    input: &'a [Token],
    output: Vec<Token>,

    /// Length of `output` through the last token that will certainly be kept.
    /// Tokens past this point are dropped if nothing else is kept after them.
    last_real: usize,

    /// Length of `output` as of the most recent white space.
    last_whitespace: usize,

    /// Index in `input` of the first token not yet recorded in some `strip`.
    last_capture: usize,

    /// Index in `input` just past the token at `last_real`.
    last_kept_capture: usize,

    /// Whether a custom terminator is in effect.
    custom: bool,
}

impl<'a> Stripper<'a> {
    fn new(input: &'a [Token]) -> Self {
        Self {
            input,
            output: Vec::with_capacity(input.len()),
            last_real: 0,
            last_whitespace: 0,
            last_capture: 0,
            last_kept_capture: 0,
            custom: false,
        }
    }

    fn run(mut self) -> Tokens {
        let input = self.input;
        let Some(start) = input.iter().position(|token| {
            !matches!(
                token.kind,
                TokenKind::Comment | TokenKind::Whitespace | TokenKind::Delimiter
            )
        }) else {
            return Tokens::new();
        };
        for (i, token) in input.iter().enumerate().skip(start) {
            match token.kind {
                TokenKind::Comment => (),
                TokenKind::Whitespace => self.whitespace(i),
                TokenKind::Delimiter => self.delimiter(i),
                TokenKind::DelimiterStatement => {
                    self.directive(i);
                    self.keep(i);
                }
                _ => self.keep(i),
            }
        }
        self.finish()
    }

    /// Records `input[last_capture..=i]` as the origin of the most recently
    /// output token.
    fn capture(&mut self, i: usize) {
        if i > self.last_capture {
            if let Some(last) = self.output.last_mut() {
                last.strip = Some(Tokens(self.input[self.last_capture..=i].to_vec()));
            }
        }
        self.last_capture = i + 1;
    }

    fn keep(&mut self, i: usize) {
        self.output.push(self.input[i].clone());
        self.capture(i);
        self.last_real = self.output.len();
        self.last_kept_capture = i + 1;
    }

    fn whitespace(&mut self, i: usize) {
        if self.last_whitespace >= self.last_real {
            return;
        }
        if !ends_with_whitespace(self.output.last()) {
            let token = &self.input[i];
            if token.text == " " {
                self.output.push(token.clone());
            } else {
                self.output.push(Token {
                    strip: Some(Tokens(vec![token.clone()])),
                    ..Token::new(TokenKind::Whitespace, " ")
                });
            }
            self.capture(i);
        }
        self.last_whitespace = self.output.len();
    }

    fn delimiter(&mut self, i: usize) {
        if self.custom && self.output.last().is_some_and(Token::is_custom_delimiter) {
            return;
        }
        self.output.push(self.input[i].clone());
        if self.custom {
            self.last_real = self.output.len();
            self.last_kept_capture = i + 1;
        }
        self.last_whitespace = self.last_real;
        self.capture(i);
    }

    /// Makes sure that the `DELIMITER` directive at `input[i]` starts a line.
    fn directive(&mut self, i: usize) {
        let token = &self.input[i];
        if !token.text.starts_with('\n') {
            let needs_newline = match self.output.last_mut() {
                Some(last) if last.kind == TokenKind::Whitespace => {
                    if last.strip.is_none() {
                        last.strip = Some(Tokens(vec![last.clone()]));
                    }
                    last.text = String::from("\n");
                    false
                }
                Some(last) => !last.text.ends_with('\n'),
                None => false,
            };
            if needs_newline {
                self.output.push(Token {
                    strip: Some(Tokens::new()),
                    ..Token::new(TokenKind::Whitespace, "\n")
                });
            }
        }
        self.custom = !token.resets_terminator();
        self.last_whitespace = self.output.len();
    }

    fn finish(mut self) -> Tokens {
        let input = self.input;
        self.output.truncate(self.last_real);
        let Some(last) = self.output.last_mut() else {
            return Tokens::new();
        };

        // Fold everything after the last kept token into it.
        let tail = self.last_kept_capture;
        if tail < input.len() {
            match &mut last.strip {
                Some(origin) => origin.extend(input[tail..].iter().cloned()),
                None => last.strip = Some(Tokens(input[tail.saturating_sub(1)..].to_vec())),
            }
            last.split = input.last().and_then(|token| token.split.clone());
        }

        let terminator = self.output.iter().find_map(|token| {
            token
                .directive_value()
                .filter(|value| value != ";")
                .map(|value| value.into_owned())
        });
        if let Some(first) = self.output.first_mut() {
            if first.delimiter.is_none() {
                first.delimiter = terminator;
            }
        }
        Tokens(self.output)
    }
}

#[cfg(test)]
mod tests;
