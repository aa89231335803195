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

//! Splitting token sequences into commands, and joining them back together.
//!
//! A command ends at a statement terminator.  A `;` terminator is removed
//! from the command and remembered in the `split` field of the command's last
//! token.  A custom terminator selected by a MySQL `DELIMITER` directive
//! stays in the command's text instead, and the command is bracketed by
//! `DELIMITER` directives so that it means the same thing on its own:
//!
//! ```text
//! DELIMITER $$          DELIMITER $$
//! A$$            =>     A$$
//! B$$                   DELIMITER ;
//! DELIMITER ;
//!                       DELIMITER $$
//!                       B$$
//!                       DELIMITER ;
//! ```
//!
//! The directives added this way are "synthetic": their `split` field holds a
//! [TokenKind::Empty] token.  [TokensList::join] removes them again.

use log::trace;

use crate::token::{Token, TokenKind, Tokens, TokensList};

impl Tokens {
    /// Splits these tokens into commands with
    /// [cmd_split_unstripped](Tokens::cmd_split_unstripped), then
    /// [strip](Tokens::strip)s each one.  Commands that strip to nothing are
    /// dropped.
    pub fn cmd_split(&self) -> TokensList {
        self.cmd_split_unstripped()
            .iter()
            .map(Tokens::strip)
            .filter(|command| !command.is_empty())
            .collect()
    }

    /// Splits these tokens into commands without otherwise changing them.
    ///
    /// White space and comments between commands become commands of their
    /// own.  Consecutive terminators do not produce empty commands.
    pub fn cmd_split_unstripped(&self) -> TokensList {
        Splitter::new(self).run()
    }
}

/// Returns a synthetic `DELIMITER` directive with the text of `directive`.
fn opener(directive: &Token) -> Token {
    Token {
        split: Some(Box::new(Token::empty())),
        delimiter: directive.directive_value().map(|value| value.into_owned()),
        ..Token::new(TokenKind::DelimiterStatement, directive.text.clone())
    }
}

/// Returns a synthetic `DELIMITER ;` directive.
fn closer() -> Token {
    Token {
        split: Some(Box::new(Token::empty())),
        delimiter: Some(String::from(";")),
        ..Token::new(TokenKind::DelimiterStatement, "\nDELIMITER ;\n")
    }
}

struct Splitter<'a> {
    input: &'a [Token],
    commands: Vec<Tokens>,

    /// Index in `input` where the current command starts.
    start: usize,

    /// Whether the current command contains anything other than white space
    /// and comments.
    has_contents: bool,

    /// Whether the current command contains the `DELIMITER` directive that
    /// governs it.
    own_directive: bool,

    /// The directive that selected the custom terminator in effect, if any.
    directive: Option<&'a Token>,
}

impl<'a> Splitter<'a> {
    fn new(input: &'a [Token]) -> Self {
        Self {
            input,
            commands: Vec::new(),
            start: 0,
            has_contents: false,
            own_directive: false,
            directive: None,
        }
    }

    fn run(mut self) -> TokensList {
        let input = self.input;
        let mut i = 0;
        while let Some(token) = input.get(i) {
            i += 1;
            match token.kind {
                TokenKind::DelimiterStatement => {
                    if token.resets_terminator() {
                        self.directive = None;
                    } else {
                        self.directive = Some(token);
                        self.own_directive = true;
                    }
                }
                TokenKind::Delimiter => match self.directive {
                    None => self.split_standard(i - 1),
                    Some(directive) => i = self.split_custom(i - 1, directive),
                },
                kind if kind.is_ignorable() => (),
                _ => self.has_contents = true,
            }
        }

        if self.start < input.len() {
            let wrap = self.directive.filter(|_| self.has_contents);
            let mut command = Vec::with_capacity(input.len() - self.start + 2);
            if let Some(directive) = wrap.filter(|_| !self.own_directive) {
                command.push(opener(directive));
            }
            command.extend_from_slice(&input[self.start..]);
            if wrap.is_some() {
                command.push(closer());
            }
            self.push(Tokens(command));
        }
        TokensList(self.commands)
    }

    fn push(&mut self, command: Tokens) {
        if !command.is_empty() {
            trace!("command {}: {:?}", self.commands.len() + 1, command.to_string());
            self.commands.push(command);
        }
        self.has_contents = false;
        self.own_directive = false;
    }

    /// Ends the current command at the `;` terminator at `input[i]`.
    fn split_standard(&mut self, i: usize) {
        let input = self.input;
        let mut command = Tokens(input[self.start..i].to_vec());
        if let Some(last) = command.last_mut() {
            last.split = Some(Box::new(input[i].clone()));
        }
        self.push(command);
        self.start = i + 1;
    }

    /// Ends the current command just after the custom terminator at
    /// `input[i]`, or after the `DELIMITER ;` directive that follows it with
    /// only white space and comments in between.  Returns the index just past
    /// the end of the command.
    fn split_custom(&mut self, i: usize, directive: &'a Token) -> usize {
        let input = self.input;
        let mut end = i + 1;
        let mut closed = false;
        for (j, token) in input.iter().enumerate().skip(i + 1) {
            match token.kind {
                kind if kind.is_ignorable() => continue,
                TokenKind::DelimiterStatement if token.resets_terminator() => {
                    end = j + 1;
                    closed = true;
                }
                _ => (),
            }
            break;
        }

        let mut command = Vec::with_capacity(end - self.start + 2);
        if self.has_contents && !self.own_directive {
            command.push(opener(directive));
        }
        command.extend_from_slice(&input[self.start..end]);
        if closed {
            self.directive = None;
        } else if self.has_contents {
            command.push(closer());
        }
        self.push(Tokens(command));
        self.start = end;
        end
    }
}

impl TokensList {
    /// Joins commands back together, reversing
    /// [cmd_split](Tokens::cmd_split) and
    /// [cmd_split_unstripped](Tokens::cmd_split_unstripped).
    ///
    /// Terminators recorded in `split` fields are restored.  Synthetic
    /// `DELIMITER` directives are dropped, except for the final `DELIMITER ;`
    /// of the last command with contents.  A directive that would not start a
    /// line gets a new-line in front of it.  The result has no `split`
    /// fields.
    ///
    /// This does not always reproduce the original input exactly, because
    /// directives that the original input shared between commands may come
    /// back in different places.
    pub fn join(&self) -> Tokens {
        let commands = self
            .iter()
            .filter(|command| !command.is_empty())
            .collect::<Vec<_>>();
        let last_real = commands
            .iter()
            .rposition(|command| !command.is_ignorable());
        let mut output: Vec<Token> =
            Vec::with_capacity(commands.iter().map(|command| command.len() + 1).sum());
        for (i, command) in commands.iter().enumerate() {
            let last_index = command.len() - 1;
            for (j, token) in command.iter().enumerate() {
                if token.kind == TokenKind::Empty {
                    continue;
                }
                if token.split.is_some()
                    && last_real.is_some_and(|last_real| {
                        (token.is_synthetic() && i < last_real)
                            || (i == last_real && j < last_index)
                    })
                {
                    continue;
                }
                if token.kind == TokenKind::DelimiterStatement
                    && !token.text.starts_with('\n')
                    && !starts_line(&output)
                {
                    output.push(Token::new(TokenKind::Whitespace, "\n"));
                }
                output.push(Token {
                    split: None,
                    ..token.clone()
                });
            }
            if let Some(split) = command
                .last()
                .and_then(|last| last.split.as_deref())
                .filter(|split| split.kind != TokenKind::Empty)
            {
                output.push(Token {
                    split: None,
                    ..split.clone()
                });
            }
        }
        Tokens(output)
    }
}

/// Returns true if text appended to `tokens` would start a new line.
fn starts_line(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .rev()
        .find(|token| !token.text.is_empty())
        .is_none_or(|token| token.text.ends_with('\n'))
}
