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

//! Tokens.

use std::{
    borrow::Cow,
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{Deref, DerefMut},
    str::FromStr,
};

use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};

use crate::scan::delimiter::parse_directive;

/// The type of a [Token].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
pub enum TokenKind {
    /// `/* ... */`, `-- ...`, or (for MySQL) `# ...`.
    Comment,

    /// Spaces, new-lines, and control characters.
    Whitespace,

    /// `?` (MySQL).
    QuestionMark,

    /// `@` (SQL Server).
    AtSign,

    /// `$7` (PostgreSQL).
    DollarNumber,

    /// `:name` (sqlx, Oracle).
    ColonWord,

    /// A quoted string.
    Literal,

    /// `#foo`, `@fo$o` (SQL Server).
    Identifier,

    /// `@foo` (SQL Server).
    AtWord,

    Number,

    /// A statement terminator: `;`, or whatever the most recent MySQL
    /// `DELIMITER` directive chose.
    Delimiter,

    Punctuation,

    Word,

    /// Characters that fit no other category.
    Other,

    /// A MySQL `DELIMITER` directive, including its trailing new-line.
    DelimiterStatement,

    /// A placeholder that [TokensList::join](crate::token::TokensList::join)
    /// removes.
    Empty,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Comment => "Comment",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::QuestionMark => "QuestionMark",
            TokenKind::AtSign => "AtSign",
            TokenKind::DollarNumber => "DollarNumber",
            TokenKind::ColonWord => "ColonWord",
            TokenKind::Literal => "Literal",
            TokenKind::Identifier => "Identifier",
            TokenKind::AtWord => "AtWord",
            TokenKind::Number => "Number",
            TokenKind::Delimiter => "Delimiter",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Word => "Word",
            TokenKind::Other => "Other",
            TokenKind::DelimiterStatement => "DelimiterStatement",
            TokenKind::Empty => "Empty",
        }
    }

    /// Returns true for kinds that carry no part of a command: comments,
    /// white space, and [TokenKind::Empty] placeholders.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Whitespace | TokenKind::Empty
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for kind in all::<TokenKind>() {
            if kind.as_str().eq_ignore_ascii_case(s) {
                return Ok(kind);
            }
        }
        Err(())
    }
}

/// A fragment of SQL text along with its classification.
///
/// A freshly scanned token has only `kind` and `text`.  The remaining fields
/// are annotations added by [Tokens::strip] and [Tokens::cmd_split] so that
/// their work can be undone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,

    /// The token's exact source text.
    pub text: String,

    /// The tokens that this one replaced in [Tokens::strip], including this
    /// token's own original form.  [Tokens::unstrip] substitutes them back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<Tokens>,

    /// The statement terminator that [Tokens::cmd_split] removed after this
    /// token.  [TokensList::join] puts it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<Box<Token>>,

    /// The custom statement terminator in effect for this token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            strip: None,
            split: None,
            delimiter: None,
        }
    }

    /// Returns an [TokenKind::Empty] token.
    pub fn empty() -> Self {
        Self::new(TokenKind::Empty, "")
    }

    /// Returns true if this token was made up by [Tokens::cmd_split] rather
    /// than taken from the input.
    pub fn is_synthetic(&self) -> bool {
        self.split
            .as_ref()
            .is_some_and(|split| split.kind == TokenKind::Empty)
    }

    /// Returns true if this token is a terminator inside a region governed
    /// by a `DELIMITER` directive, that is, anything other than plain `;`.
    pub fn is_custom_delimiter(&self) -> bool {
        self.kind == TokenKind::Delimiter && self.text != ";"
    }

    /// For a [TokenKind::DelimiterStatement], returns the statement terminator
    /// that it selects.
    ///
    /// Tokens from the scanner record the terminator in `delimiter`.  For
    /// other tokens, this parses it from the text.
    pub fn directive_value(&self) -> Option<Cow<'_, str>> {
        if self.kind != TokenKind::DelimiterStatement {
            return None;
        }
        if let Some(value) = &self.delimiter {
            return Some(Cow::Borrowed(value.as_str()));
        }
        let text = self.text.trim_start_matches(['\n', '\r']);
        let pos = text.find([' ', '\t'])?;
        parse_directive(text, pos).map(|directive| Cow::Owned(directive.value))
    }

    /// Returns true if this is a `DELIMITER ;` directive, which restores the
    /// standard statement terminator.
    pub fn resets_terminator(&self) -> bool {
        self.directive_value().as_deref() == Some(";")
    }

    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.text)
    }
}

/// A sequence of [Token]s.
///
/// The [Display] implementation writes the tokens' text back out, which
/// reproduces the input exactly for the output of the scanner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tokens(pub Vec<Token>);

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deep_copy(&self) -> Self {
        Self(self.iter().map(Token::deep_copy).collect())
    }

    /// Returns the kinds of the tokens, in order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.iter().map(|token| token.kind).collect()
    }

    /// Returns true if every token is [ignorable](TokenKind::is_ignorable).
    pub fn is_ignorable(&self) -> bool {
        self.iter().all(|token| token.kind.is_ignorable())
    }
}

impl Deref for Tokens {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Tokens {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(value: Vec<Token>) -> Self {
        Self(value)
    }
}

impl FromIterator<Token> for Tokens {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Tokens {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Tokens {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for token in self {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

/// A sequence of commands, each of which is a sequence of [Token]s, as
/// produced by [Tokens::cmd_split].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokensList(pub Vec<Tokens>);

impl TokensList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deep_copy(&self) -> Self {
        Self(self.iter().map(Tokens::deep_copy).collect())
    }

    /// Renders each command's text, omitting commands whose text is empty.
    pub fn strings(&self) -> Vec<String> {
        self.iter()
            .map(|tokens| tokens.to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Deref for TokensList {
    type Target = Vec<Tokens>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TokensList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Tokens>> for TokensList {
    fn from(value: Vec<Tokens>) -> Self {
        Self(value)
    }
}

impl FromIterator<Tokens> for TokensList {
    fn from_iter<T: IntoIterator<Item = Tokens>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TokensList {
    type Item = Tokens;
    type IntoIter = std::vec::IntoIter<Tokens>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokensList {
    type Item = &'a Tokens;
    type IntoIter = std::slice::Iter<'a, Tokens>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
