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

//! Dialect configuration.
//!
//! SQL implementations disagree about a surprising amount of lexical detail:
//! whether `#` starts a comment, whether `$1` is a parameter, whether
//! `q'!...!'` is a string.  A [Config] is a set of independent [Features]
//! that tells the scanner which of these constructs to recognize.  The
//! presets returned by [Config::mysql], [Config::postgresql],
//! [Config::oracle], and [Config::sql_server] cover the supported families,
//! and [Dialect] names them.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use bitflags::bitflags;
use displaydoc::Display;
use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::token::TokenKind;

bitflags! {
    /// Lexical features that differ between SQL implementations.
    ///
    /// In human-readable serialization formats, a set of features is written
    /// as flag names separated by `|`, e.g. `"QUESTION_MARK | DELIMITER"`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Features: u32 {
        /// `?` is a [TokenKind::QuestionMark] placeholder (MySQL).
        const QUESTION_MARK = 1 << 0;

        /// `$7` is a [TokenKind::DollarNumber] placeholder (PostgreSQL).
        const DOLLAR_NUMBER = 1 << 1;

        /// `:name` is a [TokenKind::ColonWord] placeholder (sqlx, Oracle).
        const COLON_WORD = 1 << 2;

        /// Colon words may contain Unicode letters and digits, and `.`.
        const COLON_WORD_UNICODE = 1 << 3;

        /// `#` starts a comment that runs to the end of the line (MySQL).
        const HASH_COMMENT = 1 << 4;

        /// `$$stuff$$` and `$tag$stuff$tag$` quoting (PostgreSQL).
        const DOLLAR_QUOTES = 1 << 5;

        /// `0xa0`, `x'af'`, and `X'AF'` (MySQL).
        const HEX_NUMBERS = 1 << 6;

        /// `0b01`, `b'01'`, and `B'01'` (MySQL).
        const BINARY_NUMBERS = 1 << 7;

        /// `U&'d\0061t\+000061'` (PostgreSQL).
        const U_AMP_PREFIX = 1 << 8;

        /// `_latin1'string'` and `n'string'` (MySQL).
        const CHARSET_LITERAL = 1 << 9;

        /// `n'string'` and `N'string'` (Oracle, SQL Server).
        const NOTIONAL_STRINGS = 1 << 10;

        /// `q'!string!'` and `nq'(string)'` (Oracle).
        const DELIMINATED_STRINGS = 1 << 11;

        /// `1.5f`, `2e3D` (Oracle).
        const TYPED_NUMBERS = 1 << 12;

        /// `$10` and `$10.32` are [TokenKind::Number]s (SQL Server).
        const MONEY_CONSTANTS = 1 << 13;

        /// `@foo` is a [TokenKind::AtWord] (SQL Server).
        const AT_WORD = 1 << 14;

        /// `#foo`, `@fo$o`, and `f#o@o$` are [TokenKind::Identifier]s (SQL
        /// Server).
        const IDENTIFIERS = 1 << 15;

        /// Successive punctuation is never merged into a single token.
        const SEPARATE_PUNCTUATION = 1 << 16;

        /// The MySQL client's `DELIMITER` directive.
        const DELIMITER = 1 << 17;
    }
}

/// Scanner configuration.
///
/// A configuration is a plain value.  The `with_*` methods return a modified
/// copy and leave the original alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    features: Features,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! builders {
    ($($(#[$attr:meta])* $name:ident => $flag:ident;)*) => {
        $(
            $(#[$attr])*
            pub const fn $name(self) -> Self {
                self.with(Features::$flag)
            }
        )*
    };
}

impl Config {
    /// Returns a configuration with every feature disabled.
    pub const fn new() -> Self {
        Self {
            features: Features::empty(),
        }
    }

    /// Returns a configuration for MySQL, MariaDB, and SingleStore.
    pub const fn mysql() -> Self {
        Self::new()
            .with_question_mark()
            .with_hash_comment()
            .with_hex_numbers()
            .with_binary_numbers()
            .with_charset_literal()
            .with_delimiter()
    }

    /// Returns a configuration for PostgreSQL and CockroachDB.
    pub const fn postgresql() -> Self {
        Self::new()
            .with_dollar_number()
            .with_dollar_quotes()
            .with_u_amp_prefix()
    }

    /// Returns a configuration for Oracle.
    pub const fn oracle() -> Self {
        Self::new()
            .with_notional_strings()
            .with_deliminated_strings()
            .with_typed_numbers()
            .with_colon_word()
    }

    /// Returns a configuration for SQL Server.
    pub const fn sql_server() -> Self {
        Self::new()
            .with_notional_strings()
            .with_hex_numbers()
            .with_money_constants()
            .with_at_word()
            .with_identifiers()
    }

    pub const fn features(self) -> Features {
        self.features
    }

    /// Returns a copy of this configuration with `features` added.
    pub const fn with(self, features: Features) -> Self {
        Self {
            features: self.features.union(features),
        }
    }

    /// Returns a copy of this configuration with `features` removed.
    pub const fn without(self, features: Features) -> Self {
        Self {
            features: self.features.difference(features),
        }
    }

    /// Returns true if every feature in `features` is enabled.
    pub const fn contains(self, features: Features) -> bool {
        self.features.contains(features)
    }

    builders! {
        with_question_mark => QUESTION_MARK;
        with_dollar_number => DOLLAR_NUMBER;
        with_colon_word => COLON_WORD;
        /// Also allows Unicode in colon words, at a small cost in speed.
        with_colon_word_unicode => COLON_WORD_UNICODE;
        with_hash_comment => HASH_COMMENT;
        with_dollar_quotes => DOLLAR_QUOTES;
        with_hex_numbers => HEX_NUMBERS;
        with_binary_numbers => BINARY_NUMBERS;
        with_u_amp_prefix => U_AMP_PREFIX;
        with_charset_literal => CHARSET_LITERAL;
        with_notional_strings => NOTIONAL_STRINGS;
        with_deliminated_strings => DELIMINATED_STRINGS;
        with_typed_numbers => TYPED_NUMBERS;
        with_money_constants => MONEY_CONSTANTS;
        with_at_word => AT_WORD;
        with_identifiers => IDENTIFIERS;
        with_separate_punctuation => SEPARATE_PUNCTUATION;
        with_delimiter => DELIMITER;
    }

    /// Returns true if two adjacent tokens of type `kind` should be merged
    /// into one.
    pub fn merges(self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Number
            | TokenKind::QuestionMark
            | TokenKind::DollarNumber
            | TokenKind::ColonWord
            | TokenKind::Delimiter
            | TokenKind::DelimiterStatement => false,
            TokenKind::Punctuation => !self.contains(Features::SEPARATE_PUNCTUATION),
            _ => true,
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// The document may name a `dialect` preset to start from, then list
    /// features to `enable` and `disable`:
    ///
    /// ```toml
    /// dialect = "mysql"
    /// enable = "COLON_WORD | COLON_WORD_UNICODE"
    /// disable = "QUESTION_MARK"
    /// ```
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(file
            .dialect
            .map_or_else(Config::new, Dialect::config)
            .with(file.enable)
            .without(file.disable))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    dialect: Option<Dialect>,
    #[serde(default = "Features::empty")]
    enable: Features,
    #[serde(default = "Features::empty")]
    disable: Features,
}

/// A family of SQL implementations with a preset [Config].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySql,
    PostgreSql,
    Oracle,
    SqlServer,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Other names accepted by [FromStr], besides [Dialect::as_str].
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dialect::MySql => &["mariadb", "singlestore"],
            Dialect::PostgreSql => &["postgres", "cockroachdb"],
            Dialect::Oracle => &[],
            Dialect::SqlServer => &["mssql", "tsql"],
        }
    }

    pub fn config(self) -> Config {
        match self {
            Dialect::MySql => Config::mysql(),
            Dialect::PostgreSql => Config::postgresql(),
            Dialect::Oracle => Config::oracle(),
            Dialect::SqlServer => Config::sql_server(),
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for dialect in all::<Dialect>() {
            if dialect.as_str().eq_ignore_ascii_case(s)
                || dialect
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(s))
            {
                return Ok(dialect);
            }
        }
        Err(ConfigError::UnknownDialect(s.into()))
    }
}

impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An error loading a [Config].
#[derive(Display, Debug, ThisError)]
pub enum ConfigError {
    /// Unknown SQL dialect {0:?}.
    UnknownDialect(String),

    /// Error parsing configuration: {0}
    Toml(#[from] toml::de::Error),
}
