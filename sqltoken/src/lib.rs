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

//! Tokenizing SQL text.
//!
//! The tokenizer never fails and never loses anything: rendering the
//! [Tokens] it produces reproduces the input exactly, byte for byte, whatever
//! the input is.  On top of that, [Tokens::strip] normalizes a command for
//! comparison, [Tokens::cmd_split] breaks a script into commands, and
//! [TokensList::join] puts them back together.
//!
//! ```
//! use sqltoken::tokenize_mysql;
//!
//! let commands = tokenize_mysql("SELECT 1;;SELECT  /* two */ 2;;;").cmd_split();
//! assert_eq!(commands.strings(), vec!["SELECT 1", "SELECT 2"]);
//! assert_eq!(commands.join().to_string(), "SELECT 1;SELECT 2;");
//! ```

pub mod config;
pub mod scan;
pub mod split;
pub mod strip;
pub mod token;

pub use config::{Config, ConfigError, Dialect, Features};
pub use token::{Token, TokenKind, Tokens, TokensList};

/// Tokenizes `text` according to `config`.
pub fn tokenize(text: &str, config: Config) -> Tokens {
    scan::scan(text, config)
}

/// Tokenizes `text` as MySQL.
pub fn tokenize_mysql(text: &str) -> Tokens {
    tokenize(text, Config::mysql())
}

/// Tokenizes `text` as PostgreSQL.
pub fn tokenize_postgresql(text: &str) -> Tokens {
    tokenize(text, Config::postgresql())
}
