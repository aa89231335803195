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

//! Properties that must hold for every input, checked over pseudo-random
//! inputs built from SQL fragments.  The generators are seeded, so failures
//! reproduce.

use enum_iterator::all;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sqltoken::{Config, Dialect, TokenKind, tokenize};

const FRAGMENTS: &[&str] = &[
    "SELECT", "x", "é", "_latin1", "n", "q", "U", " ", "  ", "\t", "\n", "\r\n", ";", ";;",
    ",", "(", ")", "-", "/", "*", ".", "1", "1.5e3", "0x1F", "b'01'", "'a;b'", "'it''s'",
    "\"q\"", "`id`", "[br]", "'[x]'", "&'a'", "-- c\n", "# h\n", "/* c */", "?", "$1",
    "$$", "$tag$ x; $tag$", "$10.5", ":name", "@v", "#t", "\\", "'open", "/* open",
    "\nDELIMITER $$\n", "\nDELIMITER //\n", "\nDELIMITER ;\n", "//", "END",
];

fn random_input(rng: &mut StdRng) -> String {
    let len = rng.random_range(0..16);
    (0..len)
        .map(|_| FRAGMENTS[rng.random_range(0..FRAGMENTS.len())])
        .collect()
}

fn inputs(seed: u64) -> impl Iterator<Item = String> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..500).map(move |_| random_input(&mut rng))
}

fn configs() -> Vec<Config> {
    let mut configs = all::<Dialect>().map(Dialect::config).collect::<Vec<_>>();
    configs.push(Config::new());
    configs.push(Config::mysql().with_colon_word().with_separate_punctuation());
    configs
}

#[test]
fn lossless() {
    for config in configs() {
        for input in inputs(1) {
            let tokens = tokenize(&input, config);
            assert_eq!(tokens.to_string(), input, "{config:?}");
            assert!(tokens.iter().all(|token| !token.text.is_empty()));
            assert_eq!(tokenize(&tokens.to_string(), config), tokens);
        }
    }
}

#[test]
fn unstrip_reverses_strip() {
    for config in configs() {
        for input in inputs(2) {
            let tokens = tokenize(&input, config);
            let stripped = tokens.strip();
            if stripped.is_empty() {
                assert!(tokens.iter().all(|token| matches!(
                    token.kind,
                    TokenKind::Whitespace | TokenKind::Comment | TokenKind::Delimiter
                )));
            } else {
                assert_eq!(stripped.unstrip().to_string(), input, "{config:?}");
            }
        }
    }
}

#[test]
fn stripped_commands_are_normalized() {
    for input in inputs(3) {
        for command in tokenize(&input, Config::mysql()).cmd_split() {
            assert!(!command.is_empty());
            let first = &command[0];
            assert!(!matches!(
                first.kind,
                TokenKind::Whitespace | TokenKind::Comment
            ));
            assert!(command.iter().all(|token| token.kind != TokenKind::Comment));
        }
    }
}

#[test]
fn join_then_split_again() {
    for config in [Config::mysql(), Config::postgresql()] {
        for input in inputs(4) {
            let tokens = tokenize(&input, config);
            let commands = tokens.cmd_split_unstripped();
            let joined = commands.join();
            assert!(joined.iter().all(|token| token.split.is_none()));
            assert_eq!(
                joined.cmd_split_unstripped().len(),
                commands.len(),
                "{input:?}"
            );
        }
    }
}

#[test]
fn transforms_leave_input_alone() {
    for input in inputs(5) {
        let tokens = tokenize(&input, Config::mysql());
        let copy = tokens.deep_copy();
        let _ = tokens.strip();
        let _ = tokens.cmd_split();
        let _ = tokens.cmd_split_unstripped().join();
        assert_eq!(tokens, copy);
    }
}
