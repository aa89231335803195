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

use crate::{
    config::Config,
    scan::scan,
    token::{Token, TokenKind, Tokens},
};

#[track_caller]
fn check_strip(input: &str, expected: &str) {
    let tokens = scan(input, Config::mysql());
    let copy = tokens.deep_copy();
    let stripped = tokens.strip();
    assert_eq!(tokens, copy);
    assert_eq!(stripped.to_string(), expected, "stripping {input:?}");
    if !expected.is_empty() {
        assert_eq!(
            stripped.unstrip().to_string(),
            input,
            "unstripping {input:?}"
        );
    }
}

#[test]
fn nothing_left() {
    check_strip("", "");
    check_strip("-- stuff\n", "");
    check_strip(";\n\t ; /* c */ ; -- tail", "");
    check_strip("/*a*/\n/*b*/\n", "");
}

#[test]
fn comments_and_whitespace() {
    check_strip("/* foo */ bar \n baz  ; ", "bar baz");
    check_strip(" /* foo */ bar \n baz  ; ", "bar baz");
    check_strip("\t\talpha  \n\n beta\t ;  ", "alpha beta");
    check_strip("word/*c1*/\t/*c2*/word2 ; ", "word word2");
    check_strip("  -- c1\n  word ; -- c2\n", "word");
    check_strip("  ';--not-comment'  ;  ", "';--not-comment'");
    check_strip("a\n\t\tb\n c ;", "a b c");
    check_strip("word1 /* comment */ \t \n   word2", "word1 word2");
}

#[test]
fn terminators() {
    check_strip("x ; ; ;  ", "x");
    check_strip("a;b;c;", "a;b;c");
    check_strip("a/*x*/;/*y*/b;", "a;b");
    check_strip("SELECT 1 $$", "SELECT 1 $$");
}

#[test]
fn many_comments() {
    check_strip(
        "a /* c1 */ /* c2 */ /* c3 */ /* c4 */ /* c5 */ b /* c6 */ /* c7 */ c",
        "a b c",
    );

    let mut input = String::from("word1");
    for c in 'A'..='Y' {
        input.push_str(&format!("/* comment{c} */"));
    }
    input.push_str(" word2 word3");
    check_strip(&input, "word1 word2 word3");

    let mut input = String::from("first");
    for _ in 0..50 {
        input.push_str(" -- comment\n");
    }
    input.push_str(" second third");
    check_strip(&input, "first second third");

    check_strip("SELECT /* c1 */ /* c2 */ /* c3 */ 1 /* c4 */;", "SELECT 1");
}

#[test]
fn directives() {
    check_strip(
        "DELIMITER $$\nSELECT 1$$\nDELIMITER ;\n",
        "DELIMITER $$\nSELECT 1$$\nDELIMITER ;\n",
    );
    check_strip("DELIMITER $$\nDELIMITER ;\n", "DELIMITER $$\nDELIMITER ;\n");
    check_strip(
        "DELIMITER //\nCREATE PROCEDURE test() BEGIN SELECT 1; END//",
        "DELIMITER //\nCREATE PROCEDURE test() BEGIN SELECT 1; END//",
    );

    // White space before a directive becomes a new-line.
    check_strip("a  \nDELIMITER ;\nb", "a\nDELIMITER ;\nb");
    check_strip("a;\nDELIMITER $$\n", "a;\nDELIMITER $$\n");
}

#[test]
fn redundant_custom_terminators() {
    check_strip("DELIMITER $$\nA$$ $$B$$\n", "DELIMITER $$\nA$$B$$");
    check_strip("DELIMITER $$\nA$$/* c */$$\nB$$\n", "DELIMITER $$\nA$$B$$");
}

#[test]
fn terminator_metadata() {
    let stripped = scan("x\nDELIMITER $$\ny$$\n", Config::mysql()).strip();
    assert_eq!(stripped.to_string(), "x\nDELIMITER $$\ny$$");
    assert_eq!(stripped[0].text, "x");
    assert_eq!(stripped[0].delimiter.as_deref(), Some("$$"));

    let stripped = scan("x;\ny;\n", Config::mysql()).strip();
    assert!(stripped.iter().all(|token| token.delimiter.is_none()));
}

#[test]
fn trailing_tokens_pass_on_split() {
    let mut tokens = scan(" bat \n baz  ", Config::mysql());
    tokens.last_mut().unwrap().split = Some(Box::new(Token::new(TokenKind::Delimiter, ";")));

    let stripped = tokens.strip();
    assert_eq!(stripped.to_string(), "bat baz");
    let last = stripped.last().unwrap();
    assert_eq!(last.text, "baz");
    assert_eq!(
        last.split.as_deref(),
        Some(&Token::new(TokenKind::Delimiter, ";"))
    );
    assert_eq!(stripped.unstrip().to_string(), " bat \n baz  ");
}

#[test]
fn idempotent() {
    for input in [
        "/* foo */ bar \n baz  ; ",
        "a /* c1 */ /* c2 */ b",
        "DELIMITER $$\nSELECT 1$$\nDELIMITER ;\n",
        "a  \nDELIMITER ;\nb",
    ] {
        let once = scan(input, Config::mysql()).strip();
        let twice = once.strip();
        assert_eq!(twice.to_string(), once.to_string(), "{input:?}");
        assert_eq!(twice.kinds(), once.kinds(), "{input:?}");
    }
}

#[test]
fn unstrip_without_origins() {
    let tokens = Tokens(vec![
        Token::new(TokenKind::Word, "a"),
        Token::new(TokenKind::Whitespace, " "),
    ]);
    assert_eq!(tokens.unstrip(), tokens);
}
