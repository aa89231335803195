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

//! The MySQL client's `DELIMITER` directive.
//!
//! A line that begins with the word `DELIMITER` (in any case), followed by a
//! space or tab, changes the statement terminator from `;` to the value that
//! follows, until the next such line.  The value may be quoted with `'` or
//! `"`, in which case doubling the quote includes it in the value, and
//! adjacent quoted parts separated by blanks are concatenated.  Anything after
//! the value up to the end of the line is ignored.  A backslash anywhere in the
//! value, or a new-line inside quotes, makes the line an ordinary statement.
//!
//! While a custom terminator is in effect, the scanner needs to know where the
//! next one is before it tokenizes the text that precedes it.
//! [find_terminator] does that search.

/// A successfully parsed `DELIMITER` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Offset just past the new-line that ends the directive.
    pub end: usize,

    /// The new statement terminator.
    pub value: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    /// Blanks between the word `DELIMITER` and the value.
    Start,

    /// Blanks after a quoted part, which may be followed by another one.
    Continues,

    /// Inside a quoted part delimited by the given quote.
    Quoted(u8),

    Unquoted,

    /// Skipping the rest of the line.
    Ignoring,
}

/// Parses the part of a `DELIMITER` directive that follows the word
/// `DELIMITER`, which ends at `pos` in `input`.
///
/// Returns `None` if the directive is invalid or runs into the end of input
/// before its new-line, in which case the word `DELIMITER` is just a word.
pub fn parse_directive(input: &str, pos: usize) -> Option<Directive> {
    let bytes = input.as_bytes();
    let mut state = State::Start;
    let mut i = pos;
    let mut value = String::new();
    let mut part_start = pos;
    loop {
        let c = *bytes.get(i)?;
        state = match state {
            State::Start | State::Continues => match c {
                b' ' | b'\t' | b'\r' | 0x08 | 0x0b | 0x0c => {
                    i += 1;
                    state
                }
                b'\n' if state == State::Start => return None,
                b'\n' => {
                    i += 1;
                    break;
                }
                b'\'' | b'"' => {
                    i += 1;
                    part_start = i;
                    State::Quoted(c)
                }
                _ if state == State::Start => {
                    part_start = i;
                    State::Unquoted
                }
                _ => State::Ignoring,
            },
            State::Quoted(quote) => match c {
                b'\\' | b'\n' => return None,
                _ if c == quote => {
                    value.push_str(&input[part_start..i]);
                    match bytes.get(i + 1) {
                        Some(&next) if next == quote => {
                            value.push(quote as char);
                            i += 2;
                            part_start = i;
                            state
                        }
                        Some(b'\n') => {
                            i += 2;
                            break;
                        }
                        _ => {
                            i += 1;
                            State::Continues
                        }
                    }
                }
                _ => {
                    i += 1;
                    state
                }
            },
            State::Unquoted => match c {
                b'\\' => return None,
                b'\n' => {
                    value.push_str(&input[part_start..i]);
                    i += 1;
                    break;
                }
                b' ' | b'\t' | b'\r' | 0x08 => {
                    value.push_str(&input[part_start..i]);
                    i += 1;
                    State::Ignoring
                }
                _ => {
                    i += 1;
                    state
                }
            },
            State::Ignoring => {
                i += 1;
                if c == b'\n' {
                    break;
                }
                state
            }
        };
    }
    if value.is_empty() {
        None
    } else {
        Some(Directive { end: i, value })
    }
}

/// Searches `input` starting at `from` for `terminator`, skipping over
/// comments and quoted strings.  Returns the offset of the terminator, if
/// found.
///
/// An occurrence that ends exactly at the end of `input` is not reported.
pub fn find_terminator(input: &str, from: usize, terminator: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let end = len.checked_sub(terminator.len())?;
    let mut i = from;
    while i < end {
        if bytes[i..].starts_with(terminator.as_bytes()) {
            return Some(i);
        }
        let c = bytes[i];
        i += 1;
        match c {
            b'E' | b'e' if bytes.get(i) == Some(&b'\'') => {
                // E'...' allows backslash escapes.
                i += 1;
                while i < end {
                    let c = bytes[i];
                    i += 1;
                    match c {
                        b'\\' if i + 1 < len => i += 1,
                        b'\\' | b'\'' => break,
                        _ => (),
                    }
                }
            }
            b'\'' | b'"' => {
                while i < end {
                    let d = bytes[i];
                    i += 1;
                    if d == c {
                        if bytes.get(i) == Some(&c) {
                            i += 1;
                        } else {
                            break;
                        }
                    }
                }
            }
            b'/' if bytes.get(i) == Some(&b'*') => {
                i += 1;
                while i + 1 < len {
                    if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            b'-' if bytes.get(i) == Some(&b'-') => {
                i += 1;
                while i < len && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            _ => (),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{find_terminator, parse_directive, Directive};

    #[track_caller]
    fn check_directive(input: &str, expected: Option<(&str, &str)>) {
        let pos = input.find([' ', '\t']).unwrap();
        let actual = parse_directive(input, pos);
        let expected = expected.map(|(text, value)| Directive {
            end: text.len(),
            value: value.into(),
        });
        assert_eq!(actual, expected, "parsing {input:?}");
    }

    #[test]
    fn unquoted() {
        check_directive("DELIMITER $$\nselect", Some(("DELIMITER $$\n", "$$")));
        check_directive("delimiter //\t\n", Some(("delimiter //\t\n", "//")));
        check_directive(
            "DELIMITER ;; trailing noise\nx",
            Some(("DELIMITER ;; trailing noise\n", ";;")),
        );
        check_directive("DELIMITER  \t;\n", Some(("DELIMITER  \t;\n", ";")));
    }

    #[test]
    fn quoted() {
        check_directive("DELIMITER '$$'\n", Some(("DELIMITER '$$'\n", "$$")));
        check_directive("DELIMITER \"//\"\n", Some(("DELIMITER \"//\"\n", "//")));
        check_directive("DELIMITER 'a''b'\n", Some(("DELIMITER 'a''b'\n", "a'b")));
        check_directive("DELIMITER 'a' \"b\"\n", Some(("DELIMITER 'a' \"b\"\n", "ab")));
        check_directive("DELIMITER 'a'x\n", Some(("DELIMITER 'a'x\n", "a")));
    }

    #[test]
    fn invalid() {
        // No value on the line.
        check_directive("DELIMITER \nselect", None);
        check_directive("DELIMITER ''\n", None);

        // Backslashes are not allowed.
        check_directive("DELIMITER \\\\\n", None);
        check_directive("DELIMITER '\\'\n", None);

        // Quoted values may not span lines.
        check_directive("DELIMITER 'a\nb'\n", None);

        // The directive must end with a new-line.
        check_directive("DELIMITER $$", None);
        check_directive("DELIMITER $$ ", None);
        check_directive("DELIMITER '$$'", None);
    }

    #[test]
    fn search() {
        assert_eq!(find_terminator("select 1$$ x", 0, "$$"), Some(8));
        assert_eq!(find_terminator("select '$$'$$ x", 0, "$$"), Some(11));
        assert_eq!(find_terminator("select \"$$\"\"$$\"$$ x", 0, "$$"), Some(15));
        assert_eq!(find_terminator("select E'\\'$$'$$ x", 0, "$$"), Some(14));
        assert_eq!(find_terminator("/* $$ */$$ x", 0, "$$"), Some(8));
        assert_eq!(find_terminator("-- $$\n$$ x", 0, "$$"), Some(6));
        assert_eq!(find_terminator("a$$b$$c", 2, "$$"), Some(4));

        // Not reported at the very end of the input.
        assert_eq!(find_terminator("select 1$$", 0, "$$"), None);
        assert_eq!(find_terminator("$", 0, "$$"), None);
    }
}
