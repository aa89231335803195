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

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqltoken::{Dialect, tokenize};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for dialect in [
            Dialect::MySql,
            Dialect::PostgreSql,
            Dialect::Oracle,
            Dialect::SqlServer,
        ] {
            let tokens = tokenize(input, dialect.config());
            assert_eq!(tokens.to_string(), input);

            let stripped = tokens.strip();
            if !stripped.is_empty() {
                assert_eq!(stripped.unstrip().to_string(), input);
            }
            let _ = tokens.cmd_split().join();
            let _ = tokens.cmd_split_unstripped().join();
        }
    }
});
