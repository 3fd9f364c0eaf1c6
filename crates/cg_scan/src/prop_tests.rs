//! Property tests for the scanner, grounded in the teacher's
//! `ori_lexer_core` convention of backing hand-written unit tests with a
//! few `proptest` properties over arbitrary byte input.

use cg_ir::{NoTypeNames, TokenKind, TokenSource};
use proptest::prelude::*;

use crate::Scanner;

proptest! {
    /// The scanner never panics on arbitrary (possibly invalid-UTF-8-adjacent)
    /// printable input and always terminates with a sticky `Eof`.
    #[test]
    fn never_panics_and_terminates(src in "[ -~\\n\\t]{0,200}") {
        let oracle = NoTypeNames;
        let mut s = Scanner::new(&src, "fuzz.c", &oracle);
        let mut steps = 0;
        loop {
            let tok = s.next_token();
            steps += 1;
            if tok.kind == TokenKind::Eof {
                break;
            }
            prop_assert!(steps < 10_000, "scanner failed to reach eof");
        }
        prop_assert_eq!(s.next_token().kind, TokenKind::Eof);
    }
}
