//! End-to-end tests for the compile pipeline: scenario table, frozen
//! tables cross-checked against direct NFA simulation, and the algebraic
//! laws the engine has to respect.

use crate::dfa::{CompileOptions, DfaBuilder, FrozenDfa};
use crate::regexp::parse;
use crate::{compile, compile_with, match_pattern, CompileError};

/// All strings over `alphabet` up to `max_len` bytes, shortest first.
fn strings(alphabet: &[u8], max_len: usize) -> Vec<Vec<u8>> {
    let mut out: Vec<Vec<u8>> = vec![Vec::new()];
    let mut last: Vec<Vec<u8>> = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &last {
            for &b in alphabet {
                let mut s = prefix.clone();
                s.push(b);
                next.push(s);
            }
        }
        out.extend(next.iter().cloned());
        last = next;
    }
    out
}

/// The frozen matcher and the NFA simulation must agree on every input.
fn assert_agrees(pattern: &str, inputs: &[Vec<u8>]) {
    let nfa = parse(pattern).unwrap();
    let dfa = compile(pattern).unwrap();
    for input in inputs {
        assert_eq!(
            dfa.is_match(input),
            nfa.accepts(input),
            "pattern {:?} disagrees on input {:?}",
            pattern,
            String::from_utf8_lossy(input),
        );
    }
}

#[test]
fn end_to_end_scenarios() {
    let cases: &[(&str, &str, bool)] = &[
        ("(a|b)*ab", "ababab", true),
        ("(a|b)*ab", "abababa", false),
        ("a*", "", true),
        ("a+", "", false),
        ("[a-z]+", "hello", true),
        ("h(e|a)llo?", "hell", true),
        ("h(e|a)llo?", "hallo", true),
        ("h(e|a)llo?", "hxllo", false),
        (r"\*", "*", true),
        ("a[0-9]b", "a5b", true),
    ];
    for &(pattern, input, expected) in cases {
        assert_eq!(
            match_pattern(pattern, input).unwrap(),
            expected,
            "pattern {:?} on input {:?}",
            pattern,
            input,
        );
    }
}

#[test]
fn frozen_tables_agree_with_nfa_simulation() {
    let inputs = strings(b"abc", 4);
    for pattern in [
        "",
        "a",
        "ab",
        "a|b",
        "(a|b)*ab",
        "a*",
        "a+b*",
        "a?b?c?",
        "[a-c]+",
        "(ab|c)*",
        "a(b|c)*a",
        "((a|b)(b|c))*",
        "[ab][bc]",
        "a|",
    ] {
        assert_agrees(pattern, &inputs);
    }
}

#[test]
fn empty_pattern_accepts_exactly_the_empty_string() {
    let dfa = compile("").unwrap();
    assert!(dfa.is_match(b""));
    for input in strings(b"ab", 3).iter().skip(1) {
        assert!(!dfa.is_match(input));
    }
}

#[test]
fn rebuilding_accepts_the_same_language() {
    let inputs = strings(b"abc", 4);
    for pattern in ["(a|b)*ab", "[a-c]?c+", "a(b|c)*"] {
        let first = compile(pattern).unwrap();
        let second = compile(pattern).unwrap();
        for input in &inputs {
            assert_eq!(first.is_match(input), second.is_match(input));
        }
    }
}

#[test]
fn closure_laws() {
    // P* accepts the empty string for any P
    for pattern in ["(ab)*", "(a|b)*", "([a-c]b)*", "((a|b)c)*"] {
        assert!(compile(pattern).unwrap().is_match(b""));
    }

    // P* accepts any concatenation of strings P accepts
    let part = compile("ab|c").unwrap();
    let starred = compile("(ab|c)*").unwrap();
    let pieces: &[&[u8]] = &[b"ab", b"c", b"ab", b"ab", b"c"];
    let mut joined = Vec::new();
    for piece in pieces {
        assert!(part.is_match(piece));
        joined.extend_from_slice(piece);
        assert!(starred.is_match(&joined));
    }
    assert!(!starred.is_match(b"a"));
    assert!(!starred.is_match(b"abca"));
}

#[test]
fn union_is_commutative() {
    let inputs = strings(b"abc", 3);
    for (a, b) in [("ab", "c"), ("a*", "bc"), ("[ab]", "c+")] {
        let left = compile(&format!("{}|{}", a, b)).unwrap();
        let right = compile(&format!("{}|{}", b, a)).unwrap();
        for input in &inputs {
            assert_eq!(left.is_match(input), right.is_match(input));
        }
    }
}

#[test]
fn parenthesization_does_not_change_the_language() {
    let inputs = strings(b"ab", 4);
    let pairs = [("(ab)", "ab"), ("(a)(b)", "ab"), ("((a|b))*", "(a|b)*")];
    for (wrapped, plain) in pairs {
        let x = compile(wrapped).unwrap();
        let y = compile(plain).unwrap();
        for input in &inputs {
            assert_eq!(x.is_match(input), y.is_match(input));
        }
    }
}

#[test]
fn pre_indexed_tables_match_identically() {
    let options = CompileOptions {
        pre_index: true,
        ..Default::default()
    };
    let plain = compile("(a|b)*ab").unwrap();
    let indexed = compile_with("(a|b)*ab", &options).unwrap();
    assert!(!plain.is_pre_indexed());
    assert!(indexed.is_pre_indexed());
    for input in strings(b"ab", 5) {
        assert_eq!(plain.is_match(&input), indexed.is_match(&input));
    }
}

#[test]
fn bytes_above_the_alphabet_are_rejected_at_freeze_time() {
    // 'é' encodes as 0xC3 0xA9, both above the default 128 alphabet
    let err = compile("é").unwrap_err();
    assert!(matches!(err, CompileError::AlphabetOverflow(_)));

    let options = CompileOptions {
        pre_index: false,
        alphabet_size: 256,
    };
    let dfa = compile_with("é", &options).unwrap();
    assert!(dfa.is_match("é".as_bytes()));
    assert!(!dfa.is_match(b"e"));
}

#[test]
fn frozen_dimensions_mirror_the_dfa() {
    let nfa = parse("a[0-2]b").unwrap();
    let dfa = DfaBuilder::new(&nfa).build();
    let frozen = FrozenDfa::freeze(&dfa, &CompileOptions::default()).unwrap();
    assert_eq!(frozen.state_count(), dfa.len());
    assert_eq!(frozen.char_count(), dfa.alphabet_len());
    assert_eq!(frozen.alphabet_size(), 128);
}

#[test]
fn rejected_bytes_fail_fast() {
    let dfa = compile("[a-c]+").unwrap();
    assert!(!dfa.is_match(b"abcz"));
    assert!(!dfa.is_match(b"z"));
    assert!(!dfa.is_match(&[0x00]));
    assert!(!dfa.is_match(&[0xFF]));
}

#[test]
fn compile_surfaces_parse_errors() {
    assert_eq!(compile("(ab").unwrap_err(), CompileError::UnbalancedParens);
    assert_eq!(compile("[ab").unwrap_err(), CompileError::UnterminatedClass);
    assert_eq!(compile("[]").unwrap_err(), CompileError::EmptyClass);
}
