//! frozen-regexp: regexp patterns compiled to frozen DFA tables.
//!
//! The pipeline runs `pattern -> NFA -> DFA -> FrozenDfa`: a shunting-yard
//! parser builds a Thompson NFA in an arena, subset construction
//! determinizes it, and freezing lays the result out as flat lookup
//! tables. All the expensive work happens in [`compile`]; matching is two
//! table lookups and one comparison per input byte, allocation-free when
//! the index table is persisted.
//!
//! Matching is whole-string acceptance over bytes. Supported syntax:
//! `|` alternation, `*` `+` `?` postfix quantifiers, `(...)` grouping,
//! `[...]` character classes with ranges, and `\` escapes.
//!
//! ```
//! let dfa = frozen_regexp::compile("(a|b)*ab").unwrap();
//! assert!(dfa.is_match(b"ababab"));
//! assert!(!dfa.is_match(b"abababa"));
//! ```
//!
//! A [`FrozenDfa`] is immutable and can be shared across threads; see
//! [`PatternCache`] for a compile-once map of patterns to artifacts.

mod cache;
mod containers;
mod dfa;
mod hash;
mod regexp;

use std::fmt;

pub use cache::PatternCache;
pub use dfa::{CompileOptions, Dfa, DfaBuilder, DfaState, FrozenDfa, DEFAULT_ALPHABET_SIZE};
pub use regexp::{parse, Nfa, NfaState, StateId, EPSILON};

/// Errors surfaced while compiling a pattern. Matching itself never
/// fails; an unmatched input is just `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The pattern contains a literal 0x00 byte, which is reserved for
    /// epsilon transitions.
    NulInPattern,
    /// `(` and `)` do not pair up.
    UnbalancedParens,
    /// A `[` with no closing `]`.
    UnterminatedClass,
    /// `[]` denotes no bytes at all.
    EmptyClass,
    /// A class range whose low end is above its high end.
    ReversedClassRange { lo: char, hi: char },
    /// An operator with too few operands, e.g. a bare `|`.
    MissingOperand(char),
    /// A `\` at the end of the pattern.
    TrailingEscape,
    /// An accepted byte at or above the configured alphabet size.
    AlphabetOverflow(u8),
    /// Two accepted bytes alias to the same index-table slot.
    AlphabetCollision(u8, u8),
    /// More DFA states than the u16 transition table can number.
    TooManyStates(usize),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::NulInPattern => write!(f, "pattern contains a NUL byte"),
            CompileError::UnbalancedParens => write!(f, "unbalanced parentheses"),
            CompileError::UnterminatedClass => write!(f, "character class is not closed"),
            CompileError::EmptyClass => write!(f, "empty character class"),
            CompileError::ReversedClassRange { lo, hi } => {
                write!(f, "class range '{}-{}' runs backwards", lo, hi)
            }
            CompileError::MissingOperand(op) => {
                write!(f, "operator '{}' is missing an operand", op)
            }
            CompileError::TrailingEscape => write!(f, "trailing escape at end of pattern"),
            CompileError::AlphabetOverflow(byte) => {
                write!(f, "byte 0x{:02x} is outside the alphabet", byte)
            }
            CompileError::AlphabetCollision(a, b) => {
                write!(f, "bytes 0x{:02x} and 0x{:02x} collide in the index table", a, b)
            }
            CompileError::TooManyStates(n) => {
                write!(f, "{} DFA states exceed the u16 state limit", n)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Compile `pattern` into frozen tables with default options.
pub fn compile(pattern: &str) -> Result<FrozenDfa, CompileError> {
    compile_with(pattern, &CompileOptions::default())
}

/// Compile `pattern` with explicit freezing options.
///
/// ```
/// use frozen_regexp::{compile_with, CompileOptions};
///
/// let options = CompileOptions { pre_index: true, alphabet_size: 256 };
/// let dfa = compile_with("[a-z]+", &options).unwrap();
/// assert!(dfa.is_match(b"hello"));
/// ```
pub fn compile_with(pattern: &str, options: &CompileOptions) -> Result<FrozenDfa, CompileError> {
    let nfa = regexp::parse(pattern)?;
    let dfa = DfaBuilder::new(&nfa).build();
    FrozenDfa::freeze(&dfa, options)
}

/// Compile `pattern` and test `input` in one call.
pub fn match_pattern(pattern: &str, input: &str) -> Result<bool, CompileError> {
    Ok(compile(pattern)?.is_match(input.as_bytes()))
}
