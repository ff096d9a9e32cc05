//! Shunting-yard parsing of regexp patterns into a Thompson NFA.
//!
//! The parser runs over the normalized pattern with two stacks, one of
//! NFA fragments and one of operators. Postfix operators (`*` `+` `?`)
//! bind tighter than concat and union; concat and union share a level and
//! associate left. `(` sits on the operator stack as a sentinel until its
//! `)` arrives. The fragment stack is pre-seeded with an EPSILON symbol
//! so the empty pattern builds an automaton accepting exactly the empty
//! string.

use smallvec::SmallVec;

use super::nfa::{
    char_class, closure, concat, optional, plus, symbol, union_of, Fragment, Nfa, StateArena,
    EPSILON,
};
use super::normalize::normalize;
use crate::CompileError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Op {
    Concat,
    Union,
    Closure,
    Plus,
    Optional,
    GroupOpen,
}

impl Op {
    fn from_byte(c: u8) -> Option<Op> {
        match c {
            b'&' => Some(Op::Concat),
            b'|' => Some(Op::Union),
            b'*' => Some(Op::Closure),
            b'+' => Some(Op::Plus),
            b'?' => Some(Op::Optional),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Op::Concat => '&',
            Op::Union => '|',
            Op::Closure => '*',
            Op::Plus => '+',
            Op::Optional => '?',
            Op::GroupOpen => '(',
        }
    }

    fn priority(self) -> u8 {
        match self {
            Op::Closure | Op::Plus | Op::Optional => 2,
            Op::Concat | Op::Union => 1,
            Op::GroupOpen => 0,
        }
    }

    fn is_calculation(self) -> bool {
        !matches!(self, Op::GroupOpen)
    }
}

struct NfaParser {
    arena: StateArena,
    fragments: Vec<Fragment>,
    ops: Vec<Op>,
}

impl NfaParser {
    fn new() -> Self {
        Self {
            arena: StateArena::new(),
            fragments: Vec::new(),
            ops: Vec::new(),
        }
    }

    fn pop_fragment(&mut self, op: Op) -> Result<Fragment, CompileError> {
        self.fragments
            .pop()
            .ok_or(CompileError::MissingOperand(op.symbol()))
    }

    /// Pop one operator and apply its Thompson template to the fragment
    /// stack.
    fn apply(&mut self) -> Result<(), CompileError> {
        let op = match self.ops.pop() {
            Some(op) => op,
            None => return Ok(()),
        };
        let result = match op {
            Op::Closure => {
                let a = self.pop_fragment(op)?;
                closure(&mut self.arena, a)
            }
            Op::Plus => {
                let a = self.pop_fragment(op)?;
                plus(&mut self.arena, a)
            }
            Op::Optional => {
                let a = self.pop_fragment(op)?;
                optional(&mut self.arena, a)
            }
            Op::Concat => {
                let b = self.pop_fragment(op)?;
                let a = self.pop_fragment(op)?;
                concat(&mut self.arena, a, b)
            }
            Op::Union => {
                let b = self.pop_fragment(op)?;
                let a = self.pop_fragment(op)?;
                union_of(&mut self.arena, a, b)
            }
            Op::GroupOpen => return Err(CompileError::UnbalancedParens),
        };
        self.fragments.push(result);
        Ok(())
    }

    fn parse(mut self, pattern: &[u8]) -> Result<(StateArena, Fragment), CompileError> {
        let normalized = normalize(pattern);
        self.fragments.push(symbol(&mut self.arena, EPSILON));

        let mut i = 0;
        while i < normalized.len() {
            let c = normalized[i];
            i += 1;

            if let Some(op) = Op::from_byte(c) {
                while matches!(self.ops.last(),
                    Some(top) if top.is_calculation() && top.priority() >= op.priority())
                {
                    self.apply()?;
                }
                self.ops.push(op);
                continue;
            }

            match c {
                b'(' => self.ops.push(Op::GroupOpen),
                b')' => {
                    while matches!(self.ops.last(), Some(op) if op.is_calculation()) {
                        self.apply()?;
                    }
                    if self.ops.pop() != Some(Op::GroupOpen) {
                        return Err(CompileError::UnbalancedParens);
                    }
                }
                b'[' => {
                    let ranges = parse_class(&normalized, &mut i)?;
                    let fragment = char_class(&mut self.arena, &ranges);
                    self.fragments.push(fragment);
                }
                // a stray `]` was not opened by `[`; skip it
                b']' => {}
                b'\\' => {
                    if i >= normalized.len() {
                        return Err(CompileError::TrailingEscape);
                    }
                    let literal = normalized[i];
                    i += 1;
                    let fragment = symbol(&mut self.arena, literal);
                    self.fragments.push(fragment);
                }
                _ => {
                    let fragment = symbol(&mut self.arena, c);
                    self.fragments.push(fragment);
                }
            }
        }

        while let Some(&top) = self.ops.last() {
            if top == Op::GroupOpen {
                return Err(CompileError::UnbalancedParens);
            }
            self.apply()?;
        }

        match self.fragments.pop() {
            Some(fragment) => Ok((self.arena, fragment)),
            None => Err(CompileError::MissingOperand('&')),
        }
    }
}

/// Parse a class body after its `[`, leaving `i` past the closing `]`.
/// A bare byte is a single-byte range; `lo-hi` is inclusive on both ends.
fn parse_class(s: &[u8], i: &mut usize) -> Result<SmallVec<[(u8, u8); 4]>, CompileError> {
    let mut ranges: SmallVec<[(u8, u8); 4]> = SmallVec::new();
    loop {
        if *i >= s.len() {
            return Err(CompileError::UnterminatedClass);
        }
        let lo = s[*i];
        *i += 1;
        if lo == b']' {
            break;
        }
        // `lo-hi` is a range unless the dash closes the class
        if *i + 1 < s.len() && s[*i] == b'-' && s[*i + 1] != b']' {
            let hi = s[*i + 1];
            *i += 2;
            if lo > hi {
                return Err(CompileError::ReversedClassRange {
                    lo: lo as char,
                    hi: hi as char,
                });
            }
            ranges.push((lo, hi));
        } else {
            ranges.push((lo, lo));
        }
    }
    if ranges.is_empty() {
        return Err(CompileError::EmptyClass);
    }
    Ok(ranges)
}

/// Parse `pattern` into an NFA whose start state enters the top-level
/// fragment.
pub fn parse(pattern: &str) -> Result<Nfa, CompileError> {
    if pattern.bytes().any(|b| b == EPSILON) {
        return Err(CompileError::NulInPattern);
    }
    let (arena, fragment) = NfaParser::new().parse(pattern.as_bytes())?;
    Ok(Nfa::new(arena, fragment))
}
