//! NFA determinization and the frozen runtime artifact.

mod builder;
mod frozen;

pub use builder::{Dfa, DfaBuilder, DfaState};
pub use frozen::{CompileOptions, FrozenDfa, DEFAULT_ALPHABET_SIZE};

#[cfg(test)]
mod tests;
