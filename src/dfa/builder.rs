//! Subset construction: NFA in, canonical DFA out.
//!
//! A DFA state stands for a set of NFA states. Its identity is the sorted
//! sequence of NFA ids: the sequence hash drives open-addressed probing
//! and the sequence itself is compared on lookup, so two distinct subsets
//! can never merge on a hash collision. Raw (pre-closure) successor sets
//! get the same treatment in a cache that short-circuits repeated
//! epsilon-closure work.

use smallvec::SmallVec;

use crate::containers::{OpenMap, OpenSet, UniqueQueue};
use crate::hash::FnvHash;
use crate::regexp::{IdSet, Nfa, EPSILON};

/// Sorted NFA-id sequence, the identity of a DFA state.
#[derive(Clone, PartialEq, Eq, Debug)]
struct IdSeq(Box<[u32]>);

impl IdSeq {
    fn from_set(set: &IdSet) -> Self {
        let mut ids: Vec<u32> = set.iter().map(|s| s.id()).collect();
        ids.sort_unstable();
        IdSeq(ids.into_boxed_slice())
    }
}

impl FnvHash for IdSeq {
    #[inline]
    fn fnv_hash(&self) -> u32 {
        self.0.fnv_hash()
    }
}

/// One deterministic state.
pub struct DfaState {
    no: u32,
    accepting: bool,
    transitions: OpenMap<u8, u32>,
}

impl DfaState {
    /// Sequence number within the DFA, 1-based; the start state is 1.
    #[inline]
    pub fn no(&self) -> u32 {
        self.no
    }

    #[inline]
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Iterate `(byte, target no)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.transitions.iter().map(|(c, to)| (*c, *to))
    }

    pub fn target(&self, byte: u8) -> Option<u32> {
        self.transitions.get(&byte).copied()
    }
}

/// Deterministic automaton produced by subset construction. Owns its
/// states; discarded once the tables are frozen.
pub struct Dfa {
    states: Vec<DfaState>,
    alphabet: OpenSet<u8>,
}

impl Dfa {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = &DfaState> {
        self.states.iter()
    }

    /// Look up a state by its sequence number.
    pub fn state(&self, no: u32) -> &DfaState {
        &self.states[(no - 1) as usize]
    }

    /// Bytes appearing on any transition, in table order.
    pub fn alphabet(&self) -> impl Iterator<Item = u8> + '_ {
        self.alphabet.iter().copied()
    }

    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }
}

struct BuildState {
    accepting: bool,
    /// Raw non-epsilon successors per byte, before closure.
    moves: OpenMap<u8, IdSet>,
    transitions: OpenMap<u8, u32>,
}

/// Converts an NFA into its canonical DFA.
pub struct DfaBuilder<'n> {
    nfa: &'n Nfa,
    states: Vec<BuildState>,
    /// Closed subset -> state number.
    index: OpenMap<IdSeq, u32>,
    /// Raw subset -> the state its closure produced.
    closure_cache: OpenMap<IdSeq, u32>,
}

impl<'n> DfaBuilder<'n> {
    pub fn new(nfa: &'n Nfa) -> Self {
        Self {
            nfa,
            states: Vec::new(),
            index: OpenMap::new(),
            closure_cache: OpenMap::new(),
        }
    }

    /// Materialize the DFA state for a closed subset and record its raw
    /// successor sets.
    fn new_state(&mut self, subset: &IdSet, seq: IdSeq) -> u32 {
        let accepting = subset.iter().any(|id| self.nfa.state(*id).is_accepting());

        let mut moves: OpenMap<u8, IdSet> = OpenMap::new();
        for id in subset.iter() {
            for (byte, targets) in self.nfa.state(*id).transitions() {
                if byte == EPSILON {
                    continue;
                }
                let entry = moves.get_or_insert_with(byte, IdSet::new);
                for &target in targets {
                    entry.insert(target);
                }
            }
        }

        let no = (self.states.len() + 1) as u32;
        self.states.push(BuildState {
            accepting,
            moves,
            transitions: OpenMap::new(),
        });
        self.index.insert(seq, no);
        no
    }

    /// The DFA state reached from `from` on `byte`.
    fn move_to(&mut self, from: u32, byte: u8) -> u32 {
        let raw = match self.states[(from - 1) as usize].moves.get(&byte) {
            Some(set) => set.clone(),
            None => IdSet::new(),
        };

        let raw_seq = IdSeq::from_set(&raw);
        if let Some(&no) = self.closure_cache.get(&raw_seq) {
            return no;
        }

        let mut closed = raw;
        self.nfa.epsilon_closure(&mut closed);
        let seq = IdSeq::from_set(&closed);
        let no = match self.index.get(&seq) {
            Some(&no) => no,
            None => self.new_state(&closed, seq),
        };

        self.closure_cache.insert(raw_seq, no);
        no
    }

    /// Run the construction to completion. Terminates because subsets are
    /// finite and each distinct subset is materialized exactly once.
    pub fn build(mut self) -> Dfa {
        let mut seed = IdSet::new();
        seed.insert(self.nfa.start());
        self.nfa.epsilon_closure(&mut seed);
        let seq = IdSeq::from_set(&seed);
        let start = self.new_state(&seed, seq);

        let mut queue = UniqueQueue::new();
        queue.push(start);

        let mut alphabet = OpenSet::new();
        while let Some(no) = queue.pop() {
            let bytes: SmallVec<[u8; 16]> = self.states[(no - 1) as usize]
                .moves
                .iter()
                .map(|(c, _)| *c)
                .collect();
            for byte in bytes {
                let to = self.move_to(no, byte);
                self.states[(no - 1) as usize].transitions.insert(byte, to);
                alphabet.insert(byte);
                queue.push(to);
            }
        }

        let states = self
            .states
            .into_iter()
            .enumerate()
            .map(|(i, st)| DfaState {
                no: (i + 1) as u32,
                accepting: st.accepting,
                transitions: st.transitions,
            })
            .collect();
        Dfa { states, alphabet }
    }
}
