use std::fmt;

use crate::sparse_set::SparseSet;

/// A state ID in the NFA
pub type StateId = usize;

/// The target of a transition that hasn't been patched yet.
///
/// No finished NFA contains this value.
pub const UNPATCHED: StateId = usize::MAX;

/// The guard on a consuming transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Matches exactly this character.
    Char(char),
    /// Matches any character in the inclusive range.
    Range(char, char),
}

impl Predicate {
    /// Returns true if the given character satisfies this guard.
    #[inline]
    pub fn matches(&self, ch: char) -> bool {
        match *self {
            Predicate::Char(c) => c == ch,
            Predicate::Range(lo, hi) => lo <= ch && ch <= hi,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Predicate::Char(c) => write!(f, "{:?}", c),
            Predicate::Range(lo, hi) => write!(f, "{:?}-{:?}", lo, hi),
        }
    }
}

/// A Thompson NFA state.
///
/// Each state has at most two outgoing transitions. Only `Consume` reads
/// input; the rest are epsilon transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    /// Consume one character satisfying `pred` and move to `next`.
    Consume { pred: Predicate, next: StateId },

    /// Epsilon transition (no input consumed)
    Epsilon { next: StateId },

    /// Epsilon transitions to both targets
    Split { out1: StateId, out2: StateId },

    /// Match state (accepting). There is exactly one per NFA.
    Match,
}

/// Which outgoing transition of a state a hole refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// `next` of `Consume`/`Epsilon`, or `out1` of `Split`.
    Out1,
    /// `out2` of `Split`.
    Out2,
}

/// A dangling transition waiting for its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hole {
    pub state: StateId,
    pub slot: Slot,
}

impl Hole {
    pub fn out1(state: StateId) -> Hole {
        Hole { state, slot: Slot::Out1 }
    }

    pub fn out2(state: StateId) -> Hole {
        Hole { state, slot: Slot::Out2 }
    }
}

/// Fragment of an NFA with a start state and the holes left to patch
#[derive(Debug, Clone)]
pub struct Fragment {
    pub start: StateId,
    pub holes: Vec<Hole>,
}

/// A Thompson NFA stored as an arena of states.
///
/// States refer to each other by index, so the cycles introduced by `*` and
/// `+` are just indices pointing backwards.
#[derive(Clone, PartialEq)]
pub struct NFA {
    /// All states in the NFA
    pub states: Vec<State>,
    /// Starting state
    pub start: StateId,
    /// The single accepting state
    pub accept: StateId,
}

impl NFA {
    /// Create a new empty NFA
    pub fn new() -> Self {
        Self { states: Vec::new(), start: UNPATCHED, accept: UNPATCHED }
    }

    /// Returns the number of states in this NFA.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no states have been added.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state with the given ID.
    ///
    /// Panics if the ID is out of bounds.
    #[inline]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// Add a new state and return its ID
    pub fn add_state(&mut self, state: State) -> StateId {
        let id = self.states.len();
        self.states.push(state);
        id
    }

    /// Create a consuming state whose target is unpatched
    pub fn consume(&mut self, pred: Predicate) -> StateId {
        self.add_state(State::Consume { pred, next: UNPATCHED })
    }

    /// Create an epsilon transition state
    pub fn epsilon(&mut self, next: StateId) -> StateId {
        self.add_state(State::Epsilon { next })
    }

    /// Create a split state
    pub fn split(&mut self, out1: StateId, out2: StateId) -> StateId {
        self.add_state(State::Split { out1, out2 })
    }

    /// Create the match state and mark it as the accepting state
    pub fn match_state(&mut self) -> StateId {
        let id = self.add_state(State::Match);
        self.accept = id;
        id
    }

    /// Point every hole at `to`.
    pub fn patch(&mut self, holes: &[Hole], to: StateId) {
        for hole in holes {
            match (&mut self.states[hole.state], hole.slot) {
                (State::Consume { next, .. }, Slot::Out1)
                | (State::Epsilon { next }, Slot::Out1)
                | (State::Split { out1: next, .. }, Slot::Out1)
                | (State::Split { out2: next, .. }, Slot::Out2) => *next = to,
                (state, slot) => {
                    unreachable!("invalid patch {:?} of {:?}", slot, state)
                }
            }
        }
    }

    /// Add the epsilon closure of `id` to `set`.
    ///
    /// `stack` is scratch space. Every state enters the set at most once,
    /// which is what keeps the loops built for `*` and `+` from spinning
    /// forever.
    pub fn epsilon_closure(
        &self,
        id: StateId,
        set: &mut SparseSet,
        stack: &mut Vec<StateId>,
    ) {
        stack.push(id);
        while let Some(id) = stack.pop() {
            if !set.insert(id) {
                continue;
            }
            match *self.state(id) {
                State::Epsilon { next } => stack.push(next),
                // Push out2 first so out1 is explored first, which keeps the
                // set's insertion order deterministic.
                State::Split { out1, out2 } => {
                    stack.push(out2);
                    stack.push(out1);
                }
                State::Consume { .. } | State::Match => {}
            }
        }
    }

    /// Check if the accepting state is in the set
    pub fn is_accepting(&self, set: &SparseSet) -> bool {
        set.contains(self.accept)
    }

    /// Returns true if no transition is left unpatched.
    pub fn is_complete(&self) -> bool {
        let valid = |id: StateId| id < self.states.len();
        valid(self.start)
            && valid(self.accept)
            && self.states.iter().all(|state| match *state {
                State::Consume { next, .. } | State::Epsilon { next } => {
                    valid(next)
                }
                State::Split { out1, out2 } => valid(out1) && valid(out2),
                State::Match => true,
            })
    }
}

impl Default for NFA {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NFA(")?;
        for (id, state) in self.states.iter().enumerate() {
            let marker = if id == self.start { '>' } else { ' ' };
            write!(f, "{}{:06?}: ", marker, id)?;
            match *state {
                State::Consume { pred, next } => {
                    writeln!(f, "{} => {}", pred, next)?
                }
                State::Epsilon { next } => writeln!(f, "eps => {}", next)?,
                State::Split { out1, out2 } => {
                    writeln!(f, "split => {}, {}", out1, out2)?
                }
                State::Match => writeln!(f, "MATCH")?,
            }
        }
        write!(f, ")")
    }
}
