pub mod climber;
pub mod derive;
pub mod fitness;
pub mod mutation;
pub mod runner;

pub use self::runner::{Solution, Solver};

use crate::alphabet::Alphabet;

/// One point in the search space: two alphabet permutations plus the
/// periodic key. Copied by value between the climber's best / current /
/// local slots; never aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverState {
    pub pt_alphabet: Alphabet,
    pub ct_alphabet: Alphabet,
    pub cycleword: Vec<u8>,
}

impl SolverState {
    pub fn new(pt_alphabet: Alphabet, ct_alphabet: Alphabet, cycleword: Vec<u8>) -> Self {
        Self {
            pt_alphabet,
            ct_alphabet,
            cycleword,
        }
    }

    /// Both alphabets are permutations and every cycleword letter is a
    /// valid index.
    pub fn is_feasible(&self) -> bool {
        self.pt_alphabet.is_permutation()
            && self.ct_alphabet.is_permutation()
            && !self.cycleword.is_empty()
            && self.cycleword.iter().all(|&c| (c as usize) < crate::consts::ALPHABET_SIZE)
    }
}

/// Snapshot handed to the progress callback whenever the global best
/// improves.
pub struct Improvement<'a> {
    pub score: f64,
    pub restart: usize,
    pub iteration: usize,
    pub state: &'a SolverState,
    pub decrypted: &'a [u8],
}

/// Observer for best-score improvements. Returning `false` stops the
/// search cooperatively; the solver then reports the best state found so
/// far.
pub trait ProgressCallback: Send + Sync {
    fn on_improvement(&self, improvement: &Improvement<'_>) -> bool;
}

/// Callback that never prints and never stops.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_improvement(&self, _improvement: &Improvement<'_>) -> bool {
        true
    }
}
