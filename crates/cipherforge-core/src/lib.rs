pub mod alphabet;
pub mod cipher;
pub mod config;
pub mod consts;
pub mod cribs;
pub mod dict;
pub mod error;
pub mod ngram;
pub mod periods;
pub mod solver;

pub use crate::cipher::{AutokeySub, CipherKind};
pub use crate::error::{FcResult, ForgeError};
pub use crate::solver::{Solution, Solver, SolverState};
