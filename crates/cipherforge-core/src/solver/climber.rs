//! The "slippery shotgun" hill-climber: an outer restart loop that either
//! backtracks to the best known state or re-rolls a random one, and an
//! inner loop that mutates, optionally re-derives the cycleword, scores,
//! and accepts on strict improvement (or with a small slip probability to
//! escape local maxima).

use crate::alphabet::Alphabet;
use crate::cipher::{AutokeySub, CipherKind};
use crate::config::Config;
use crate::consts::ALPHABET_SIZE;
use crate::cribs::CribSet;
use crate::solver::derive::derive_optimal_cycleword;
use crate::solver::fitness::Fitness;
use crate::solver::mutation;
use crate::solver::{Improvement, ProgressCallback, SolverState};

pub struct ClimbOutcome {
    pub score: f64,
    pub state: Option<SolverState>,
    /// Set when the callback asked the whole search to stop.
    pub stop_requested: bool,
}

pub(crate) struct Climber<'a> {
    pub kind: CipherKind,
    pub config: &'a Config,
    pub ciphertext: &'a [u8],
    pub cribs: &'a CribSet,
    pub fitness: Fitness<'a>,
    pub user_pt: Option<Alphabet>,
    pub user_ct: Option<Alphabet>,
}

/// Which keyword(s) a mutation step may touch for a given cipher.
fn quagmire_family(kind: CipherKind) -> Option<CipherKind> {
    match kind {
        CipherKind::Autokey(AutokeySub::Quagmire1) => Some(CipherKind::Quagmire1),
        CipherKind::Autokey(AutokeySub::Quagmire2) => Some(CipherKind::Quagmire2),
        CipherKind::Autokey(AutokeySub::Quagmire3) => Some(CipherKind::Quagmire3),
        CipherKind::Autokey(AutokeySub::Quagmire4) => Some(CipherKind::Quagmire4),
        CipherKind::Quagmire1
        | CipherKind::Quagmire2
        | CipherKind::Quagmire3
        | CipherKind::Quagmire4 => Some(kind),
        _ => None,
    }
}

impl Climber<'_> {
    /// Run the full restart schedule for one (period, W_pt, W_ct) triple.
    pub fn run(
        &self,
        rng: &mut fastrand::Rng,
        period: usize,
        pt_keyword_len: usize,
        ct_keyword_len: usize,
        callback: &dyn ProgressCallback,
    ) -> ClimbOutcome {
        let search = &self.config.search;
        let optimal = search.optimal_cycleword() && self.kind.is_periodic();
        let is_quagmire = quagmire_family(self.kind).is_some();

        let mut best_score = 0.0f64;
        let mut best: Option<SolverState> = None;
        let mut stop_requested = false;

        let mut decrypted: Vec<u8> = Vec::with_capacity(self.ciphertext.len());
        let mut keystream: Vec<u8> = Vec::with_capacity(self.ciphertext.len() + period);

        'restarts: for restart in 0..search.n_restarts {
            let mut current;
            let mut current_score;

            match &best {
                Some(state) if best_score > 0.0 && rng.f64() < search.backtrack_prob => {
                    current = state.clone();
                    current_score = best_score;
                }
                _ => {
                    current = self.random_state(rng, period, pt_keyword_len, ct_keyword_len);
                    if self.config.same_key {
                        apply_same_key(&mut current);
                    }
                    if optimal {
                        derive_optimal_cycleword(
                            self.kind,
                            self.ciphertext,
                            &current.pt_alphabet,
                            &current.ct_alphabet,
                            &mut current.cycleword,
                            self.config.variant,
                        );
                    }
                    current_score = self.fitness.score_state(
                        self.ciphertext,
                        &current,
                        &mut decrypted,
                        &mut keystream,
                    );
                }
            }

            // Seed the best slot so the climb always returns a feasible
            // state even when no candidate ever scores above zero.
            if best.is_none() {
                best = Some(current.clone());
                best_score = current_score;
            }

            let mut local = current.clone();
            let mut must_perturb_keyword = true;

            for iteration in 0..search.n_hill_climbs {
                local.clone_from(&current);

                // keyword move?
                let keyword_eligible = !matches!(
                    self.kind,
                    CipherKind::Beaufort
                        | CipherKind::Autokey(AutokeySub::Straight)
                        | CipherKind::Autokey(AutokeySub::Beaufort)
                        | CipherKind::Autokey(AutokeySub::Porta)
                );
                let mut did_perturb_keyword = false;
                if keyword_eligible
                    && (must_perturb_keyword
                        || self.kind.is_autokey()
                        || rng.f64() < search.keyword_perm_prob)
                {
                    did_perturb_keyword =
                        self.perturb_keywords(rng, &mut local, pt_keyword_len, ct_keyword_len);
                }

                if optimal {
                    // The cycleword is never random here: if the keyword did
                    // not move this iteration, force a move so consecutive
                    // iterations do not re-score the same state.
                    if !did_perturb_keyword && is_quagmire {
                        did_perturb_keyword =
                            self.perturb_keywords(rng, &mut local, pt_keyword_len, ct_keyword_len);
                    }
                    derive_optimal_cycleword(
                        self.kind,
                        self.ciphertext,
                        &local.pt_alphabet,
                        &local.ct_alphabet,
                        &mut local.cycleword,
                        self.config.variant,
                    );
                } else {
                    if matches!(self.kind, CipherKind::Vigenere | CipherKind::Porta)
                        || self.kind.is_autokey()
                        || !did_perturb_keyword
                    {
                        mutation::perturb_cycleword(rng, &mut local.cycleword);
                    }

                    if is_quagmire && self.kind.is_periodic() {
                        must_perturb_keyword = false;
                        if did_perturb_keyword
                            && self.cribs.constrain_cycleword(
                                self.ciphertext,
                                &local.pt_alphabet,
                                &local.ct_alphabet,
                                &mut local.cycleword,
                                self.config.variant,
                            )
                        {
                            // keyword contradicts the cribs: reject the
                            // candidate and force a keyword move next time
                            must_perturb_keyword = true;
                            continue;
                        }
                    }
                }

                if self.config.same_key {
                    apply_same_key(&mut local);
                }

                let local_score = self.fitness.score_state(
                    self.ciphertext,
                    &local,
                    &mut decrypted,
                    &mut keystream,
                );

                if local_score > current_score {
                    std::mem::swap(&mut current, &mut local);
                    current_score = local_score;
                } else if rng.f64() < search.slip_prob {
                    std::mem::swap(&mut current, &mut local);
                    current_score = local_score;
                }

                if current_score > best_score {
                    best_score = current_score;
                    best = Some(current.clone());

                    self.fitness.decrypt_into(
                        self.ciphertext,
                        &current,
                        &mut decrypted,
                        &mut keystream,
                    );
                    let keep_going = callback.on_improvement(&Improvement {
                        score: best_score,
                        restart,
                        iteration,
                        state: &current,
                        decrypted: &decrypted,
                    });
                    if !keep_going {
                        stop_requested = true;
                        break 'restarts;
                    }
                }
            }
        }

        ClimbOutcome {
            score: best_score,
            state: best,
            stop_requested,
        }
    }

    /// Draw a fresh state respecting the cipher's alphabet constraints and
    /// any user-fixed keywords.
    fn random_state(
        &self,
        rng: &mut fastrand::Rng,
        period: usize,
        pt_keyword_len: usize,
        ct_keyword_len: usize,
    ) -> SolverState {
        let straight = Alphabet::straight;
        let (pt_alphabet, ct_alphabet) = match quagmire_family(self.kind) {
            Some(CipherKind::Quagmire1) => (
                self.user_pt
                    .unwrap_or_else(|| Alphabet::random(rng, pt_keyword_len)),
                straight(),
            ),
            Some(CipherKind::Quagmire2) => (
                straight(),
                self.user_ct
                    .unwrap_or_else(|| Alphabet::random(rng, ct_keyword_len)),
            ),
            Some(CipherKind::Quagmire3) => {
                let shared = self
                    .user_pt
                    .or(self.user_ct)
                    .unwrap_or_else(|| Alphabet::random(rng, pt_keyword_len));
                (shared, shared)
            }
            Some(CipherKind::Quagmire4) => (
                self.user_pt
                    .unwrap_or_else(|| Alphabet::random(rng, pt_keyword_len)),
                self.user_ct
                    .unwrap_or_else(|| Alphabet::random(rng, ct_keyword_len)),
            ),
            _ => (straight(), straight()),
        };

        SolverState::new(
            pt_alphabet,
            ct_alphabet,
            mutation::random_cycleword(rng, period),
        )
    }

    /// Apply the cipher's keyword move to `state`. Returns whether any
    /// keyword actually changed (user-fixed keywords never move).
    fn perturb_keywords(
        &self,
        rng: &mut fastrand::Rng,
        state: &mut SolverState,
        pt_keyword_len: usize,
        ct_keyword_len: usize,
    ) -> bool {
        match quagmire_family(self.kind) {
            Some(CipherKind::Quagmire1) => {
                if self.user_pt.is_some() {
                    return false;
                }
                mutation::perturb_keyword(rng, &mut state.pt_alphabet, pt_keyword_len);
                true
            }
            Some(CipherKind::Quagmire2) => {
                if self.user_ct.is_some() {
                    return false;
                }
                mutation::perturb_keyword(rng, &mut state.ct_alphabet, ct_keyword_len);
                true
            }
            Some(CipherKind::Quagmire3) => {
                if self.user_pt.is_some() || self.user_ct.is_some() {
                    return false;
                }
                mutation::perturb_keyword(rng, &mut state.pt_alphabet, pt_keyword_len);
                state.ct_alphabet = state.pt_alphabet;
                true
            }
            Some(CipherKind::Quagmire4) => match (self.user_pt.is_some(), self.user_ct.is_some()) {
                (true, true) => false,
                (true, false) => {
                    mutation::perturb_keyword(rng, &mut state.ct_alphabet, ct_keyword_len);
                    true
                }
                (false, true) => {
                    mutation::perturb_keyword(rng, &mut state.pt_alphabet, pt_keyword_len);
                    true
                }
                (false, false) => {
                    if rng.f64() < 0.5 {
                        mutation::perturb_keyword(rng, &mut state.pt_alphabet, pt_keyword_len);
                    } else {
                        mutation::perturb_keyword(rng, &mut state.ct_alphabet, ct_keyword_len);
                    }
                    true
                }
            },
            _ => false,
        }
    }
}

/// `--samekey`: collapse the state onto a single keyed alphabet used as
/// PT alphabet, CT alphabet and cycleword alike. The cycleword becomes
/// the full 26-letter alphabet, so the effective period is the whole
/// alphabet.
fn apply_same_key(state: &mut SolverState) {
    state.ct_alphabet = state.pt_alphabet;
    state.cycleword.clear();
    state
        .cycleword
        .extend_from_slice(&state.ct_alphabet.as_slice()[..ALPHABET_SIZE]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::text_to_indices;
    use crate::config::Config;
    use crate::ngram::NgramModel;
    use crate::solver::SilentProgress;

    fn tiny_model() -> NgramModel {
        NgramModel::from_counts(2, [("TH", 900u64), ("HE", 700), ("IN", 600), ("ER", 500)])
            .unwrap()
    }

    #[test]
    fn best_state_is_always_feasible() {
        let model = tiny_model();
        let cribs = CribSet::empty();
        let config = Config {
            search: crate::config::SearchParams {
                n_hill_climbs: 300,
                n_restarts: 3,
                stochastic_cycle: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let ciphertext = text_to_indices("ZEBRASNOWFLAKEMOUNTAINRIVERCLOUDSTONE").unwrap();

        for kind in [
            CipherKind::Vigenere,
            CipherKind::Beaufort,
            CipherKind::Porta,
            CipherKind::Quagmire1,
            CipherKind::Quagmire3,
            CipherKind::Quagmire4,
            CipherKind::Autokey(AutokeySub::Straight),
            CipherKind::Autokey(AutokeySub::Quagmire2),
        ] {
            let climber = Climber {
                kind,
                config: &config,
                ciphertext: &ciphertext,
                cribs: &cribs,
                fitness: Fitness {
                    kind,
                    variant: false,
                    ngram: &model,
                    cribs: &cribs,
                    weights: config.weights,
                },
                user_pt: None,
                user_ct: None,
            };
            let mut rng = fastrand::Rng::with_seed(5);
            let outcome = climber.run(&mut rng, 5, 5, 5, &SilentProgress);
            let state = outcome.state.expect("climb should find some state");
            assert!(state.is_feasible(), "infeasible state for {kind:?}");
            assert!(outcome.score.is_finite());
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let model = tiny_model();
        let cribs = CribSet::empty();
        let config = Config {
            search: crate::config::SearchParams {
                n_hill_climbs: 200,
                n_restarts: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let ciphertext = text_to_indices("QWERTYUIOPASDFGHJKLZXCVBNMQWERTYUIOP").unwrap();

        let run = || {
            let climber = Climber {
                kind: CipherKind::Quagmire3,
                config: &config,
                ciphertext: &ciphertext,
                cribs: &cribs,
                fitness: Fitness {
                    kind: CipherKind::Quagmire3,
                    variant: false,
                    ngram: &model,
                    cribs: &cribs,
                    weights: config.weights,
                },
                user_pt: None,
                user_ct: None,
            };
            let mut rng = fastrand::Rng::with_seed(4242);
            let outcome = climber.run(&mut rng, 4, 5, 5, &SilentProgress);
            (outcome.score, outcome.state)
        };

        let (score_a, state_a) = run();
        let (score_b, state_b) = run();
        assert_eq!(score_a, score_b);
        assert_eq!(state_a, state_b);
    }
}
