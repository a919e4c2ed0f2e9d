//! The orchestrator: iterate plausible (period, keyword-length,
//! keyword-length) triples, apply the cipher family's structural pruning,
//! and hand each surviving triple to the hill-climber.

use crate::alphabet::Alphabet;
use crate::cipher::CipherKind;
use crate::config::Config;
use crate::consts::FALLBACK_PERIOD_MAX;
use crate::cribs::CribSet;
use crate::error::{FcResult, ForgeError};
use crate::ngram::NgramModel;
use crate::periods;
use crate::solver::climber::Climber;
use crate::solver::fitness::Fitness;
use crate::solver::{ProgressCallback, SolverState};
use tracing::{debug, info};

/// The best state found over the whole triple scan, plus its final
/// decryption.
#[derive(Debug, Clone)]
pub struct Solution {
    pub score: f64,
    pub period: usize,
    pub pt_keyword_len: usize,
    pub ct_keyword_len: usize,
    pub state: SolverState,
    pub plaintext: Vec<u8>,
}

pub struct Solver<'a> {
    pub kind: CipherKind,
    pub config: &'a Config,
    pub ngram: &'a NgramModel,
    pub cribs: &'a CribSet,
}

impl Solver<'_> {
    /// Count of distinct letters in a user keyword; this is the prefix
    /// length of the keyed alphabet it generates.
    fn distinct_len(keyword: &str) -> usize {
        let mut seen = [false; 26];
        let mut count = 0;
        for ch in keyword.chars() {
            let upper = ch.to_ascii_uppercase();
            if upper.is_ascii_uppercase() && !seen[(upper as u8 - b'A') as usize] {
                seen[(upper as u8 - b'A') as usize] = true;
                count += 1;
            }
        }
        count
    }

    /// Period candidates, best first. Autokey primers carry no periodic
    /// signature, so their lengths are brute-forced over the whole range;
    /// a fixed `--cyclewordlen` bypasses estimation entirely.
    fn period_candidates(&self, ciphertext: &[u8]) -> Vec<usize> {
        let limits = &self.config.limits;
        if let Some(len) = limits.cycleword_len {
            return vec![len];
        }
        if self.kind.is_autokey() {
            return (1..=limits.max_cycleword_len).collect();
        }

        let candidates = periods::estimate_periods(
            ciphertext,
            limits.max_cycleword_len,
            self.config.search.sigma_threshold,
            self.config.search.ioc_threshold,
        );
        if candidates.is_empty() {
            debug!(
                "no period above threshold, falling back to 1..={}",
                FALLBACK_PERIOD_MAX
            );
            (1..=FALLBACK_PERIOD_MAX).collect()
        } else {
            candidates.into_iter().map(|c| c.len).collect()
        }
    }

    /// Plaintext-keyword prefix lengths to scan for this cipher. When only
    /// one alphabet is keyed (Quagmire I/II families) the free side scans
    /// from length 1; when both are keyed the configured minimum applies.
    fn pt_keyword_lens(&self, user_pt: Option<&str>) -> Vec<usize> {
        if !self.kind.uses_keyed_pt() {
            return vec![1];
        }
        if let Some(keyword) = user_pt {
            return vec![Self::distinct_len(keyword)];
        }
        let limits = &self.config.limits;
        if let Some(fixed) = limits.fixed_pt_len() {
            return vec![fixed];
        }
        let min = if self.kind.uses_keyed_ct() {
            limits.min_keyword_len
        } else {
            1
        };
        (min..limits.max_keyword_len).collect()
    }

    fn ct_keyword_lens(&self, user_ct: Option<&str>) -> Vec<usize> {
        if !self.kind.uses_keyed_ct() {
            return vec![1];
        }
        if let Some(keyword) = user_ct {
            return vec![Self::distinct_len(keyword)];
        }
        let limits = &self.config.limits;
        if let Some(fixed) = limits.fixed_ct_len() {
            return vec![fixed];
        }
        let min = if self.kind.uses_keyed_pt() {
            limits.min_keyword_len
        } else {
            1
        };
        (min..limits.max_keyword_len).collect()
    }

    /// Run the search. Deterministic for a fixed seed; the callback can
    /// stop it cooperatively between improvements.
    pub fn solve(
        &self,
        ciphertext: &[u8],
        seed: Option<u64>,
        callback: &dyn ProgressCallback,
    ) -> FcResult<Solution> {
        if ciphertext.is_empty() {
            return Err(ForgeError::Validation("empty ciphertext".into()));
        }

        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let user_pt_str = self.config.plaintext_keyword.as_deref();
        let user_ct_str = self.config.ciphertext_keyword.as_deref();
        let user_pt = user_pt_str.map(Alphabet::from_keyword);
        let user_ct = user_ct_str.map(Alphabet::from_keyword);

        let periods = self.period_candidates(ciphertext);
        let pt_lens = self.pt_keyword_lens(user_pt_str);
        let ct_lens = self.ct_keyword_lens(user_ct_str);

        info!(
            "Attacking {} over {} period candidate(s)",
            self.kind.name(),
            periods.len()
        );

        let climber = Climber {
            kind: self.kind,
            config: self.config,
            ciphertext,
            cribs: self.cribs,
            fitness: Fitness {
                kind: self.kind,
                variant: self.config.variant,
                ngram: self.ngram,
                cribs: self.cribs,
                weights: self.config.weights,
            },
            user_pt,
            user_ct,
        };

        let mut best: Option<Solution> = None;
        let mut stop = false;

        'periods: for &period in &periods {
            if self.kind.is_periodic() && !self.cribs.compatible_with_period(ciphertext, period) {
                debug!("period {period} contradicts the cribs, skipped");
                continue;
            }

            for &pt_len in &pt_lens {
                for &ct_len in &ct_lens {
                    if self.kind.shares_alphabets() && pt_len != ct_len {
                        continue;
                    }

                    debug!("triple: period {period}, keyword lengths {pt_len}/{ct_len}");
                    let outcome = climber.run(&mut rng, period, pt_len, ct_len, callback);

                    if let Some(state) = outcome.state {
                        let improved = best
                            .as_ref()
                            .map_or(true, |solution| outcome.score > solution.score);
                        if improved {
                            let plaintext = self.kind.decrypt(
                                ciphertext,
                                &state.pt_alphabet,
                                &state.ct_alphabet,
                                &state.cycleword,
                                self.config.variant,
                            );
                            best = Some(Solution {
                                score: outcome.score,
                                period,
                                pt_keyword_len: pt_len,
                                ct_keyword_len: ct_len,
                                state,
                                plaintext,
                            });
                        }
                    }

                    if outcome.stop_requested {
                        stop = true;
                        break 'periods;
                    }
                }
            }
        }

        if stop {
            info!("search stopped by callback");
        }

        best.ok_or_else(|| {
            ForgeError::Validation(
                "search produced no candidate (all periods contradicted the cribs?)".into(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::text_to_indices;
    use crate::cipher::AutokeySub;
    use crate::config::SearchParams;
    use crate::ngram::NgramModel;
    use crate::solver::SilentProgress;

    fn model() -> NgramModel {
        NgramModel::from_counts(2, [("TH", 900u64), ("HE", 700), ("IN", 600)]).unwrap()
    }

    #[test]
    fn empty_ciphertext_is_an_input_error() {
        let config = Config::default();
        let model = model();
        let cribs = CribSet::empty();
        let solver = Solver {
            kind: CipherKind::Vigenere,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        assert!(solver.solve(&[], Some(1), &SilentProgress).is_err());
    }

    #[test]
    fn straight_alphabet_ciphers_scan_only_unit_keyword_lengths() {
        let config = Config::default();
        let model = model();
        let cribs = CribSet::empty();
        for kind in [
            CipherKind::Vigenere,
            CipherKind::Beaufort,
            CipherKind::Porta,
            CipherKind::Autokey(AutokeySub::Straight),
        ] {
            let solver = Solver {
                kind,
                config: &config,
                ngram: &model,
                cribs: &cribs,
            };
            assert_eq!(solver.pt_keyword_lens(None), vec![1]);
            assert_eq!(solver.ct_keyword_lens(None), vec![1]);
        }
    }

    #[test]
    fn quagmire_pruning_matches_family_structure() {
        let config = Config::default();
        let model = model();
        let cribs = CribSet::empty();

        let q1 = Solver {
            kind: CipherKind::Quagmire1,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        assert_eq!(q1.ct_keyword_lens(None), vec![1]);
        assert_eq!(q1.pt_keyword_lens(None), (1..12).collect::<Vec<_>>());

        let q4 = Solver {
            kind: CipherKind::Quagmire4,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        assert_eq!(q4.pt_keyword_lens(None), (5..12).collect::<Vec<_>>());
        assert_eq!(q4.ct_keyword_lens(None), (5..12).collect::<Vec<_>>());

        let q2 = Solver {
            kind: CipherKind::Quagmire2,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        assert_eq!(q2.pt_keyword_lens(None), vec![1]);

        let q1_fixed = Solver {
            kind: CipherKind::Quagmire1,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        assert_eq!(q1_fixed.pt_keyword_lens(Some("WILLIAM")), vec![5]);
    }

    #[test]
    fn fixed_cycleword_len_bypasses_estimation(){
        let config = Config {
            limits: crate::config::LengthLimits {
                cycleword_len: Some(9),
                ..Default::default()
            },
            ..Default::default()
        };
        let model = model();
        let cribs = CribSet::empty();
        let solver = Solver {
            kind: CipherKind::Quagmire3,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        let ct = text_to_indices("ABCDEFGHIJ").unwrap();
        assert_eq!(solver.period_candidates(&ct), vec![9]);
    }

    #[test]
    fn degenerate_ioc_falls_back_to_default_range() {
        let config = Config::default();
        let model = model();
        let cribs = CribSet::empty();
        let solver = Solver {
            kind: CipherKind::Vigenere,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        // constant text: sigma of the period scores is zero
        let ct = vec![0u8; 100];
        assert_eq!(
            solver.period_candidates(&ct),
            (1..=FALLBACK_PERIOD_MAX).collect::<Vec<_>>()
        );
    }

    #[test]
    fn autokey_brute_forces_primer_lengths() {
        let config = Config::default();
        let model = model();
        let cribs = CribSet::empty();
        let solver = Solver {
            kind: CipherKind::Autokey(AutokeySub::Quagmire1),
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        let ct = text_to_indices("ABCDEFGHIJ").unwrap();
        assert_eq!(solver.period_candidates(&ct), (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn solves_a_trivial_vigenere_with_everything_pinned() {
        // sanity: fixed period, derivation on, one restart
        let plain = text_to_indices(
            "ITISATRUTHUNIVERSALLYACKNOWLEDGEDTHATASINGLEMANINPOSSESSIONOFAGOOD\
             FORTUNEMUSTBEINWANTOFAWIFEHOWEVERLITTLEKNOWNTHEFEELINGSORVIEWSOFSU\
             CHAMANMAYBEONHISFIRSTENTERINGANEIGHBOURHOODTHISTRUTHISSOWELLFIXEDI\
             NTHEMINDSOFTHESURROUNDINGFAMILIES",
        )
        .unwrap();
        let key = text_to_indices("CAB").unwrap();
        let straight = Alphabet::straight();
        let ct = CipherKind::Vigenere.encrypt(&plain, &straight, &straight, &key, false);

        let config = Config {
            search: SearchParams {
                n_hill_climbs: 3,
                n_restarts: 1,
                ..Default::default()
            },
            limits: crate::config::LengthLimits {
                cycleword_len: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        let model = model();
        let cribs = CribSet::empty();
        let solver = Solver {
            kind: CipherKind::Vigenere,
            config: &config,
            ngram: &model,
            cribs: &cribs,
        };
        let solution = solver.solve(&ct, Some(7), &SilentProgress).unwrap();
        assert_eq!(solution.plaintext, plain);
        assert_eq!(solution.state.cycleword, key);
    }
}
