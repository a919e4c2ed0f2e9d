//! Composite fitness over a decrypted candidate.

use crate::alphabet::{entropy, index_of_coincidence};
use crate::cipher::{autokey, tableau, CipherKind};
use crate::config::ScoreWeights;
use crate::consts::{ALPHABET_SIZE, ENGLISH_ENTROPY, ENGLISH_IOC_SCALED};
use crate::cribs::CribSet;
use crate::ngram::NgramModel;
use crate::solver::SolverState;

/// Scoring context shared across one climb: the cipher, the language
/// model and the cribs, plus the component weights.
pub struct Fitness<'a> {
    pub kind: CipherKind,
    pub variant: bool,
    pub ngram: &'a NgramModel,
    pub cribs: &'a CribSet,
    pub weights: ScoreWeights,
}

impl Fitness<'_> {
    /// Decrypt `ciphertext` under `state` into the caller-owned buffers
    /// and score the result. Pure in its inputs: identical state and
    /// ciphertext give bit-identical output.
    pub fn score_state(
        &self,
        ciphertext: &[u8],
        state: &SolverState,
        decrypted: &mut Vec<u8>,
        keystream: &mut Vec<u8>,
    ) -> f64 {
        self.decrypt_into(ciphertext, state, decrypted, keystream);
        self.score_decrypted(decrypted)
    }

    pub fn decrypt_into(
        &self,
        ciphertext: &[u8],
        state: &SolverState,
        decrypted: &mut Vec<u8>,
        keystream: &mut Vec<u8>,
    ) {
        match self.kind {
            CipherKind::Beaufort => {
                tableau::beaufort_into(decrypted, ciphertext, &state.cycleword)
            }
            CipherKind::Porta => tableau::porta_into(decrypted, ciphertext, &state.cycleword),
            CipherKind::Autokey(sub) => autokey::decrypt_into(
                decrypted,
                keystream,
                sub,
                ciphertext,
                &state.pt_alphabet,
                &state.ct_alphabet,
                &state.cycleword,
            ),
            _ => tableau::quagmire_decrypt_into(
                decrypted,
                ciphertext,
                &state.pt_alphabet,
                &state.ct_alphabet,
                &state.cycleword,
                self.variant,
            ),
        }
    }

    /// Weighted mix of the component scores, normalised by the sum of the
    /// participating weights. Without cribs (and with the IoC/entropy
    /// weights at their zero defaults) this collapses to the raw n-gram
    /// score, which is the quantity the climber actually needs.
    pub fn score_decrypted(&self, decrypted: &[u8]) -> f64 {
        let w = &self.weights;
        let ngram_score = self.ngram.score(decrypted);

        if self.cribs.is_empty() && w.ioc == 0.0 && w.entropy == 0.0 {
            return ngram_score;
        }

        let mut numerator = w.ngram * ngram_score;
        let mut denominator = w.ngram;

        if !self.cribs.is_empty() {
            numerator += w.crib * self.cribs.match_ratio(decrypted);
            denominator += w.crib;
        }
        if w.ioc != 0.0 {
            let scaled = ALPHABET_SIZE as f64 * index_of_coincidence(decrypted);
            numerator += w.ioc / (1.0 + (scaled - ENGLISH_IOC_SCALED).powi(2));
            denominator += w.ioc;
        }
        if w.entropy != 0.0 {
            numerator += w.entropy / (1.0 + (entropy(decrypted) - ENGLISH_ENTROPY).powi(2));
            denominator += w.entropy;
        }

        numerator / denominator
    }
}
