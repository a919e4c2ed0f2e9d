//! Closed-form cycleword recovery for periodic ciphers.
//!
//! For fixed alphabets each column of the period is a simple
//! substitution, so the key character for a column can be solved
//! exhaustively: decrypt the column under each of the 26 candidates and
//! keep the one whose letter distribution correlates best with English
//! monogram frequencies. This removes the cycleword dimension from the
//! stochastic search entirely.

use crate::alphabet::Alphabet;
use crate::cipher::{tableau, CipherKind};
use crate::consts::{ALPHABET_SIZE, ENGLISH_MONOGRAMS};

const A: u8 = ALPHABET_SIZE as u8;

/// Overwrite `cycleword` with the per-column argmax of
/// `sum(column_counts[letter] * english_monograms[letter]) / column_len`.
///
/// The candidate `s` ranges over positions in the ciphertext alphabet and
/// the stored slot value is the *character* `ct_alphabet[s]`, which is
/// what the decrypt rule looks up; for straight alphabets the two
/// coincide. Not applicable to autokey ciphers (their key stream is
/// aperiodic), which the climber guards against.
pub fn derive_optimal_cycleword(
    kind: CipherKind,
    ciphertext: &[u8],
    pt_alphabet: &Alphabet,
    ct_alphabet: &Alphabet,
    cycleword: &mut [u8],
    variant: bool,
) {
    debug_assert!(kind.is_periodic());

    let ct_pos = ct_alphabet.inverse();
    let period = cycleword.len();

    for (column, slot) in cycleword.iter_mut().enumerate() {
        let mut best_score = -1.0f64;
        let mut best_shift = 0u8;

        for shift in 0..A {
            let mut counts = [0u32; ALPHABET_SIZE];
            let mut total = 0u32;

            for &c in ciphertext.iter().skip(column).step_by(period) {
                let plain = match kind {
                    CipherKind::Porta => tableau::porta_char(c, shift),
                    CipherKind::Beaufort => tableau::beaufort_char(c, shift),
                    _ => {
                        let p = ct_pos[c as usize];
                        let d = if variant {
                            (p + shift) % A
                        } else {
                            (p + A - shift) % A
                        };
                        pt_alphabet.letter_at(d as usize)
                    }
                };
                counts[plain as usize] += 1;
                total += 1;
            }

            if total == 0 {
                continue;
            }
            let score = counts
                .iter()
                .zip(ENGLISH_MONOGRAMS.iter())
                .map(|(&f, &e)| f as f64 * e)
                .sum::<f64>()
                / total as f64;

            if score > best_score {
                best_score = score;
                best_shift = shift;
            }
        }

        *slot = ct_alphabet.letter_at(best_shift as usize);
    }
}
