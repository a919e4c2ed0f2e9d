//! Search moves over keyed alphabets and cyclewords.
//!
//! The keyword moves follow the Quagmire keyspace structure: a keyed
//! alphabet is a distinct-letter prefix plus a sorted suffix, so a move
//! must either swap inside the prefix or exchange a prefix letter with a
//! suffix letter and re-insert at the sorted position.

use crate::alphabet::Alphabet;
use crate::consts::{ALPHABET_SIZE, ENGLISH_MONOGRAMS};
use fastrand::Rng;

/// Draw an index in `lo..hi` with probability proportional to the English
/// frequency of the letter stored there. Biases moves toward the letters
/// that matter most for the fitness landscape.
fn weighted_index(rng: &mut Rng, letters: &[u8; ALPHABET_SIZE], lo: usize, hi: usize) -> usize {
    let total: f64 = letters[lo..hi]
        .iter()
        .map(|&c| ENGLISH_MONOGRAMS[c as usize])
        .sum();
    if total <= 0.0 {
        return rng.usize(lo..hi);
    }

    let target = rng.f64() * total;
    let mut cumulative = 0.0;
    for (i, &c) in letters[lo..hi].iter().enumerate() {
        cumulative += ENGLISH_MONOGRAMS[c as usize];
        if cumulative > target {
            return lo + i;
        }
    }
    hi - 1
}

/// Mutate a keyed alphabet in place, preserving the keyed structure.
///
/// One move in five swaps two prefix positions; the other four exchange a
/// prefix letter with a suffix letter (both drawn frequency-weighted) and
/// re-insert the displaced letter at its sorted suffix position.
pub fn perturb_keyword(rng: &mut Rng, alphabet: &mut Alphabet, prefix_len: usize) {
    let prefix_len = prefix_len.clamp(1, ALPHABET_SIZE);
    let letters = alphabet.as_mut_slice();

    if prefix_len == ALPHABET_SIZE || rng.f64() < 0.2 {
        let i = rng.usize(0..prefix_len);
        let j = rng.usize(0..prefix_len);
        letters.swap(i, j);
        return;
    }

    let i = weighted_index(rng, letters, 0, prefix_len);
    let j = weighted_index(rng, letters, prefix_len, ALPHABET_SIZE);

    let displaced = letters[i];
    letters[i] = letters[j];

    // close the gap at j, then insert the displaced letter back into the
    // sorted suffix
    letters.copy_within(j + 1..ALPHABET_SIZE, j);
    let mut insert_at = ALPHABET_SIZE - 1;
    for k in prefix_len..ALPHABET_SIZE - 1 {
        if letters[k] > displaced {
            insert_at = k;
            break;
        }
    }
    letters.copy_within(insert_at..ALPHABET_SIZE - 1, insert_at + 1);
    letters[insert_at] = displaced;
}

/// Point mutation: overwrite one cycleword slot with a random letter.
pub fn perturb_cycleword(rng: &mut Rng, cycleword: &mut [u8]) {
    let slot = rng.usize(0..cycleword.len());
    cycleword[slot] = rng.u8(0..ALPHABET_SIZE as u8);
}

/// Fresh uniform random cycleword of the given length.
pub fn random_cycleword(rng: &mut Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.u8(0..ALPHABET_SIZE as u8)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_moves_preserve_keyed_structure() {
        let mut rng = Rng::with_seed(99);
        for prefix_len in 1..=12 {
            let mut alphabet = Alphabet::random(&mut rng, prefix_len);
            for _ in 0..5_000 {
                perturb_keyword(&mut rng, &mut alphabet, prefix_len);
                assert!(alphabet.is_permutation());
                let suffix = &alphabet.as_slice()[prefix_len..];
                assert!(
                    suffix.windows(2).all(|w| w[0] < w[1]),
                    "suffix lost sort order at prefix_len {prefix_len}: {:?}",
                    alphabet.as_slice()
                );
            }
        }
    }

    #[test]
    fn swap_outside_reaches_suffix_letters() {
        // over enough moves, letters originally outside the prefix must
        // appear inside it
        let mut rng = Rng::with_seed(3);
        let mut alphabet = Alphabet::from_keyword("ABCDE");
        let mut seen_high_letter = false;
        for _ in 0..2_000 {
            perturb_keyword(&mut rng, &mut alphabet, 5);
            if alphabet.as_slice()[..5].iter().any(|&c| c > 10) {
                seen_high_letter = true;
                break;
            }
        }
        assert!(seen_high_letter);
    }

    #[test]
    fn cycleword_mutation_changes_one_slot() {
        let mut rng = Rng::with_seed(42);
        let original = random_cycleword(&mut rng, 9);
        let mut mutated = original.clone();
        perturb_cycleword(&mut rng, &mut mutated);
        let differing = original
            .iter()
            .zip(&mutated)
            .filter(|(a, b)| a != b)
            .count();
        assert!(differing <= 1);
        assert!(mutated.iter().all(|&c| c < 26));
    }
}
