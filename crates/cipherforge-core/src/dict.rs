//! Dictionary word-count report over recovered plaintext.

use crate::consts::MIN_DICT_WORD_LEN;
use crate::error::FcResult;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A word list used only for reporting: after a solve, the plaintext is
/// scanned for embedded dictionary words as a human-readable sanity
/// signal. Words are grouped by length so the scan tries each window
/// length against a set.
pub struct Dictionary {
    by_len: Vec<HashSet<String>>,
    n_words: usize,
}

impl Dictionary {
    pub fn load<P: AsRef<Path>>(path: P) -> FcResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut by_len: Vec<HashSet<String>> = Vec::new();
        let mut n_words = 0;

        for line in BufReader::new(file).lines() {
            let word = line?.trim().to_ascii_uppercase();
            if word.len() < MIN_DICT_WORD_LEN || !word.bytes().all(|b| b.is_ascii_uppercase()) {
                continue;
            }
            if by_len.len() <= word.len() {
                by_len.resize_with(word.len() + 1, HashSet::new);
            }
            if by_len[word.len()].insert(word) {
                n_words += 1;
            }
        }

        debug!("Loaded {} dictionary words", n_words);
        Ok(Dictionary { by_len, n_words })
    }

    pub fn n_words(&self) -> usize {
        self.n_words
    }

    fn max_word_len(&self) -> usize {
        self.by_len.len().saturating_sub(1)
    }

    /// Every dictionary word embedded anywhere in `plaintext`, in order of
    /// first occurrence. Overlaps are counted separately; the same word
    /// found at two positions appears twice, as in the original report.
    pub fn find_words(&self, plaintext: &str) -> Vec<String> {
        let text = plaintext.as_bytes();
        let mut found = Vec::new();

        for start in 0..text.len().saturating_sub(MIN_DICT_WORD_LEN - 1) {
            let longest = self.max_word_len().min(text.len() - start);
            for word_len in MIN_DICT_WORD_LEN..=longest {
                let fragment = &plaintext[start..start + word_len];
                if self.by_len[word_len].contains(fragment) {
                    found.push(fragment.to_string());
                }
            }
        }
        found
    }
}
