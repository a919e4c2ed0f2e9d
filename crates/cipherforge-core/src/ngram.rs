use crate::consts::{ALPHABET_SIZE, MAX_NGRAM_SIZE};
use crate::error::{FcResult, ForgeError};
use std::path::Path;
use tracing::debug;

/// English n-gram statistics table.
///
/// The table holds one entry per possible n-gram (26^n in total), indexed
/// by `sum(gram[i] * 26^i)`. Raw counts are stored as `ln(1 + count)` and
/// normalised so the entries sum to 1; grams absent from the source file
/// contribute zero, so the score never underflows.
pub struct NgramModel {
    n: usize,
    data: Vec<f32>,
}

impl NgramModel {
    /// Load a tab-separated `GRAM\tCOUNT` table.
    pub fn load<P: AsRef<Path>>(path: P, n: usize) -> FcResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut entries = Vec::new();
        for record in reader.records().flatten() {
            if record.len() < 2 {
                continue;
            }
            let gram = record[0].trim().to_string();
            if let Ok(count) = record[1].trim().parse::<u64>() {
                entries.push((gram, count));
            }
        }

        let model = Self::from_counts(n, entries.iter().map(|(g, c)| (g.as_str(), *c)))?;
        debug!(
            "Loaded {} {}-grams from {:?} ({} table entries)",
            entries.len(),
            n,
            path,
            model.data.len()
        );
        Ok(model)
    }

    /// Build a table from `(gram, count)` pairs. Grams of the wrong length
    /// or containing non-alphabetic characters are rejected.
    pub fn from_counts<'a, I>(n: usize, counts: I) -> FcResult<Self>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        if n == 0 || n > MAX_NGRAM_SIZE {
            return Err(ForgeError::Config(format!(
                "ngram size must be in 1..={MAX_NGRAM_SIZE}, got {n}"
            )));
        }

        let mut data = vec![0f32; ALPHABET_SIZE.pow(n as u32)];
        for (gram, count) in counts {
            let idx = Self::index_str(gram, n).ok_or_else(|| {
                ForgeError::Validation(format!("bad {n}-gram '{gram}' in table"))
            })?;
            data[idx] = count as f32;
        }

        let mut total = 0f64;
        for entry in data.iter_mut() {
            *entry = (1.0 + *entry).ln();
            total += *entry as f64;
        }
        if total <= 0.0 {
            return Err(ForgeError::Validation("ngram table is empty".into()));
        }
        for entry in data.iter_mut() {
            *entry = (*entry as f64 / total) as f32;
        }

        Ok(NgramModel { n, data })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Sum of all table entries (1.0 up to rounding, after normalisation).
    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Table index of an n-gram given as letter indices.
    #[inline(always)]
    pub fn index(gram: &[u8]) -> usize {
        let mut index = 0usize;
        let mut base = 1usize;
        for &g in gram {
            index += g as usize * base;
            base *= ALPHABET_SIZE;
        }
        index
    }

    fn index_str(gram: &str, n: usize) -> Option<usize> {
        if gram.len() != n {
            return None;
        }
        let mut index = 0usize;
        let mut base = 1usize;
        for ch in gram.chars() {
            let upper = ch.to_ascii_uppercase();
            if !upper.is_ascii_uppercase() {
                return None;
            }
            index += (upper as u8 - b'A') as usize * base;
            base *= ALPHABET_SIZE;
        }
        Some(index)
    }

    /// Log-likelihood style score of a decrypted text: the sum of table
    /// entries over every window, scaled by 26^n / (len - n).
    pub fn score(&self, text: &[u8]) -> f64 {
        let n = self.n;
        if text.len() <= n {
            return 0.0;
        }
        let mut sum = 0f64;
        for window in text.windows(n) {
            sum += self.data[Self::index(window)] as f64;
        }
        (ALPHABET_SIZE.pow(n as u32) as f64) * sum / (text.len() - n) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_normalises_to_one() {
        let model =
            NgramModel::from_counts(2, [("TH", 100u64), ("HE", 80), ("QZ", 1)]).unwrap();
        assert!((model.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn index_is_little_endian_base_26() {
        // "AB" -> 0 + 1*26
        assert_eq!(NgramModel::index(&[0, 1]), 26);
        assert_eq!(NgramModel::index(&[1, 0]), 1);
    }

    #[test]
    fn frequent_grams_score_higher() {
        let model =
            NgramModel::from_counts(2, [("TH", 5000u64), ("XQ", 1)]).unwrap();
        let th = model.score(&[19, 7, 19, 7]);
        let xq = model.score(&[23, 16, 23, 16]);
        assert!(th > xq);
    }

    #[test]
    fn rejects_oversized_n() {
        assert!(NgramModel::from_counts(9, [("A", 1u64)]).is_err());
    }
}
