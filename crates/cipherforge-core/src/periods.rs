//! Cycleword-length estimation from columnar Index of Coincidence.
//!
//! For a trial period L the ciphertext is read as L interleaved Caesar
//! columns; periodic ciphers show an English-like IoC in every column at
//! the true period (and its multiples). Candidates are filtered by a
//! z-score against the population of all trial lengths plus an absolute
//! IoC floor, then returned best-first.

use crate::alphabet::index_of_coincidence;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodCandidate {
    pub len: usize,
    pub ioc: f64,
    pub z_score: f64,
}

/// Mean IoC over the L columns of a trial period.
pub fn mean_columnar_ioc(text: &[u8], period: usize) -> f64 {
    let mut sum = 0.0;
    let mut column = Vec::with_capacity(text.len() / period + 1);
    for k in 0..period {
        column.clear();
        column.extend(text.iter().skip(k).step_by(period));
        sum += index_of_coincidence(&column);
    }
    sum / period as f64
}

/// Scan periods 1..=max_len and return the candidates whose z-score meets
/// `sigma_threshold` and whose raw IoC meets `ioc_threshold`, sorted by
/// descending IoC (ties keep ascending length order).
///
/// The z-scores use the biased population standard deviation; when it is
/// zero every z-score is defined as zero and nothing passes the filter,
/// which the orchestrator treats as "fall back to a default range".
pub fn estimate_periods(
    text: &[u8],
    max_len: usize,
    sigma_threshold: f64,
    ioc_threshold: f64,
) -> Vec<PeriodCandidate> {
    let iocs: Vec<f64> = (1..=max_len)
        .map(|len| mean_columnar_ioc(text, len))
        .collect();

    let mean = iocs.iter().sum::<f64>() / max_len as f64;
    let variance = iocs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / max_len as f64;
    let std_dev = variance.max(0.0).sqrt();

    let mut candidates: Vec<PeriodCandidate> = iocs
        .iter()
        .enumerate()
        .filter_map(|(i, &ioc)| {
            let z_score = if std_dev > 0.0 { (ioc - mean) / std_dev } else { 0.0 };
            (z_score >= sigma_threshold && ioc >= ioc_threshold).then_some(PeriodCandidate {
                len: i + 1,
                ioc,
                z_score,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.ioc.total_cmp(&a.ioc));

    debug!(
        "Period scan 1..={}: mean IoC {:.4}, sigma {:.6}, {} candidates",
        max_len,
        mean,
        std_dev,
        candidates.len()
    );
    candidates
}
