/// Number of letters in the cipher alphabet (A-Z).
pub const ALPHABET_SIZE: usize = 26;

/// Upper bound on the n-gram order the table loader accepts.
/// A 26^n f32 table for n = 5 is ~47 MB; anything larger is a config error.
pub const MAX_NGRAM_SIZE: usize = 5;

/// Period range the orchestrator falls back to when IoC estimation
/// returns no candidates.
pub const FALLBACK_PERIOD_MAX: usize = 15;

/// Minimum length for a dictionary word to count as a plaintext match.
pub const MIN_DICT_WORD_LEN: usize = 3;

/// English monogram probabilities, A..Z.
pub const ENGLISH_MONOGRAMS: [f64; ALPHABET_SIZE] = [
    0.085517, 0.016048, 0.031644, 0.038712, 0.120965, 0.021815, 0.020863, 0.049557, 0.073251,
    0.002198, 0.008087, 0.042065, 0.025263, 0.071722, 0.074673, 0.020662, 0.001040, 0.063327,
    0.067282, 0.089381, 0.026816, 0.010593, 0.018254, 0.001914, 0.017214, 0.001138,
];

/// Reference value of 26 * IoC for English text.
pub const ENGLISH_IOC_SCALED: f64 = 1.742;

/// Reference Shannon entropy (natural log) of English monograms.
pub const ENGLISH_ENTROPY: f64 = 2.85;
