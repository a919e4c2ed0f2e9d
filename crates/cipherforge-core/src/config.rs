use clap::Args;
use serde::{Deserialize, Serialize};

/// Full solver configuration, flattened into the CLI parser.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoreWeights,
    #[command(flatten)]
    pub limits: LengthLimits,

    #[arg(long = "variant", help = "Reciprocal (variant) direction")]
    pub variant: bool,

    #[arg(
        long = "samekey",
        help = "Force the cycleword to equal the PT/CT keyword alphabet"
    )]
    pub same_key: bool,

    #[arg(long = "plaintextkeyword", help = "Fix the plaintext keyword")]
    pub plaintext_keyword: Option<String>,

    #[arg(long = "ciphertextkeyword", help = "Fix the ciphertext keyword")]
    pub ciphertext_keyword: Option<String>,
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchParams {
    #[arg(
        long = "nhillclimbs",
        default_value_t = 1000,
        help = "Iterations per restart"
    )]
    pub n_hill_climbs: usize,

    #[arg(long = "nrestarts", default_value_t = 1, help = "Number of restarts")]
    pub n_restarts: usize,

    #[arg(
        long = "backtrackprob",
        default_value_t = 0.15,
        help = "Probability of restarting from the best state instead of a random one"
    )]
    pub backtrack_prob: f64,

    #[arg(
        long = "keywordpermprob",
        default_value_t = 0.95,
        help = "Probability of perturbing the keyword rather than the cycleword"
    )]
    pub keyword_perm_prob: f64,

    #[arg(
        long = "slipprob",
        default_value_t = 0.01,
        help = "Probability of accepting a worse score to escape local maxima"
    )]
    pub slip_prob: f64,

    #[arg(
        long = "nsigmathreshold",
        default_value_t = 1.0,
        help = "Z-score threshold for period candidates"
    )]
    pub sigma_threshold: f64,

    #[arg(
        long = "iocthreshold",
        default_value_t = 0.047,
        help = "Minimum columnar IoC for period candidates"
    )]
    pub ioc_threshold: f64,

    #[arg(
        long = "optimalcycle",
        help = "Derive the cycleword per keyword candidate (default)"
    )]
    pub optimal_cycle: bool,

    #[arg(
        long = "stochasticcycle",
        conflicts_with = "optimal_cycle",
        help = "Perturb the cycleword stochastically instead of deriving it"
    )]
    pub stochastic_cycle: bool,
}

impl SearchParams {
    /// The deriver is on unless stochastic mode was requested; the
    /// `--optimalcycle` flag exists to spell the default explicitly.
    pub fn optimal_cycleword(&self) -> bool {
        !self.stochastic_cycle
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            n_hill_climbs: 1000,
            n_restarts: 1,
            backtrack_prob: 0.15,
            keyword_perm_prob: 0.95,
            slip_prob: 0.01,
            sigma_threshold: 1.0,
            ioc_threshold: 0.047,
            optimal_cycle: false,
            stochastic_cycle: false,
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[arg(long = "weightngram", default_value_t = 12.0)]
    pub ngram: f64,
    #[arg(long = "weightcrib", default_value_t = 36.0)]
    pub crib: f64,
    #[arg(long = "weightioc", default_value_t = 0.0)]
    pub ioc: f64,
    #[arg(long = "weightentropy", default_value_t = 0.0)]
    pub entropy: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ngram: 12.0,
            crib: 36.0,
            ioc: 0.0,
            entropy: 0.0,
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LengthLimits {
    #[arg(
        long = "keywordlen",
        help = "Fix both keyword prefix lengths"
    )]
    pub keyword_len: Option<usize>,

    #[arg(
        long = "plaintextkeywordlen",
        help = "Fix the plaintext keyword prefix length"
    )]
    pub pt_keyword_len: Option<usize>,

    #[arg(
        long = "ciphertextkeywordlen",
        help = "Fix the ciphertext keyword prefix length"
    )]
    pub ct_keyword_len: Option<usize>,

    #[arg(
        long = "minkeywordlen",
        default_value_t = 5,
        help = "Smallest keyword prefix length to scan"
    )]
    pub min_keyword_len: usize,

    #[arg(
        long = "maxkeywordlen",
        default_value_t = 12,
        help = "Keyword prefix lengths are scanned below this bound"
    )]
    pub max_keyword_len: usize,

    #[arg(long = "cyclewordlen", help = "Fix the cycleword length (period)")]
    pub cycleword_len: Option<usize>,

    #[arg(
        long = "maxcyclewordlen",
        default_value_t = 20,
        help = "Largest period to scan"
    )]
    pub max_cycleword_len: usize,
}

impl LengthLimits {
    /// Fixed plaintext keyword length, honouring `--keywordlen`.
    pub fn fixed_pt_len(&self) -> Option<usize> {
        self.pt_keyword_len.or(self.keyword_len)
    }

    /// Fixed ciphertext keyword length, honouring `--keywordlen`.
    pub fn fixed_ct_len(&self) -> Option<usize> {
        self.ct_keyword_len.or(self.keyword_len)
    }
}

impl Default for LengthLimits {
    fn default() -> Self {
        Self {
            keyword_len: None,
            pt_keyword_len: None,
            ct_keyword_len: None,
            min_keyword_len: 5,
            max_keyword_len: 12,
            cycleword_len: None,
            max_cycleword_len: 20,
        }
    }
}
