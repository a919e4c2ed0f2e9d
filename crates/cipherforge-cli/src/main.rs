use cipherforge_core::alphabet::{indices_to_text, text_to_indices};
use cipherforge_core::cipher::CipherKind;
use cipherforge_core::config::Config;
use cipherforge_core::cribs::CribSet;
use cipherforge_core::dict::Dictionary;
use cipherforge_core::ngram::NgramModel;
use cipherforge_core::solver::{Improvement, ProgressCallback, SilentProgress, Solver};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, warn};

mod cipher_type;
mod report;

/// Solver for the ACA polyalphabetic cipher family: Vigenere, Beaufort,
/// Porta, Quagmire I-IV and their Autokey variants.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        long = "type",
        value_parser = cipher_type::parse,
        help = "Cipher to attack: numeric code 0-11 or alias (vig, q1..q4, beau, porta, auto, auto1..auto4)"
    )]
    cipher_type: CipherKind,

    #[arg(long, help = "Ciphertext file (first whitespace-delimited token is read)")]
    cipher: Option<PathBuf>,

    #[arg(long, help = "Batch file with one ciphertext per line")]
    batch: Option<PathBuf>,

    #[arg(long, help = "Crib mask file, same length as the ciphertext, '_' for unknown")]
    crib: Option<PathBuf>,

    #[arg(long = "ngramfile", help = "N-gram statistics file (GRAM<TAB>COUNT lines)")]
    ngram_file: PathBuf,

    #[arg(long = "ngramsize", help = "N-gram order of the statistics file")]
    ngram_size: usize,

    #[arg(
        long,
        help = "Dictionary word list for the report (defaults to OxfordEnglishWords.txt if present)"
    )]
    dictionary: Option<PathBuf>,

    #[arg(short = 'S', long, help = "PRNG seed for reproducible runs")]
    seed: Option<u64>,

    #[arg(long, help = "Log improvement snapshots during the search")]
    verbose: bool,

    #[command(flatten)]
    config: Config,
}

/// Logs each best-score improvement; never stops the search.
struct VerboseLogger;

impl ProgressCallback for VerboseLogger {
    fn on_improvement(&self, improvement: &Improvement<'_>) -> bool {
        report::log_improvement(improvement);
        true
    }
}

const DEFAULT_DICTIONARY: &str = "OxfordEnglishWords.txt";

fn read_single_token(path: &Path) -> String {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        error!("failed to read '{}': {}", path.display(), e);
        process::exit(1);
    });
    let token = content.split_whitespace().next().unwrap_or_else(|| {
        error!("'{}' contains no text", path.display());
        process::exit(1);
    });
    token.to_ascii_uppercase()
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    if cli.cipher.is_none() && cli.batch.is_none() {
        error!("no cipher input: use --cipher or --batch");
        process::exit(1);
    }

    info!("Attacking a {} cipher", cli.cipher_type.name());

    let ngram = NgramModel::load(&cli.ngram_file, cli.ngram_size).unwrap_or_else(|e| {
        error!("failed to load ngram table: {}", e);
        process::exit(1);
    });

    let dictionary = cli
        .dictionary
        .clone()
        .or_else(|| {
            Path::new(DEFAULT_DICTIONARY)
                .exists()
                .then(|| PathBuf::from(DEFAULT_DICTIONARY))
        })
        .map(|path| {
            Dictionary::load(&path).unwrap_or_else(|e| {
                error!("failed to load dictionary '{}': {}", path.display(), e);
                process::exit(1);
            })
        });

    let crib_mask = cli.crib.as_deref().map(read_single_token);

    let ciphertexts: Vec<String> = if let Some(batch_path) = &cli.batch {
        let content = fs::read_to_string(batch_path).unwrap_or_else(|e| {
            error!("failed to read batch file '{}': {}", batch_path.display(), e);
            process::exit(1);
        });
        content
            .lines()
            .map(str::trim)
            .filter(|line| line.len() >= 5)
            .map(str::to_ascii_uppercase)
            .collect()
    } else {
        vec![read_single_token(cli.cipher.as_deref().unwrap())]
    };

    for (index, ciphertext_str) in ciphertexts.iter().enumerate() {
        if ciphertexts.len() > 1 {
            info!("--- cipher {} of {} ---", index + 1, ciphertexts.len());
        }
        solve_one(&cli, ciphertext_str, crib_mask.as_deref(), &ngram, dictionary.as_ref());
    }
}

fn solve_one(
    cli: &Cli,
    ciphertext_str: &str,
    crib_mask: Option<&str>,
    ngram: &NgramModel,
    dictionary: Option<&Dictionary>,
) {
    let ciphertext = text_to_indices(ciphertext_str).unwrap_or_else(|e| {
        error!("bad ciphertext: {}", e);
        process::exit(1);
    });

    let cribs = match crib_mask {
        Some(mask) => CribSet::parse_mask(mask, ciphertext.len()).unwrap_or_else(|e| {
            error!("bad crib: {}", e);
            process::exit(1);
        }),
        None => CribSet::empty(),
    };

    let solver = Solver {
        kind: cli.cipher_type,
        config: &cli.config,
        ngram,
        cribs: &cribs,
    };

    let result = if cli.verbose {
        solver.solve(&ciphertext, cli.seed, &VerboseLogger)
    } else {
        solver.solve(&ciphertext, cli.seed, &SilentProgress)
    };

    match result {
        Ok(solution) => {
            let plaintext = indices_to_text(&solution.plaintext);
            let words = dictionary.map(|dict| dict.find_words(&plaintext));
            report::print_solution(cli.cipher_type, ciphertext_str, &solution, &cribs, words);
        }
        Err(e) => warn!("solve failed: {}", e),
    }
}
