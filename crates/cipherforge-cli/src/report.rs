//! Human-readable result output.

use cipherforge_core::alphabet::{chi_squared, entropy, index_of_coincidence, indices_to_text};
use cipherforge_core::cipher::CipherKind;
use cipherforge_core::consts::ALPHABET_SIZE;
use cipherforge_core::cribs::CribSet;
use cipherforge_core::solver::{Improvement, Solution};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use tracing::info;

/// The effective tableau rows: the ciphertext alphabet rotated so each
/// cycleword letter leads its row.
pub fn tableau_rows(ct_alphabet: &[u8; ALPHABET_SIZE], cycleword: &[u8]) -> Vec<String> {
    cycleword
        .iter()
        .map(|&key_char| {
            let offset = ct_alphabet
                .iter()
                .position(|&c| c == key_char)
                .unwrap_or(0);
            let rotated: Vec<u8> = (0..ALPHABET_SIZE)
                .map(|j| ct_alphabet[(j + offset) % ALPHABET_SIZE])
                .collect();
            indices_to_text(&rotated)
        })
        .collect()
}

pub fn log_improvement(improvement: &Improvement<'_>) {
    let decrypted = improvement.decrypted;
    info!(
        "score {:.4} (restart {}, iteration {}) IoC {:.4} entropy {:.4} chi2 {:.2}",
        improvement.score,
        improvement.restart,
        improvement.iteration,
        index_of_coincidence(decrypted),
        entropy(decrypted),
        chi_squared(decrypted),
    );
    info!(
        "  pt {} ct {} cycle {}",
        improvement.state.pt_alphabet.to_text(),
        improvement.state.ct_alphabet.to_text(),
        indices_to_text(&improvement.state.cycleword),
    );
    for row in tableau_rows(
        improvement.state.ct_alphabet.as_slice(),
        &improvement.state.cycleword,
    ) {
        info!("  {row}");
    }
    info!("  {}", indices_to_text(decrypted));
}

pub fn print_solution(
    kind: CipherKind,
    ciphertext: &str,
    solution: &Solution,
    cribs: &CribSet,
    dictionary_words: Option<Vec<String>>,
) {
    let plaintext = indices_to_text(&solution.plaintext);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", solution.score)),
    ]);
    table.add_row(vec![Cell::new("Period"), Cell::new(solution.period)]);
    if !matches!(kind, CipherKind::Porta) {
        table.add_row(vec![
            Cell::new("PT alphabet"),
            Cell::new(solution.state.pt_alphabet.to_text()),
        ]);
        table.add_row(vec![
            Cell::new("CT alphabet"),
            Cell::new(solution.state.ct_alphabet.to_text()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Cycleword"),
        Cell::new(indices_to_text(&solution.state.cycleword)),
    ]);
    if !cribs.is_empty() {
        table.add_row(vec![
            Cell::new("Crib match"),
            Cell::new(format!(
                "{:.0}/{}",
                cribs.match_ratio(&solution.plaintext) * cribs.len() as f64,
                cribs.len()
            )),
        ]);
    }
    if let Some(words) = &dictionary_words {
        table.add_row(vec![Cell::new("Dictionary words"), Cell::new(words.len())]);
    }

    println!("{table}");
    println!("ciphertext: {ciphertext}");
    println!("plaintext:  {plaintext}");
    if let Some(words) = dictionary_words {
        if !words.is_empty() {
            println!("words: {}", words.join(" "));
        }
    }
}
