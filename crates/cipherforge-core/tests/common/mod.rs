//! Shared fixtures: a small English corpus and n-gram tables built from
//! it, so solver tests run without external data files.

use cipherforge_core::ngram::NgramModel;
use std::collections::HashMap;

/// A few hundred characters of plain English, A-Z only. Deliberately
/// different from the passages the scenario tests encrypt.
pub const ENGLISH_CORPUS: &str = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG\
WHENINTHECOURSEOFHUMANEVENTSITBECOMESNECESSARYFORONEPEOPLETODISSOLVETHEPOLITICALBANDS\
WHICHHAVECONNECTEDTHEMWITHANOTHERANDTOASSUMEAMONGTHEPOWERSOFTHEEARTHTHESEPARATEAND\
EQUALSTATIONTOWHICHTHELAWSOFNATUREANDOFNATURESGODENTITLETHEMADECENTRESPECTTOTHE\
OPINIONSOFMANKINDREQUIRESTHATTHEYSHOULDDECLARETHECAUSESWHICHIMPELTHEMTOTHESEPARATION\
WEHOLDTHESETRUTHSTOBESELFEVIDENTTHATALLMENARECREATEDEQUALTHATTHEYAREENDOWEDBYTHEIR\
CREATORWITHCERTAINUNALIENABLERIGHTSTHATAMONGTHESEARELIFELIBERTYANDTHEPURSUITOFHAPPINESS\
THATTOSECURETHESERIGHTSGOVERNMENTSAREINSTITUTEDAMONGMENDERIVINGTHEIRJUSTPOWERSFROM\
THECONSENTOFTHEGOVERNED\
ITWASTHEBESTOFTIMESITWASTHEWORSTOFTIMESITWASTHEAGEOFWISDOMITWASTHEAGEOFFOOLISHNESS\
ITWASTHEEPOCHOFBELIEFITWASTHEEPOCHOFINCREDULITYITWASTHESEASONOFLIGHTITWASTHESEASON\
OFDARKNESSITWASTHESPRINGOFHOPEITWASTHEWINTEROFDESPAIR";

/// Count the n-grams of the corpus.
pub fn corpus_counts(n: usize) -> Vec<(String, u64)> {
    let text = ENGLISH_CORPUS.as_bytes();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for window in text.windows(n) {
        let gram = std::str::from_utf8(window).unwrap().to_string();
        *counts.entry(gram).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Trigram model over the embedded corpus, the workhorse for the solver
/// scenarios.
pub fn trigram_model() -> NgramModel {
    let counts = corpus_counts(3);
    NgramModel::from_counts(3, counts.iter().map(|(g, c)| (g.as_str(), *c))).unwrap()
}
