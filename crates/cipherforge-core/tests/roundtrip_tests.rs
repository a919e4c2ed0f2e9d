use cipherforge_core::alphabet::Alphabet;
use cipherforge_core::cipher::{AutokeySub, CipherKind};
use cipherforge_core::ngram::NgramModel;
use proptest::prelude::*;

const ALL_KINDS: [CipherKind; 14] = [
    CipherKind::Vigenere,
    CipherKind::Quagmire1,
    CipherKind::Quagmire2,
    CipherKind::Quagmire3,
    CipherKind::Quagmire4,
    CipherKind::Beaufort,
    CipherKind::Porta,
    CipherKind::Autokey(AutokeySub::Straight),
    CipherKind::Autokey(AutokeySub::Quagmire1),
    CipherKind::Autokey(AutokeySub::Quagmire2),
    CipherKind::Autokey(AutokeySub::Quagmire3),
    CipherKind::Autokey(AutokeySub::Quagmire4),
    CipherKind::Autokey(AutokeySub::Beaufort),
    CipherKind::Autokey(AutokeySub::Porta),
];

/// Alphabets consistent with a cipher's structural constraints, drawn
/// from a seeded RNG so proptest shrinking stays meaningful.
fn alphabets_for(kind: CipherKind, seed: u64, prefix_len: usize) -> (Alphabet, Alphabet) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let keyed = |rng: &mut fastrand::Rng| Alphabet::random(rng, prefix_len);
    let pt = if kind.uses_keyed_pt() {
        keyed(&mut rng)
    } else {
        Alphabet::straight()
    };
    let ct = if kind.shares_alphabets() {
        pt
    } else if kind.uses_keyed_ct() {
        keyed(&mut rng)
    } else {
        Alphabet::straight()
    };
    (pt, ct)
}

proptest! {
    #[test]
    fn decrypt_inverts_encrypt(
        message in proptest::collection::vec(0u8..26, 1..400),
        cycleword in proptest::collection::vec(0u8..26, 1..21),
        kind_index in 0usize..ALL_KINDS.len(),
        seed in any::<u64>(),
        prefix_len in 1usize..13,
        variant in any::<bool>(),
    ) {
        let kind = ALL_KINDS[kind_index];
        let (pt, ct) = alphabets_for(kind, seed, prefix_len);

        let encrypted = kind.encrypt(&message, &pt, &ct, &cycleword, variant);
        let decrypted = kind.decrypt(&encrypted, &pt, &ct, &cycleword, variant);
        prop_assert_eq!(&decrypted, &message);

        // and the other direction
        let re_encrypted = kind.encrypt(&decrypted, &pt, &ct, &cycleword, variant);
        prop_assert_eq!(re_encrypted, encrypted);
    }

    #[test]
    fn beaufort_and_porta_are_self_inverse(
        message in proptest::collection::vec(0u8..26, 1..300),
        cycleword in proptest::collection::vec(0u8..26, 1..15),
    ) {
        let straight = Alphabet::straight();
        for kind in [CipherKind::Beaufort, CipherKind::Porta] {
            let enc = kind.encrypt(&message, &straight, &straight, &cycleword, false);
            let dec = kind.decrypt(&message, &straight, &straight, &cycleword, false);
            prop_assert_eq!(&enc, &dec);
        }
    }

    #[test]
    fn keyed_alphabets_stay_permutations(
        keyword in "[A-Z]{0,30}",
    ) {
        let alphabet = Alphabet::from_keyword(&keyword);
        prop_assert!(alphabet.is_permutation());
    }

    #[test]
    fn ngram_tables_normalise_to_one(
        counts in proptest::collection::hash_map("[A-Z]{2}", 1u64..100_000, 1..60),
    ) {
        let entries: Vec<(String, u64)> = counts.into_iter().collect();
        let model = NgramModel::from_counts(2, entries.iter().map(|(g, c)| (g.as_str(), *c))).unwrap();
        prop_assert!((model.total() - 1.0).abs() < 1e-6);
    }
}
