//! Running-key decryption: the key stream starts as the primer (the
//! cycleword) and grows by each recovered plaintext character, so the
//! stream is aperiodic and never restarts.

use super::tableau;
use super::AutokeySub;
use crate::alphabet::Alphabet;
use crate::consts::ALPHABET_SIZE;

const A: u8 = ALPHABET_SIZE as u8;

#[inline(always)]
fn sub_decrypt_char(
    sub: AutokeySub,
    cipher_char: u8,
    key_char: u8,
    pt_alphabet: &Alphabet,
    ct_pos: &[u8; ALPHABET_SIZE],
) -> u8 {
    match sub {
        AutokeySub::Beaufort => tableau::beaufort_char(cipher_char, key_char),
        AutokeySub::Porta => tableau::porta_char(cipher_char, key_char),
        // Straight and Quagmire tableaux share the position rule; for the
        // straight alphabet the positions are the letters themselves.
        _ => {
            let p = ct_pos[cipher_char as usize];
            let q = ct_pos[key_char as usize];
            pt_alphabet.letter_at(((p + A - q) % A) as usize)
        }
    }
}

/// Decrypt with caller-owned output and key-stream buffers; the key
/// stream ends up holding primer followed by the recovered plaintext.
pub fn decrypt_into(
    out: &mut Vec<u8>,
    keystream: &mut Vec<u8>,
    sub: AutokeySub,
    ciphertext: &[u8],
    pt_alphabet: &Alphabet,
    ct_alphabet: &Alphabet,
    primer: &[u8],
) {
    out.clear();
    keystream.clear();
    keystream.extend_from_slice(primer);

    let ct_pos = ct_alphabet.inverse();
    for (i, &c) in ciphertext.iter().enumerate() {
        let p = sub_decrypt_char(sub, c, keystream[i], pt_alphabet, &ct_pos);
        out.push(p);
        keystream.push(p);
    }
}

/// Encrypt against a primer-plus-plaintext key stream.
pub fn encrypt_into(
    out: &mut Vec<u8>,
    sub: AutokeySub,
    plaintext: &[u8],
    pt_alphabet: &Alphabet,
    ct_alphabet: &Alphabet,
    primer: &[u8],
) {
    out.clear();
    let pt_pos = pt_alphabet.inverse();
    let ct_pos = ct_alphabet.inverse();

    let mut keystream = Vec::with_capacity(primer.len() + plaintext.len());
    keystream.extend_from_slice(primer);
    keystream.extend_from_slice(plaintext);

    for (i, &m) in plaintext.iter().enumerate() {
        let k = keystream[i];
        let c = match sub {
            AutokeySub::Beaufort => tableau::beaufort_char(m, k),
            AutokeySub::Porta => tableau::porta_char(m, k),
            _ => {
                let p = pt_pos[m as usize];
                let q = ct_pos[k as usize];
                ct_alphabet.letter_at(((p + q) % A) as usize)
            }
        };
        out.push(c);
    }
}
