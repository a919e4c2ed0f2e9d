//! The shared decrypt/encrypt primitive for the periodic family.
//!
//! One rule covers Vigenere and all four Quagmires: with plaintext
//! alphabet P, ciphertext alphabet C and cycleword K,
//!
//! ```text
//!   p = position of ciphertext[i] in C
//!   q = position of K[i mod L] in C
//!   plaintext[i] = P[(p - q) mod 26]        (or p + q for the variant)
//! ```
//!
//! Vigenere is the special case P = C = straight. Beaufort and Porta are
//! reciprocal ciphers with their own arithmetic and ignore the alphabets.

use crate::alphabet::Alphabet;
use crate::consts::ALPHABET_SIZE;

const A: u8 = ALPHABET_SIZE as u8;

#[inline(always)]
fn wrap_sub(a: u8, b: u8) -> u8 {
    (a + A - b) % A
}

pub fn quagmire_decrypt_into(
    out: &mut Vec<u8>,
    ciphertext: &[u8],
    pt_alphabet: &Alphabet,
    ct_alphabet: &Alphabet,
    cycleword: &[u8],
    variant: bool,
) {
    out.clear();
    let ct_pos = ct_alphabet.inverse();
    for (i, &c) in ciphertext.iter().enumerate() {
        let p = ct_pos[c as usize];
        let q = ct_pos[cycleword[i % cycleword.len()] as usize];
        let d = if variant { (p + q) % A } else { wrap_sub(p, q) };
        out.push(pt_alphabet.letter_at(d as usize));
    }
}

pub fn quagmire_encrypt_into(
    out: &mut Vec<u8>,
    plaintext: &[u8],
    pt_alphabet: &Alphabet,
    ct_alphabet: &Alphabet,
    cycleword: &[u8],
    variant: bool,
) {
    out.clear();
    let pt_pos = pt_alphabet.inverse();
    let ct_pos = ct_alphabet.inverse();
    for (i, &m) in plaintext.iter().enumerate() {
        let p = pt_pos[m as usize];
        let q = ct_pos[cycleword[i % cycleword.len()] as usize];
        let d = if variant { wrap_sub(p, q) } else { (p + q) % A };
        out.push(ct_alphabet.letter_at(d as usize));
    }
}

/// Beaufort: output = key - input (mod 26). Reciprocal, so this is both
/// the decrypt and the encrypt direction.
pub fn beaufort_into(out: &mut Vec<u8>, input: &[u8], cycleword: &[u8]) {
    out.clear();
    for (i, &c) in input.iter().enumerate() {
        let k = cycleword[i % cycleword.len()];
        out.push(wrap_sub(k, c));
    }
}

/// Single-character Beaufort step, shared with the autokey engine and the
/// cycleword deriver.
#[inline(always)]
pub fn beaufort_char(input: u8, key: u8) -> u8 {
    wrap_sub(key, input)
}

/// Porta: the key letter selects a shift `floor(k/2)` applied across the
/// A-M / N-Z boundary. Reciprocal and independent of the alphabets.
pub fn porta_into(out: &mut Vec<u8>, input: &[u8], cycleword: &[u8]) {
    out.clear();
    for (i, &c) in input.iter().enumerate() {
        let k = cycleword[i % cycleword.len()];
        out.push(porta_char(c, k));
    }
}

#[inline(always)]
pub fn porta_char(input: u8, key: u8) -> u8 {
    let shift = key / 2;
    if input < 13 {
        (input + shift) % 13 + 13
    } else {
        (input + A - 13 - shift) % 13
    }
}
