pub mod autokey;
pub mod tableau;

use crate::alphabet::Alphabet;

/// Autokey sub-tableau: the substitution rule the running key is pushed
/// through. The CLI exposes Straight and the four Quagmire tableaux;
/// Beaufort and Porta sub-modes are engine-level extras.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AutokeySub {
    Straight,
    Quagmire1,
    Quagmire2,
    Quagmire3,
    Quagmire4,
    Beaufort,
    Porta,
}

/// The cipher family handled by the solver, per the ACA definitions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CipherKind {
    Vigenere,
    Quagmire1,
    Quagmire2,
    Quagmire3,
    Quagmire4,
    Beaufort,
    Porta,
    Autokey(AutokeySub),
}

impl CipherKind {
    pub fn is_autokey(&self) -> bool {
        matches!(self, CipherKind::Autokey(_))
    }

    /// Periodic ciphers repeat the cycleword over the whole message, which
    /// is what makes columnar IoC estimation and the closed-form cycleword
    /// derivation applicable.
    pub fn is_periodic(&self) -> bool {
        !self.is_autokey()
    }

    /// Whether the plaintext alphabet is keyed (searchable) rather than
    /// fixed straight.
    pub fn uses_keyed_pt(&self) -> bool {
        matches!(
            self,
            CipherKind::Quagmire1
                | CipherKind::Quagmire3
                | CipherKind::Quagmire4
                | CipherKind::Autokey(AutokeySub::Quagmire1)
                | CipherKind::Autokey(AutokeySub::Quagmire3)
                | CipherKind::Autokey(AutokeySub::Quagmire4)
        )
    }

    /// Whether the ciphertext alphabet is keyed.
    pub fn uses_keyed_ct(&self) -> bool {
        matches!(
            self,
            CipherKind::Quagmire2
                | CipherKind::Quagmire3
                | CipherKind::Quagmire4
                | CipherKind::Autokey(AutokeySub::Quagmire2)
                | CipherKind::Autokey(AutokeySub::Quagmire3)
                | CipherKind::Autokey(AutokeySub::Quagmire4)
        )
    }

    /// PT and CT alphabets must stay identical (Quagmire III family).
    pub fn shares_alphabets(&self) -> bool {
        matches!(
            self,
            CipherKind::Quagmire3 | CipherKind::Autokey(AutokeySub::Quagmire3)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CipherKind::Vigenere => "Vigenere",
            CipherKind::Quagmire1 => "Quagmire I",
            CipherKind::Quagmire2 => "Quagmire II",
            CipherKind::Quagmire3 => "Quagmire III",
            CipherKind::Quagmire4 => "Quagmire IV",
            CipherKind::Beaufort => "Beaufort",
            CipherKind::Porta => "Porta",
            CipherKind::Autokey(AutokeySub::Straight) => "Autokey",
            CipherKind::Autokey(AutokeySub::Quagmire1) => "Autokey (Quagmire I tableau)",
            CipherKind::Autokey(AutokeySub::Quagmire2) => "Autokey (Quagmire II tableau)",
            CipherKind::Autokey(AutokeySub::Quagmire3) => "Autokey (Quagmire III tableau)",
            CipherKind::Autokey(AutokeySub::Quagmire4) => "Autokey (Quagmire IV tableau)",
            CipherKind::Autokey(AutokeySub::Beaufort) => "Autokey (Beaufort tableau)",
            CipherKind::Autokey(AutokeySub::Porta) => "Autokey (Porta tableau)",
        }
    }

    /// Decrypt, allocating the output. The hot search paths use the
    /// `_into` primitives with caller-owned buffers instead.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        pt_alphabet: &Alphabet,
        ct_alphabet: &Alphabet,
        cycleword: &[u8],
        variant: bool,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            CipherKind::Beaufort => tableau::beaufort_into(&mut out, ciphertext, cycleword),
            CipherKind::Porta => tableau::porta_into(&mut out, ciphertext, cycleword),
            CipherKind::Autokey(sub) => {
                let mut keystream = Vec::new();
                autokey::decrypt_into(
                    &mut out,
                    &mut keystream,
                    *sub,
                    ciphertext,
                    pt_alphabet,
                    ct_alphabet,
                    cycleword,
                );
            }
            _ => tableau::quagmire_decrypt_into(
                &mut out,
                ciphertext,
                pt_alphabet,
                ct_alphabet,
                cycleword,
                variant,
            ),
        }
        out
    }

    /// Encrypt, allocating the output.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        pt_alphabet: &Alphabet,
        ct_alphabet: &Alphabet,
        cycleword: &[u8],
        variant: bool,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            CipherKind::Beaufort => tableau::beaufort_into(&mut out, plaintext, cycleword),
            CipherKind::Porta => tableau::porta_into(&mut out, plaintext, cycleword),
            CipherKind::Autokey(sub) => {
                autokey::encrypt_into(&mut out, *sub, plaintext, pt_alphabet, ct_alphabet, cycleword)
            }
            _ => tableau::quagmire_encrypt_into(
                &mut out,
                plaintext,
                pt_alphabet,
                ct_alphabet,
                cycleword,
                variant,
            ),
        }
        out
    }
}
