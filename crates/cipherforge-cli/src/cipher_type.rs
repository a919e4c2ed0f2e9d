//! `--type` argument parsing: numeric codes for compatibility, named
//! aliases preferred.

use cipherforge_core::cipher::{AutokeySub, CipherKind};

/// Numeric codes follow the classic tool's enum: 0 Vigenere, 1-4
/// Quagmire I-IV, 5 Beaufort, 6 Porta, 7-11 Autokey over the
/// Straight/Q1/Q2/Q3/Q4 tableaux.
pub fn parse(arg: &str) -> Result<CipherKind, String> {
    if let Ok(code) = arg.parse::<i64>() {
        return match code {
            0 => Ok(CipherKind::Vigenere),
            1 => Ok(CipherKind::Quagmire1),
            2 => Ok(CipherKind::Quagmire2),
            3 => Ok(CipherKind::Quagmire3),
            4 => Ok(CipherKind::Quagmire4),
            5 => Ok(CipherKind::Beaufort),
            6 => Ok(CipherKind::Porta),
            7 => Ok(CipherKind::Autokey(AutokeySub::Straight)),
            8 => Ok(CipherKind::Autokey(AutokeySub::Quagmire1)),
            9 => Ok(CipherKind::Autokey(AutokeySub::Quagmire2)),
            10 => Ok(CipherKind::Autokey(AutokeySub::Quagmire3)),
            11 => Ok(CipherKind::Autokey(AutokeySub::Quagmire4)),
            _ => Err(format!("unknown cipher type code {code}")),
        };
    }

    match arg.to_ascii_lowercase().as_str() {
        "vig" | "vigenere" => Ok(CipherKind::Vigenere),
        "q1" | "quag1" | "quagmire1" => Ok(CipherKind::Quagmire1),
        "q2" | "quag2" | "quagmire2" => Ok(CipherKind::Quagmire2),
        "q3" | "quag3" | "quagmire3" => Ok(CipherKind::Quagmire3),
        "q4" | "quag4" | "quagmire4" => Ok(CipherKind::Quagmire4),
        "beau" | "beaufort" => Ok(CipherKind::Beaufort),
        "porta" => Ok(CipherKind::Porta),
        "auto" | "autokey" | "auto0" => Ok(CipherKind::Autokey(AutokeySub::Straight)),
        "auto1" | "autokey1" => Ok(CipherKind::Autokey(AutokeySub::Quagmire1)),
        "auto2" | "autokey2" => Ok(CipherKind::Autokey(AutokeySub::Quagmire2)),
        "auto3" | "autokey3" => Ok(CipherKind::Autokey(AutokeySub::Quagmire3)),
        "auto4" | "autokey4" => Ok(CipherKind::Autokey(AutokeySub::Quagmire4)),
        other => Err(format!("unknown cipher type '{other}'")),
    }
}
