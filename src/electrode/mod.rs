//! # Electrode Identity
//!
//! Free-text channel labels from exported recordings (`"Fp1"`, `" cz "`, `"PO10"`)
//! are resolved into a canonical [`Electrode`]: a region [`Prefix`] from a fixed
//! table plus a positional [`Suffix`].
//!
//! Resolution is strict. After trimming surrounding whitespace and ASCII
//! case-folding, the symbol must split into exactly one known prefix token followed
//! by either the midline marker `z` or a positive numeral. There is no fuzzy or
//! partial matching.
//!
//! ```rust
//! use eegdoc::electrode::{resolve, Prefix};
//!
//! let electrode = resolve(" fp1 ")?;
//! assert_eq!(electrode.prefix(), Prefix::Fp);
//! assert_eq!(electrode.symbol(), "Fp1");
//! assert!(resolve("XQ9").is_err());
//! # Ok::<(), eegdoc::electrode::ElectrodeError>(())
//! ```

mod error;
mod prefix;

pub use error::ElectrodeError;
pub use prefix::{Hemisphere, Prefix, Suffix};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical sensor identity.
///
/// Ordering is by prefix (natural region order), then suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Electrode {
    prefix: Prefix,
    suffix: Suffix,
}

impl Electrode {
    /// Create an electrode from its parts
    pub fn new(prefix: Prefix, suffix: Suffix) -> Self {
        Self { prefix, suffix }
    }

    /// Region code
    #[inline]
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// Positional qualifier
    #[inline]
    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    /// Hemisphere implied by the suffix
    pub fn hemisphere(&self) -> Hemisphere {
        self.suffix.hemisphere()
    }

    /// Canonical string form, e.g. `"Fp1"` or `"Cz"`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.prefix, self.suffix)
    }
}

impl fmt::Display for Electrode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.suffix)
    }
}

impl FromStr for Electrode {
    type Err = ElectrodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

impl TryFrom<String> for Electrode {
    type Error = ElectrodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        resolve(&value)
    }
}

impl From<Electrode> for String {
    fn from(electrode: Electrode) -> Self {
        electrode.symbol()
    }
}

/// Resolve a free-text channel label into an [`Electrode`].
///
/// The label is trimmed and case-folded, then split into the leading run of ASCII
/// letters and the remainder. When nothing follows the letters, a trailing `z` is
/// the midline suffix (`"Cz"`, `"FPZ"`).
///
/// # Errors
/// [`ElectrodeError::Unrecognized`] carrying the original label when the prefix is
/// not in the table or the suffix is not `z` or a positive numeral.
pub fn resolve(symbol: &str) -> Result<Electrode, ElectrodeError> {
    let unrecognized = || ElectrodeError::Unrecognized(symbol.to_string());

    let trimmed = symbol.trim();
    let letters_end = trimmed
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (letters, rest) = trimmed.split_at(letters_end);

    // "Cz": the midline marker is itself a letter
    let midline = rest.is_empty() && letters.len() > 1 && letters.ends_with(&['z', 'Z'][..]);
    let (prefix_token, suffix_token) = if midline {
        letters.split_at(letters.len() - 1)
    } else {
        (letters, rest)
    };

    let prefix = Prefix::from_token(prefix_token).ok_or_else(unrecognized)?;
    let suffix = Suffix::from_token(suffix_token).ok_or_else(unrecognized)?;

    Ok(Electrode::new(prefix, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU8;

    fn lateral(n: u8) -> Suffix {
        Suffix::Lateral(NonZeroU8::new(n).unwrap())
    }

    #[test]
    fn test_resolve_is_case_and_whitespace_insensitive() {
        let a = resolve("Fp1").unwrap();
        let b = resolve("fp1").unwrap();
        let c = resolve(" FP1 ").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, Electrode::new(Prefix::Fp, lateral(1)));
    }

    #[test]
    fn test_resolve_midline() {
        assert_eq!(resolve("Cz").unwrap(), Electrode::new(Prefix::C, Suffix::Midline));
        assert_eq!(resolve("FPZ").unwrap(), Electrode::new(Prefix::Fp, Suffix::Midline));
        assert_eq!(resolve("POz").unwrap(), Electrode::new(Prefix::PO, Suffix::Midline));
    }

    #[test]
    fn test_resolve_multi_letter_prefixes() {
        assert_eq!(resolve("AF7").unwrap().prefix(), Prefix::AF);
        assert_eq!(resolve("ft10").unwrap(), Electrode::new(Prefix::FT, lateral(10)));
        assert_eq!(resolve("TP9").unwrap().prefix(), Prefix::TP);
        assert_eq!(resolve("A1").unwrap().prefix(), Prefix::A);
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert_eq!(
            resolve("XQ9"),
            Err(ElectrodeError::Unrecognized("XQ9".to_string()))
        );
        for bad in ["", "   ", "z", "Fp", "Fp0", "Fp-1", "F z", "Fz1", "EEG Fp1", "Cz!", "F3.5"] {
            assert!(resolve(bad).is_err(), "{:?} should not resolve", bad);
        }
    }

    #[test]
    fn test_symbol_roundtrip() {
        for symbol in ["Fp1", "Fp2", "AFz", "F7", "FC6", "Cz", "T8", "CP3", "Pz", "PO10", "O1", "Iz", "A2", "M1"] {
            let electrode = resolve(symbol).unwrap();
            assert_eq!(electrode.symbol(), symbol);
            assert_eq!(electrode.to_string(), symbol);
            assert_eq!(resolve(&electrode.symbol()).unwrap(), electrode);
        }
    }

    #[test]
    fn test_display_ordering() {
        let mut electrodes: Vec<Electrode> = ["O2", "Cz", "Fp2", "C3", "Fp1", "C4"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        electrodes.sort();
        let symbols: Vec<String> = electrodes.iter().map(Electrode::symbol).collect();
        assert_eq!(symbols, vec!["Fp1", "Fp2", "C3", "C4", "Cz", "O2"]);
    }

    #[test]
    fn test_serde_as_symbol() {
        let electrode = resolve("cp5").unwrap();
        let json = serde_json::to_string(&electrode).unwrap();
        assert_eq!(json, "\"CP5\"");
        let restored: Electrode = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, electrode);
        assert!(serde_json::from_str::<Electrode>("\"XQ9\"").is_err());
    }

    #[test]
    fn test_hemisphere() {
        assert_eq!(resolve("C3").unwrap().hemisphere(), Hemisphere::Left);
        assert_eq!(resolve("C4").unwrap().hemisphere(), Hemisphere::Right);
        assert_eq!(resolve("Cz").unwrap().hemisphere(), Hemisphere::Midline);
    }
}
