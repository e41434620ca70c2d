use std::fmt;
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

/// Scalp region code of an electrode in the 10-20 / 10-10 placement systems.
///
/// Variants are declared in their natural order (anterior to posterior, then
/// reference sites), which is the order used when sorting electrodes for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prefix {
    /// Frontopolar
    Fp,
    /// Anterior frontal
    AF,
    /// Frontal
    F,
    /// Frontotemporal
    FT,
    /// Frontocentral
    FC,
    /// Central
    C,
    /// Temporal
    T,
    /// Temporoparietal
    TP,
    /// Centroparietal
    CP,
    /// Parietal
    P,
    /// Parieto-occipital
    PO,
    /// Occipital
    O,
    /// Inion
    I,
    /// Auricular (earlobe reference)
    A,
    /// Mastoid
    M,
}

impl Prefix {
    /// Every prefix, in natural order.
    pub const ALL: [Prefix; 15] = [
        Prefix::Fp,
        Prefix::AF,
        Prefix::F,
        Prefix::FT,
        Prefix::FC,
        Prefix::C,
        Prefix::T,
        Prefix::TP,
        Prefix::CP,
        Prefix::P,
        Prefix::PO,
        Prefix::O,
        Prefix::I,
        Prefix::A,
        Prefix::M,
    ];

    /// Canonical spelling used in electrode symbols.
    pub fn symbol(&self) -> &'static str {
        match self {
            Prefix::Fp => "Fp",
            Prefix::AF => "AF",
            Prefix::F => "F",
            Prefix::FT => "FT",
            Prefix::FC => "FC",
            Prefix::C => "C",
            Prefix::T => "T",
            Prefix::TP => "TP",
            Prefix::CP => "CP",
            Prefix::P => "P",
            Prefix::PO => "PO",
            Prefix::O => "O",
            Prefix::I => "I",
            Prefix::A => "A",
            Prefix::M => "M",
        }
    }

    /// Look up a prefix token. Matching is exact after ASCII case-folding.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|prefix| prefix.symbol().eq_ignore_ascii_case(token))
    }

    /// Compact numeric code used by the binary document format.
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`Prefix::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Positional qualifier of an electrode within its region.
///
/// Lateral positions sort numerically and before the midline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suffix {
    /// Numbered off-midline position; odd numbers are left, even numbers right
    Lateral(NonZeroU8),
    /// Midline position, written `z`
    Midline,
}

/// Side of the head an electrode sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hemisphere {
    /// Odd-numbered positions
    Left,
    /// Even-numbered positions
    Right,
    /// `z` positions
    Midline,
}

impl Suffix {
    /// Parse a suffix token: `z` (any case) or a positive decimal numeral
    /// without sign or leading zeros.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("z") {
            return Some(Suffix::Midline);
        }
        if token.is_empty() || token.starts_with('0') || !token.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        token.parse::<NonZeroU8>().ok().map(Suffix::Lateral)
    }

    /// Hemisphere implied by the position's parity.
    pub fn hemisphere(&self) -> Hemisphere {
        match self {
            Suffix::Midline => Hemisphere::Midline,
            Suffix::Lateral(n) if n.get() % 2 == 1 => Hemisphere::Left,
            Suffix::Lateral(_) => Hemisphere::Right,
        }
    }

    /// Compact numeric code used by the binary document format (0 = midline).
    #[inline]
    pub fn code(&self) -> u8 {
        match self {
            Suffix::Midline => 0,
            Suffix::Lateral(n) => n.get(),
        }
    }

    /// Inverse of [`Suffix::code`].
    pub fn from_code(code: u8) -> Self {
        match NonZeroU8::new(code) {
            Some(n) => Suffix::Lateral(n),
            None => Suffix::Midline,
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suffix::Midline => f.write_str("z"),
            Suffix::Lateral(n) => write!(f, "{}", n),
        }
    }
}
