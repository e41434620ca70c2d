use super::{CodecError, Profile};

/// Largest supported number of decimals for [`SampleEncoding::Quantized`]
pub const MAX_DECIMALS: u8 = 9;

/// How sample values are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleEncoding {
    /// Bit-for-bit `f64` values
    #[default]
    Exact,
    /// Values rounded to a fixed number of decimals and stored as integer deltas.
    ///
    /// Decoded values differ from the originals by at most `0.5 * 10^-decimals`
    /// (plus float rounding) as long as `|v| * 10^decimals < 2^53`.
    Quantized {
        /// Decimal places kept, at most [`MAX_DECIMALS`]
        decimals: u8,
    },
}

impl SampleEncoding {
    pub(super) fn tag(&self) -> u8 {
        match self {
            SampleEncoding::Exact => 0,
            SampleEncoding::Quantized { .. } => 1,
        }
    }

    pub(super) fn decimals(&self) -> u8 {
        match self {
            SampleEncoding::Exact => 0,
            SampleEncoding::Quantized { decimals } => *decimals,
        }
    }

    pub(super) fn from_tag(tag: u8, decimals: u8) -> Option<Self> {
        match (tag, decimals) {
            (0, 0) => Some(SampleEncoding::Exact),
            (1, decimals) if decimals <= MAX_DECIMALS => {
                Some(SampleEncoding::Quantized { decimals })
            }
            _ => None,
        }
    }
}

/// Configuration for the document encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// zlib compression level, 0 (store) to 9 (smallest)
    pub compression_level: u32,

    /// Storage of sample values
    pub sample_encoding: SampleEncoding,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::from_profile(Profile::default())
    }
}

impl CodecConfig {
    /// Configuration for a named profile, with exact samples
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            compression_level: profile.compression_level(),
            sample_encoding: SampleEncoding::Exact,
        }
    }

    /// Configuration optimized for fast encoding (larger files)
    pub fn fast() -> Self {
        Self::from_profile(Profile::Fast)
    }

    /// Configuration optimized for file size
    pub fn max_compression() -> Self {
        Self::from_profile(Profile::MaxCompression)
    }

    /// Same configuration, storing samples with a fixed number of decimals
    pub fn quantized(mut self, decimals: u8) -> Self {
        self.sample_encoding = SampleEncoding::Quantized { decimals };
        self
    }

    /// Check the configuration before encoding
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.compression_level > 9 {
            return Err(CodecError::InvalidConfig(format!(
                "compression level {} is outside 0..=9",
                self.compression_level
            )));
        }
        if self.sample_encoding.decimals() > MAX_DECIMALS {
            return Err(CodecError::InvalidConfig(format!(
                "{} decimals requested, at most {} supported",
                self.sample_encoding.decimals(),
                MAX_DECIMALS
            )));
        }
        Ok(())
    }
}
