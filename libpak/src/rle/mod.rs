#![allow(clippy::module_name_repetitions)]

pub(crate) mod compress;
pub(crate) mod decompress;
pub(crate) mod standard;
pub(crate) mod westwood;

pub use compress::{encode, encode_into, max_encoded_len};
pub use decompress::{decode, decode_counted, decode_into};
pub use standard::Standard;
pub use westwood::Westwood;

use crate::Error;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Shortest run of identical bytes the encoders turn into a repeat code.
///
/// A repeat code costs at least two bytes, so a run of two is left to the surrounding copy run.
pub const MIN_REPEAT: usize = 3;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
/// What a code tells the decoder to do
pub enum CodeKind {
    /// Replicate the single byte following the code
    Repeat,
    /// Copy the raw bytes following the code
    Copy,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
/// One RLE instruction, without its payload
pub struct Code {
    /// Repeat or copy
    pub kind: CodeKind,
    /// Number of bytes produced (repeat) or consumed and produced (copy)
    pub amount: usize,
}

impl Code {
    /// Creates a repeat code for `amount` bytes
    #[must_use]
    pub const fn repeat(amount: usize) -> Self {
        Self {
            kind: CodeKind::Repeat,
            amount,
        }
    }

    /// Creates a copy code for `amount` bytes
    #[must_use]
    pub const fn copy(amount: usize) -> Self {
        Self {
            kind: CodeKind::Copy,
            amount,
        }
    }
}

/// Byte-level encoding of RLE codes.
///
/// The engine ([`decode`], [`encode`]) is format agnostic; a strategy decides how a code and its
/// extension bytes look on disk. Both operations work on the remaining window of the buffer, so the
/// end of the slice is the end of the usable data.
pub trait RleStrategy {
    /// Longest run a single repeat code can describe
    const MAX_REPEAT: usize;
    /// Longest run a single copy code can describe
    const MAX_COPY: usize;

    /// Reads one code from the start of `input`.
    ///
    /// Returns the code and the number of bytes it occupied, or [`None`] if `input` is too short
    /// to hold it.
    fn read_code(&self, input: &[u8]) -> Option<(Code, usize)>;

    /// Writes `code` to the start of `out`.
    ///
    /// Returns the number of bytes written, or [`None`] if `out` has no room for it or the amount
    /// cannot be expressed by this strategy.
    fn write_code(&self, code: Code, out: &mut [u8]) -> Option<usize>;
}

#[derive(
    Debug, Default, Eq, PartialEq, Copy, Clone, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
/// Run-time selection of an [`RleStrategy`]
pub enum RleFlavor {
    /// [`Standard`] codes
    #[default]
    Standard,
    /// [`Westwood`] codes, big-endian extended lengths
    Westwood,
    /// [`Westwood`] codes, little-endian extended lengths
    WestwoodSwapped,
}

impl RleFlavor {
    /// Compresses `input` with the selected strategy
    #[must_use]
    pub fn encode(self, input: &[u8]) -> Vec<u8> {
        match self.westwood() {
            Some(westwood) => encode(&westwood, input),
            None => encode(&Standard, input),
        }
    }

    /// Decompresses `input` into `out` with the selected strategy, returning the bytes written
    ///
    /// # Errors
    ///
    /// See [`decode_into`]
    pub fn decode_into(
        self,
        input: &[u8],
        out: &mut [u8],
        abort_on_error: bool,
    ) -> Result<usize, Error> {
        match self.westwood() {
            Some(westwood) => decode_into(&westwood, input, out, abort_on_error),
            None => decode_into(&Standard, input, out, abort_on_error),
        }
    }

    /// Decompresses `input` into a buffer of `out_capacity` bytes with the selected strategy
    ///
    /// # Errors
    ///
    /// See [`decode`]
    pub fn decode(
        self,
        input: &[u8],
        out_capacity: usize,
        abort_on_error: bool,
    ) -> Result<Vec<u8>, Error> {
        let mut out = vec![0; out_capacity];
        let written = self.decode_into(input, &mut out, abort_on_error)?;
        decompress::check_exact(written, out_capacity, abort_on_error)?;
        Ok(out)
    }

    /// The [`Westwood`] strategy behind this flavor, if it uses Westwood codes
    #[must_use]
    pub const fn westwood(self) -> Option<Westwood> {
        match self {
            Self::Standard => None,
            Self::Westwood => Some(Westwood::new(false)),
            Self::WestwoodSwapped => Some(Westwood::new(true)),
        }
    }
}
