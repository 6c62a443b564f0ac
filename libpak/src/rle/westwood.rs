use super::{Code, CodeKind, RleStrategy};

/// Westwood-style codes.
///
/// ```plain
/// 0x01..=0x7F  copy, amount = code
/// 0x80..=0xFF  repeat, amount = 0x100 - code (1..=128)
/// 0x00 LL HH   repeat, amount = 16-bit length following the code
/// ```
///
/// The 16-bit length is little-endian when `swap_words` is set, big-endian otherwise.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct Westwood {
    swap_words: bool,
}

impl Westwood {
    /// Creates a new [`Westwood`] strategy
    #[must_use]
    pub const fn new(swap_words: bool) -> Self {
        Self { swap_words }
    }

    /// Whether extended lengths are stored little-endian
    #[must_use]
    pub const fn swap_words(&self) -> bool {
        self.swap_words
    }

    const fn length_bytes(self, amount: u16) -> [u8; 2] {
        if self.swap_words {
            amount.to_le_bytes()
        } else {
            amount.to_be_bytes()
        }
    }

    const fn length_from_bytes(self, bytes: [u8; 2]) -> u16 {
        if self.swap_words {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        }
    }
}

impl RleStrategy for Westwood {
    const MAX_REPEAT: usize = 0xFFFF;
    const MAX_COPY: usize = 0x7F;

    fn read_code(&self, input: &[u8]) -> Option<(Code, usize)> {
        match *input {
            [0, lo, hi, ..] => {
                let amount = self.length_from_bytes([lo, hi]);
                Some((Code::repeat(usize::from(amount)), 3))
            }
            [0, ..] | [] => None,
            [code, ..] if code & 0x80 != 0 => Some((Code::repeat(0x100 - usize::from(code)), 1)),
            [code, ..] => Some((Code::copy(usize::from(code)), 1)),
        }
    }

    fn write_code(&self, code: Code, out: &mut [u8]) -> Option<usize> {
        match (code.kind, code.amount) {
            (_, 0) => None,
            (CodeKind::Copy, amount) => {
                let amount = u8::try_from(amount).ok().filter(|a| *a <= 0x7F)?;
                *out.first_mut()? = amount;
                Some(1)
            }
            (CodeKind::Repeat, amount) if amount < 0x80 => {
                let amount = u8::try_from(amount).ok()?;
                *out.first_mut()? = amount.wrapping_neg();
                Some(1)
            }
            (CodeKind::Repeat, amount) => {
                let [lo, hi] = self.length_bytes(u16::try_from(amount).ok()?);
                let slot = out.get_mut(..3)?;
                slot.copy_from_slice(&[0, lo, hi]);
                Some(3)
            }
        }
    }
}
