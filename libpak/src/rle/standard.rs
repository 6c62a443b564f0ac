use super::{Code, CodeKind, RleStrategy};

/// Single byte codes: top bit set is a repeat, the low 7 bits hold the amount.
///
/// An amount of 0 is never written by the encoder; decoders treat it as illegal.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct Standard;

impl RleStrategy for Standard {
    const MAX_REPEAT: usize = 0x7F;
    const MAX_COPY: usize = 0x7F;

    fn read_code(&self, input: &[u8]) -> Option<(Code, usize)> {
        let &code = input.first()?;
        let amount = usize::from(code & 0x7F);
        let kind = if code & 0x80 != 0 {
            CodeKind::Repeat
        } else {
            CodeKind::Copy
        };
        Some((Code { kind, amount }, 1))
    }

    fn write_code(&self, code: Code, out: &mut [u8]) -> Option<usize> {
        let amount = u8::try_from(code.amount).ok().filter(|a| *a <= 0x7F)?;
        let slot = out.first_mut()?;
        *slot = match code.kind {
            CodeKind::Repeat => amount | 0x80,
            CodeKind::Copy => amount,
        };
        Some(1)
    }
}
