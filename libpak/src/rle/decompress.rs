use tracing::{instrument, trace};

use super::{CodeKind, RleStrategy};
use crate::Error;

/// Decompresses `input` into `out`, returning the number of bytes written.
///
/// Decoding stops when `out` is full or `input` is exhausted. Codes that claim more data than
/// `input` still holds produce whatever is available. With `abort_on_error` set, a code that
/// cannot be read or a run length of 0 fails the whole call. Otherwise an unreadable code ends
/// decoding and a zero-length code is skipped.
///
/// # Errors
///
/// Only returns [`Error::DecompressionFailed`], and only when `abort_on_error` is set.
pub fn decode_into<S: RleStrategy>(
    strategy: &S,
    input: &[u8],
    out: &mut [u8],
    abort_on_error: bool,
) -> Result<usize, Error> {
    decode_counted(strategy, input, out, abort_on_error).map(|(written, _)| written)
}

/// Same as [`decode_into`], additionally returning how many input bytes were consumed.
///
/// The first element is the number of bytes written to `out`, the second the number of bytes read
/// from `input`. A copy cut short by a full `out` only counts the bytes it actually copied.
///
/// # Errors
///
/// See [`decode_into`]
#[instrument(skip(strategy, input, out), fields(in_len = input.len(), out_len = out.len()), level = "trace")]
pub fn decode_counted<S: RleStrategy>(
    strategy: &S,
    input: &[u8],
    out: &mut [u8],
    abort_on_error: bool,
) -> Result<(usize, usize), Error> {
    let (mut in_ptr, mut out_ptr) = (0usize, 0usize);

    while in_ptr < input.len() && out_ptr < out.len() {
        let code_offset = in_ptr;
        let Some((code, consumed)) = strategy.read_code(&input[in_ptr..]) else {
            if abort_on_error {
                return Err(Error::DecompressionFailed {
                    offset: code_offset,
                    reason: "not enough data left to read a code",
                });
            }
            trace!("unreadable code at {code_offset}, stopping");
            break;
        };
        in_ptr += consumed;

        if code.amount == 0 && abort_on_error {
            return Err(Error::DecompressionFailed {
                offset: code_offset,
                reason: "run length of 0",
            });
        }

        match code.kind {
            CodeKind::Repeat => {
                let Some(&value) = input.get(in_ptr) else {
                    trace!("repeat code at {code_offset} has no fill value, stopping");
                    break;
                };
                in_ptr += 1;
                let end = out.len().min(out_ptr + code.amount);
                out[out_ptr..end].fill(value);
                out_ptr = end;
            }
            CodeKind::Copy => {
                let len = code
                    .amount
                    .min(out.len() - out_ptr)
                    .min(input.len() - in_ptr);
                out[out_ptr..out_ptr + len].copy_from_slice(&input[in_ptr..in_ptr + len]);
                in_ptr += len;
                out_ptr += len;
            }
        }
    }

    trace!("decoded {out_ptr} bytes from {in_ptr} input bytes");
    Ok((out_ptr, in_ptr))
}

/// Decompresses `input` into a freshly allocated buffer of exactly `out_capacity` bytes.
///
/// With `abort_on_error` set, an input that produces fewer than `out_capacity` bytes is an error.
/// Otherwise bytes the input does not cover are left at 0; use [`decode_into`] to learn how many
/// bytes were actually produced.
///
/// # Errors
///
/// See [`decode_into`]. Also returns [`Error::SizeMismatch`] for a short input when
/// `abort_on_error` is set.
pub fn decode<S: RleStrategy>(
    strategy: &S,
    input: &[u8],
    out_capacity: usize,
    abort_on_error: bool,
) -> Result<Vec<u8>, Error> {
    let mut out = vec![0; out_capacity];
    let written = decode_into(strategy, input, &mut out, abort_on_error)?;
    check_exact(written, out_capacity, abort_on_error)?;
    Ok(out)
}

pub(crate) const fn check_exact(
    written: usize,
    expected: usize,
    abort_on_error: bool,
) -> Result<(), Error> {
    if abort_on_error && written < expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: written,
        });
    }
    Ok(())
}
