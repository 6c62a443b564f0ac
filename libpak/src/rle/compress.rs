use tracing::{debug, instrument, trace};

use super::{Code, RleStrategy, MIN_REPEAT};

/// Output size [`encode`] reserves for an input of `input_len` bytes
#[must_use]
pub const fn max_encoded_len(input_len: usize) -> usize {
    input_len + input_len / 2 + 4
}

// length of the run of identical bytes at the start of `data`, capped at `max`
fn run_length(data: &[u8], max: usize) -> usize {
    data.first().map_or(0, |&first| {
        data.iter().take(max).take_while(|&&b| b == first).count()
    })
}

fn emit<S: RleStrategy>(
    strategy: &S,
    code: Code,
    payload: &[u8],
    out: &mut [u8],
    out_ptr: &mut usize,
) -> bool {
    let Some(written) = strategy.write_code(code, &mut out[*out_ptr..]) else {
        return false;
    };
    let start = *out_ptr + written;
    let Some(slot) = out.get_mut(start..start + payload.len()) else {
        return false;
    };
    slot.copy_from_slice(payload);
    *out_ptr = start + payload.len();
    true
}

/// Greedily compresses `input` into `out`, returning the number of bytes written.
///
/// Runs of at least [`MIN_REPEAT`] identical bytes become repeat codes; everything else is
/// gathered into copy runs which end right before the next such run. If `out` fills up, encoding
/// stops after the last complete code and the returned length reflects that.
#[instrument(skip(strategy, input, out), fields(in_len = input.len(), out_len = out.len()), level = "trace")]
pub fn encode_into<S: RleStrategy>(strategy: &S, input: &[u8], out: &mut [u8]) -> usize {
    let (mut in_ptr, mut out_ptr) = (0usize, 0usize);

    while in_ptr < input.len() {
        let run = run_length(&input[in_ptr..], S::MAX_REPEAT);
        if run >= MIN_REPEAT {
            let fill = &input[in_ptr..=in_ptr];
            if !emit(strategy, Code::repeat(run), fill, out, &mut out_ptr) {
                debug!("output full at input offset {in_ptr}");
                break;
            }
            in_ptr += run;
            continue;
        }

        // the byte at `in_ptr` starts no repeat, so the copy run holds at least one byte
        let start = in_ptr;
        let copy_end = input.len().min(start + S::MAX_COPY);
        in_ptr += 1;
        while in_ptr < copy_end && run_length(&input[in_ptr..], MIN_REPEAT) < MIN_REPEAT {
            in_ptr += 1;
        }
        let literal = &input[start..in_ptr];
        if !emit(strategy, Code::copy(literal.len()), literal, out, &mut out_ptr) {
            debug!("output full at input offset {start}");
            break;
        }
    }

    trace!("encoded {} bytes into {out_ptr}", input.len());
    out_ptr
}

/// Compresses `input` into a new buffer trimmed to the compressed length.
#[must_use]
pub fn encode<S: RleStrategy>(strategy: &S, input: &[u8]) -> Vec<u8> {
    let mut out = vec![0; max_encoded_len(input.len())];
    let len = encode_into(strategy, input, &mut out);
    out.truncate(len);
    out
}
