//! Greedy, single-pass QFS encoder.
//!
//! Translated from `qfs/qfs.go`'s `Encode` / `writeCompressible` /
//! `writeFinalBlocks` / `writeNonRepeatingBlocks`. The original writes
//! directly to an `io.Writer`; this port builds the compressed stream in a
//! `Vec<u8>` instead, since encoding never fails (there is no writer to
//! report a short write from) and the container layer is the only place
//! that needs an abstract `Write`.

use crate::config::{
    QFS_FOUR_BYTE_COUNT, QFS_FOUR_BYTE_OFFSET_MAX, QFS_MAX_LITERAL_BLOCK, QFS_SIGNATURE,
    QFS_THREE_BYTE_COUNT, QFS_THREE_BYTE_OFFSET_MAX, QFS_TWO_BYTE_COUNT, QFS_TWO_BYTE_OFFSET_MAX,
};

use super::types::{pack_four_byte, pack_literal_only, pack_terminator, pack_three_byte, pack_two_byte};

/// The narrowest control-byte family able to represent a given
/// `(copy_count, copy_offset)` pair.
#[derive(Clone, Copy)]
enum Family {
    Two,
    Three,
    Four,
}

fn choose_family(copy_count: u32, copy_offset: u32) -> Option<Family> {
    if QFS_TWO_BYTE_COUNT.contains(&copy_count) && copy_offset <= QFS_TWO_BYTE_OFFSET_MAX {
        Some(Family::Two)
    } else if QFS_THREE_BYTE_COUNT.contains(&copy_count) && copy_offset <= QFS_THREE_BYTE_OFFSET_MAX {
        Some(Family::Three)
    } else if QFS_FOUR_BYTE_COUNT.contains(&copy_count) && copy_offset <= QFS_FOUR_BYTE_OFFSET_MAX {
        Some(Family::Four)
    } else {
        None
    }
}

fn emit_control(out: &mut Vec<u8>, family: Family, literal_run: u32, copy_count: u32, copy_offset: u32) {
    match family {
        Family::Two => out.extend_from_slice(&pack_two_byte(literal_run, copy_count, copy_offset)),
        Family::Three => out.extend_from_slice(&pack_three_byte(literal_run, copy_count, copy_offset)),
        Family::Four => out.extend_from_slice(&pack_four_byte(literal_run, copy_count, copy_offset)),
    }
}

/// Length of the run of bytes identical to `data[i]` starting at `i`
/// (inclusive), i.e. how many consecutive copies of that byte follow.
fn repeat_run_len(data: &[u8], i: usize) -> u32 {
    let v = data[i];
    let mut j = i + 1;
    while j < data.len() && data[j] == v {
        j += 1;
    }
    (j - i) as u32
}

/// Emits zero or more literal-only blocks covering all of `data`, in chunks
/// of up to [`QFS_MAX_LITERAL_BLOCK`] bytes. `data.len()` must already be a
/// multiple of 4; callers are responsible for folding any 0..3-byte residue
/// into the following control block instead.
fn write_literal_only_blocks(out: &mut Vec<u8>, mut data: &[u8]) {
    debug_assert_eq!(data.len() % 4, 0);
    while data.len() >= QFS_MAX_LITERAL_BLOCK {
        out.push(pack_literal_only(QFS_MAX_LITERAL_BLOCK as u32));
        out.extend_from_slice(&data[..QFS_MAX_LITERAL_BLOCK]);
        data = &data[QFS_MAX_LITERAL_BLOCK..];
    }
    if !data.is_empty() {
        out.push(pack_literal_only(data.len() as u32));
        out.extend_from_slice(data);
    }
}

/// Flushes the literal run `data[start..start+literal_run_total]` as
/// literal-only blocks (quantised to multiples of 4), folding the 0..3-byte
/// residue into the `P` field of the following control block.
#[allow(clippy::too_many_arguments)]
fn flush_literal_and_control(
    out: &mut Vec<u8>,
    data: &[u8],
    start: usize,
    literal_run_total: usize,
    family: Family,
    copy_count: u32,
    copy_offset: u32,
) {
    let residue = literal_run_total % 4;
    let full_len = literal_run_total - residue;
    write_literal_only_blocks(out, &data[start..start + full_len]);

    let residue_bytes = &data[start + full_len..start + literal_run_total];
    emit_control(out, family, residue as u32, copy_count, copy_offset);
    out.extend_from_slice(residue_bytes);
}

/// Flushes all remaining, non-repeating input bytes as literal-only blocks
/// followed by the mandatory terminator carrying the final 0..3-byte
/// residue.
fn write_final_blocks(out: &mut Vec<u8>, data: &[u8]) {
    let residue = data.len() % 4;
    let full_len = data.len() - residue;
    write_literal_only_blocks(out, &data[..full_len]);
    out.push(pack_terminator(residue as u32));
    out.extend_from_slice(&data[full_len..]);
}

/// Compresses `data` into a QFS stream: the 5-byte header followed by the
/// control-byte-encoded body.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 8 + 16);
    out.extend_from_slice(&QFS_SIGNATURE);
    out.push(((data.len() >> 16) & 0xFF) as u8);
    out.push(((data.len() >> 8) & 0xFF) as u8);
    out.push((data.len() & 0xFF) as u8);

    let mut last_occurrence: [Option<usize>; 256] = [None; 256];
    let mut next_write_pos = 0usize;
    let mut i = 0usize;

    while i < data.len() {
        let v = data[i] as usize;
        match last_occurrence[v] {
            None => {
                last_occurrence[v] = Some(i);
                i += 1;
            }
            Some(prev) => {
                let repeat_count = repeat_run_len(data, i);
                let copy_offset = (i - prev) as u32;
                match choose_family(repeat_count, copy_offset) {
                    Some(family) => {
                        flush_literal_and_control(
                            &mut out,
                            data,
                            next_write_pos,
                            i - next_write_pos,
                            family,
                            repeat_count,
                            copy_offset,
                        );
                        next_write_pos = i + repeat_count as usize;
                        i += repeat_count as usize;
                    }
                    None => {
                        last_occurrence[v] = Some(i);
                        i += 1;
                    }
                }
            }
        }
    }

    write_final_blocks(&mut out, &data[next_write_pos..]);
    out
}
