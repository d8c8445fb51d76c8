//! Sparse header-patch encoding (§4.3, §4.7).
//!
//! Both the per-extension header patch and the main-index header
//! patch compress a `(data, mask)` pair into `(offset, size, bytes)`
//! runs over the dirty bytes, via the same linear scan. The only
//! difference is which wire form the runs are written in and what
//! `RecordType` tag the caller emits them under.

use mailidx_kernel::RecordType;

use crate::wire;

/// One contiguous dirty run: `data[offset .. offset + bytes.len()]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// Scan `mask[0..alloc_size]` and return the maximal runs of
/// consecutive nonzero bytes, each paired with the corresponding slice
/// of `data`.
///
/// # Panics
///
/// Panics if `data.len() < alloc_size` or `mask.len() < alloc_size`.
#[must_use]
pub fn scan_runs(data: &[u8], mask: &[u8], alloc_size: usize) -> Vec<Run> {
    assert!(data.len() >= alloc_size, "data shorter than alloc_size");
    assert!(mask.len() >= alloc_size, "mask shorter than alloc_size");

    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for offset in 0..=alloc_size {
        let dirty = offset < alloc_size && mask[offset] != 0;
        match (run_start, dirty) {
            (None, true) => run_start = Some(offset),
            (Some(start), false) => {
                runs.push(Run {
                    offset: start,
                    bytes: data[start..offset].to_vec(),
                });
                run_start = None;
            }
            _ => {}
        }
    }
    debug_assert!(run_start.is_none(), "scan_runs must close every run by alloc_size");
    runs
}

/// The largest index `i` such that `mask[i - 1] != 0`, or `0` if the
/// mask is entirely zero. Used by `ext_intro` for header auto-grow.
#[must_use]
pub fn significant_len(mask: &[u8]) -> usize {
    mask.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1)
}

/// Encode `runs` as a 16-bit-offset header-update body (main index, or
/// a small extension header), padded to 4 bytes. Each run's `offset +
/// size` must not exceed `hdr_size`.
#[must_use]
pub fn encode_16(runs: &[Run], hdr_size: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for run in runs {
        debug_assert!(
            run.offset + run.bytes.len() <= hdr_size,
            "header patch run [{}, {}) spills past advertised header size {hdr_size}",
            run.offset,
            run.offset + run.bytes.len()
        );
        wire::encode_header_run_16(&mut buf, run.offset, &run.bytes);
    }
    wire::pad_to_4(&mut buf);
    buf
}

/// Encode `runs` as a 32-bit-offset header-update body (large
/// extension header, `alloc_size >= 65536`), padded to 4 bytes.
#[must_use]
pub fn encode_32(runs: &[Run], hdr_size: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for run in runs {
        debug_assert!(
            run.offset + run.bytes.len() <= hdr_size,
            "header patch run [{}, {}) spills past advertised header size {hdr_size}",
            run.offset,
            run.offset + run.bytes.len()
        );
        wire::encode_header_run_32(&mut buf, run.offset, &run.bytes);
    }
    wire::pad_to_4(&mut buf);
    buf
}

/// Threshold above which an extension header patch must use the
/// 32-bit offset form (§4.3).
pub const LARGE_HEADER_THRESHOLD: usize = 65536;

/// Encode a main-index header patch (always the 16-bit form: the main
/// header is small by construction) and, if any run was produced,
/// return its record type and body.
#[must_use]
pub fn encode_main_hdr_update(
    data: &[u8],
    mask: &[u8],
    hdr_size: usize,
) -> Option<(RecordType, Vec<u8>)> {
    let runs = scan_runs(data, mask, hdr_size);
    if runs.is_empty() {
        return None;
    }
    Some((RecordType::HeaderUpdate, encode_16(&runs, hdr_size)))
}

/// Encode an extension header patch, selecting the 16-bit or 32-bit
/// wire form by `alloc_size` (§4.3). Returns `None` if the mask has no
/// dirty bytes.
#[must_use]
pub fn encode_ext_hdr_update(
    data: &[u8],
    mask: &[u8],
    alloc_size: usize,
    hdr_size: usize,
) -> Option<(RecordType, Vec<u8>)> {
    let runs = scan_runs(data, mask, alloc_size);
    if runs.is_empty() {
        return None;
    }
    if alloc_size >= LARGE_HEADER_THRESHOLD {
        Some((RecordType::ExtHdrUpdate32, encode_32(&runs, hdr_size)))
    } else {
        Some((RecordType::ExtHdrUpdate, encode_16(&runs, hdr_size)))
    }
}
