//! Compact UID sequence sets.
//!
//! A [`SequenceSet`] is an ordered, non-overlapping collection of
//! inclusive UID ranges. Its wire form reuses the `uid1`/`uid2` pair
//! shape the exporter already uses for flag-update and expunge entries
//! (§6.3) rather than inventing a new primitive: each range is
//! 8 bytes, `seq1: u32 LE` followed by `seq2: u32 LE`.

/// An ordered, non-overlapping set of inclusive UID ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceSet {
    ranges: Vec<(u32, u32)>,
}

impl SequenceSet {
    /// An empty sequence set.
    #[must_use]
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Build a sequence set from ranges, without validating ordering.
    ///
    /// Callers that cannot guarantee sorted, non-overlapping input
    /// should use [`SequenceSet::from_sorted_ranges`] instead, which
    /// validates.
    #[must_use]
    pub fn from_ranges_unchecked(ranges: Vec<(u32, u32)>) -> Self {
        Self { ranges }
    }

    /// Build a sequence set from ranges, validating that they are
    /// sorted ascending, non-overlapping, and each `seq1 <= seq2`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first ordering violation found.
    pub fn from_sorted_ranges(ranges: Vec<(u32, u32)>) -> Result<Self, String> {
        let mut prev_end: Option<u32> = None;
        for &(seq1, seq2) in &ranges {
            if seq1 > seq2 {
                return Err(format!("range ({seq1}, {seq2}) has seq1 > seq2"));
            }
            if let Some(prev) = prev_end {
                if seq1 <= prev {
                    return Err(format!(
                        "range ({seq1}, {seq2}) overlaps or is out of order after end {prev}"
                    ));
                }
            }
            prev_end = Some(seq2);
        }
        Ok(Self { ranges })
    }

    /// A single-UID sequence set.
    #[must_use]
    pub fn single(uid: u32) -> Self {
        Self {
            ranges: vec![(uid, uid)],
        }
    }

    /// True if this set contains no UIDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The ranges, in ascending order.
    #[must_use]
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    /// Encode as `8 * ranges.len()` bytes: repeated `{seq1: u32 LE, seq2: u32 LE}`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.ranges.len() * 8);
        for &(seq1, seq2) in &self.ranges {
            buf.extend_from_slice(&seq1.to_le_bytes());
            buf.extend_from_slice(&seq2.to_le_bytes());
        }
        buf
    }

    /// Decode a sequence set from its wire bytes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `bytes.len()` is not a multiple of 8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() % 8 != 0 {
            return Err(format!(
                "sequence set byte length {} is not a multiple of 8",
                bytes.len()
            ));
        }
        let ranges = bytes
            .chunks_exact(8)
            .map(|chunk| {
                let seq1 = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                let seq2 = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
                (seq1, seq2)
            })
            .collect();
        Ok(Self { ranges })
    }
}
