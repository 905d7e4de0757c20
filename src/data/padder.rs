// ============================================================
// Layer 4 — Sequence Padder
// ============================================================
// Turns variable-length id sequences into one rectangular
// matrix, the shape every batch tensor needs.
//
//   [1, 2, 3]            [1, 2, 3, 0, 0]
//   [4, 5]         →     [4, 5, 0, 0, 0]
//   [6, 7, 8, 9, 1]      [6, 7, 8, 9, 1]
//
// Padding is appended at the END of each row (post-padding)
// with the reserved id 0. There is no pre-padding mode.
//
// Rows are never truncated: asking for a width smaller than a
// row is an error, not a silent cut.
//
// Reference: Rust Book §8 (Vectors)

use serde::{Deserialize, Serialize};

use crate::data::vocabulary::PAD_ID;
use crate::domain::error::PipelineError;

/// Row-major `rows × width` matrix of token ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPaddedBatch")]
pub struct PaddedBatch {
    rows:  usize,
    width: usize,
    data:  Vec<u32>,
}

/// Wire form, checked before it becomes a PaddedBatch
#[derive(Deserialize)]
struct RawPaddedBatch {
    rows:  usize,
    width: usize,
    data:  Vec<u32>,
}

impl TryFrom<RawPaddedBatch> for PaddedBatch {
    type Error = PipelineError;

    fn try_from(raw: RawPaddedBatch) -> Result<Self, Self::Error> {
        if raw.rows.checked_mul(raw.width) != Some(raw.data.len()) {
            return Err(PipelineError::MalformedMatrix {
                rows:  raw.rows,
                width: raw.width,
                len:   raw.data.len(),
            });
        }
        Ok(Self { rows: raw.rows, width: raw.width, data: raw.data })
    }
}

impl PaddedBatch {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `[rows, width]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.width]
    }

    pub fn row(&self, i: usize) -> &[u32] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Row `i` with its trailing padding removed. Exact, because
    /// the pad id is never assigned to a real token.
    pub fn unpadded_row(&self, i: usize) -> &[u32] {
        let row = self.row(i);
        let len = row.iter().rposition(|&id| id != PAD_ID).map_or(0, |p| p + 1);
        &row[..len]
    }

    /// Re-pad every row to a new width. Shrinking below the
    /// longest real row fails with `SequenceTooLong`.
    pub fn repad(&self, width: usize) -> Result<PaddedBatch, PipelineError> {
        let rows: Vec<&[u32]> = (0..self.rows).map(|i| self.unpadded_row(i)).collect();
        pad(&rows, Some(width))
    }

    /// Flat row-major view of all ids
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}

/// Right-pad `sequences` with the pad id up to `length`.
///
/// When `length` is None the width is the longest sequence in
/// the batch. When it is given, every sequence must fit in it.
pub fn pad<S: AsRef<[u32]>>(
    sequences: &[S],
    length:    Option<usize>,
) -> Result<PaddedBatch, PipelineError> {
    let longest = sequences.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
    let width   = length.unwrap_or(longest);

    let mut data = Vec::with_capacity(sequences.len() * width);
    for (row, seq) in sequences.iter().enumerate() {
        let seq = seq.as_ref();
        if seq.len() > width {
            return Err(PipelineError::SequenceTooLong { row, len: seq.len(), max: width });
        }
        data.extend_from_slice(seq);
        data.resize(data.len() + (width - seq.len()), PAD_ID);
    }

    Ok(PaddedBatch { rows: sequences.len(), width, data })
}
