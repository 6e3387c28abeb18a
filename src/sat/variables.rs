//! Variable layout and the bit-level position codec

use crate::error::{EncodingError, EncodingResult};
use crate::maze::Maze;
use std::ops::RangeInclusive;

/// Signed DIMACS literal: magnitude is the 1-based variable, sign the polarity
pub type Literal = i32;

/// Build a literal for a 1-based variable index
pub fn make_literal(variable: usize, positive: bool) -> EncodingResult<Literal> {
    debug_assert!(variable > 0, "variable 0 is reserved as clause terminator");
    let var = Literal::try_from(variable)
        .map_err(|_| EncodingError::TooManyVariables { required: variable })?;
    Ok(if positive { var } else { -var })
}

/// Number of bits needed to address every cell of a maze of side `size`.
///
/// This is `ceil(log2(size * size))`, raised to 1 for the single-cell maze
/// so that every time step still owns a variable.
pub fn bits_for_size(size: usize) -> EncodingResult<usize> {
    if size == 0 {
        return Err(EncodingError::DegenerateBitWidth { size });
    }
    let cells = size
        .checked_mul(size)
        .ok_or(EncodingError::DegenerateBitWidth { size })?;
    let bits = if cells <= 1 {
        0
    } else {
        (usize::BITS - (cells - 1).leading_zeros()) as usize
    };
    Ok(bits.max(1))
}

/// Maps grid coordinates to fixed-width bit vectors (MSB first) and back,
/// and lays those vectors out as per-step variable blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionCodec {
    size: usize,
    num_bits: usize,
}

impl PositionCodec {
    pub fn new(size: usize) -> EncodingResult<Self> {
        let num_bits = bits_for_size(size)?;
        Ok(Self { size, num_bits })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Encode `(row, col)` as `num_bits` booleans, most significant bit first
    pub fn encode(&self, row: usize, col: usize) -> EncodingResult<Vec<bool>> {
        let index = row.saturating_mul(self.size).saturating_add(col);
        if row >= self.size || col >= self.size {
            return Err(EncodingError::EncodingOverflow {
                index,
                num_bits: self.num_bits,
            });
        }

        Ok((0..self.num_bits)
            .rev()
            .map(|shift| (index >> shift) & 1 == 1)
            .collect())
    }

    /// Decode an MSB-first bit vector back to `(row, col)`.
    ///
    /// Bit patterns past the last cell exist whenever `size * size` is not a
    /// power of two; those are reported as `UnknownLiteral`.
    pub fn decode(&self, bits: &[bool]) -> EncodingResult<(usize, usize)> {
        if bits.len() != self.num_bits {
            return Err(EncodingError::malformed_assignment(format!(
                "expected {} bits per position, got {}",
                self.num_bits,
                bits.len()
            )));
        }

        let index = bits
            .iter()
            .fold(0usize, |acc, &bit| (acc << 1) | usize::from(bit));
        self.position_of(index)
    }

    /// Convert a row-major cell index to coordinates
    pub fn position_of(&self, index: usize) -> EncodingResult<(usize, usize)> {
        let cells = self.size * self.size;
        if index >= cells {
            return Err(EncodingError::UnknownLiteral { index, cells });
        }
        Ok((index / self.size, index % self.size))
    }

    /// First variable of the block holding the position at `step`
    pub fn block_base(&self, step: usize) -> usize {
        step * self.num_bits + 1
    }

    /// Variables of the block holding the position at `step`
    pub fn block_range(&self, step: usize) -> RangeInclusive<usize> {
        self.block_base(step)..=self.block_base(step) + self.num_bits - 1
    }

    /// Number of position variables across `num_steps + 1` states
    pub fn position_variable_count(&self, num_steps: usize) -> EncodingResult<usize> {
        num_steps
            .checked_add(1)
            .and_then(|states| states.checked_mul(self.num_bits))
            .ok_or(EncodingError::TooManyVariables { required: usize::MAX })
    }

    /// Literals pinning the block at `step` to `(row, col)`
    pub fn pin_literals(&self, step: usize, row: usize, col: usize) -> EncodingResult<Vec<Literal>> {
        let base = self.block_base(step);
        self.encode(row, col)?
            .into_iter()
            .enumerate()
            .map(|(bit, value)| make_literal(base + bit, value))
            .collect()
    }
}

/// Read-only context shared by every stage of the encoding
#[derive(Debug, Clone, Copy)]
pub struct EncodingContext<'m> {
    maze: &'m Maze,
    codec: PositionCodec,
}

impl<'m> EncodingContext<'m> {
    pub fn new(maze: &'m Maze) -> EncodingResult<Self> {
        let codec = PositionCodec::new(maze.size)?;
        Ok(Self { maze, codec })
    }

    pub fn maze(&self) -> &'m Maze {
        self.maze
    }

    pub fn codec(&self) -> &PositionCodec {
        &self.codec
    }

    pub fn num_bits(&self) -> usize {
        self.codec.num_bits()
    }
}
