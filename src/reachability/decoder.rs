//! Decoding solver assignments back into maze positions

use super::MazePath;
use crate::error::{EncodingError, EncodingResult};
use crate::sat::PositionCodec;
use tracing::debug;

/// Inverse of the position codec over a whole assignment
#[derive(Debug, Clone, Copy)]
pub struct AssignmentDecoder {
    codec: PositionCodec,
}

impl AssignmentDecoder {
    /// Decoder for a maze of side `size`
    pub fn new(size: usize) -> EncodingResult<Self> {
        Ok(Self {
            codec: PositionCodec::new(size)?,
        })
    }

    pub fn from_codec(codec: PositionCodec) -> Self {
        Self { codec }
    }

    pub fn num_bits(&self) -> usize {
        self.codec.num_bits()
    }

    /// Decode consecutive `num_bits` chunks of position variables.
    ///
    /// `assignment` must hold position variables only; a trailing partial
    /// chunk is an error rather than being dropped.
    pub fn decode(&self, assignment: &[bool]) -> EncodingResult<Vec<(usize, usize)>> {
        let num_bits = self.codec.num_bits();
        if assignment.len() % num_bits != 0 {
            return Err(EncodingError::malformed_assignment(format!(
                "{} values do not split into {}-bit positions",
                assignment.len(),
                num_bits
            )));
        }

        assignment
            .chunks_exact(num_bits)
            .map(|chunk| self.codec.decode(chunk))
            .collect()
    }

    /// Decode the position prefix of a full solver model for a formula
    /// unrolled over `num_steps` steps; auxiliary variables are ignored.
    pub fn decode_model(&self, model: &[bool], num_steps: usize) -> EncodingResult<MazePath> {
        let needed = self.codec.position_variable_count(num_steps)?;
        if model.len() < needed {
            return Err(EncodingError::malformed_assignment(format!(
                "model assigns {} variables, {} steps need {} position variables",
                model.len(),
                num_steps,
                needed
            )));
        }

        debug!(
            model_variables = model.len(),
            position_variables = needed,
            "decoding solver model"
        );
        let positions = self.decode(&model[..needed])?;
        Ok(MazePath::new(self.codec.size(), positions))
    }

    /// Decode an assignment made only of position variables
    pub fn decode_path(&self, assignment: &[bool]) -> EncodingResult<MazePath> {
        let positions = self.decode(assignment)?;
        Ok(MazePath::new(self.codec.size(), positions))
    }
}
