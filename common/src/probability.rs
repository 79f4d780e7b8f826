use crate::AppError;

/// Number of digit classes the engine scores (0 through 9)
pub const DIGIT_CLASSES: usize = 10;

/// Per-class confidence returned by the inference engine.
///
/// Index `i` holds the score for digit `i`. The length is fixed, so a
/// malformed engine response is rejected at construction instead of
/// producing a short table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityVector {
    scores: [f64; DIGIT_CLASSES],
}

impl ProbabilityVector {
    pub fn new(scores: [f64; DIGIT_CLASSES]) -> Self {
        Self { scores }
    }

    /// Build from whatever the engine handed back
    pub fn from_scores(scores: Vec<f64>) -> Result<Self, AppError> {
        let len = scores.len();
        let scores: [f64; DIGIT_CLASSES] = scores.try_into().map_err(|_| {
            AppError::Boundary(format!(
                "Engine returned {} scores, expected {}",
                len, DIGIT_CLASSES
            ))
        })?;
        Ok(Self { scores })
    }

    pub fn scores(&self) -> &[f64; DIGIT_CLASSES] {
        &self.scores
    }

    /// Iterate as (digit, score) pairs in digit order
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(|(digit, &score)| (digit as u8, score))
    }

    /// Digit with the highest score. Ties resolve to the lower digit.
    pub fn best_guess(&self) -> u8 {
        let mut best = 0;
        for (digit, score) in self.iter() {
            if score > self.scores[best as usize] {
                best = digit;
            }
        }
        best
    }
}
