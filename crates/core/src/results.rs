use serde::{Deserialize, Serialize};

/// Final tally of a quiz, as shown on the results screen.
///
/// Pure projection of `(score, total)`; a score above the total is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    score: u32,
    total: u32,
}

impl QuizResult {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        Self {
            score: score.min(total),
            total,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total.saturating_sub(self.score)
    }

    /// Percentage correct, rounded to two decimal places; `0.0` for an empty quiz.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let percent = f64::from(self.score) / f64::from(self.total) * 100.0;
        (percent * 100.0).round() / 100.0
    }

    /// Accuracy with exactly two decimals, without the percent sign.
    #[must_use]
    pub fn accuracy_label(&self) -> String {
        format!("{:.2}", self.accuracy())
    }
}
