//! Encouragement shown after grading and accuracy bands for the history view.

/// How a graded batch went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    /// Every answer correct
    Perfect,
    /// More than half correct
    Good,
    KeepTrying,
}

impl ResultTier {
    pub const fn from_score(score: usize, total: usize) -> Self {
        if total > 0 && score == total {
            Self::Perfect
        } else if score * 2 > total {
            Self::Good
        } else {
            Self::KeepTrying
        }
    }

    pub fn headline(self, score: usize, total: usize) -> String {
        match self {
            Self::Perfect => "All correct, brilliant!".to_string(),
            Self::Good => format!("Nice work! {score}/{total}"),
            Self::KeepTrying => format!("Keep going! {score}/{total}"),
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Perfect => "You are a little math genius!",
            Self::Good => "Keep practicing and you'll get even better!",
            Self::KeepTrying => "A little practice every day makes mental math easy.",
        }
    }
}

/// Accuracy band of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    Excellent,
    Fair,
    Poor,
}

impl AccuracyBand {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 100.0 {
            Self::Excellent
        } else if accuracy >= 70.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Fair => "fair",
            Self::Poor => "needs practice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_tier() {
        assert_eq!(ResultTier::from_score(10, 10), ResultTier::Perfect);
        assert_eq!(ResultTier::from_score(6, 10), ResultTier::Good);
        assert_eq!(ResultTier::from_score(5, 10), ResultTier::KeepTrying); // exactly half is not enough
        assert_eq!(ResultTier::from_score(2, 3), ResultTier::Good);
        assert_eq!(ResultTier::from_score(1, 1), ResultTier::Perfect);
        assert_eq!(ResultTier::from_score(0, 0), ResultTier::KeepTrying);
    }

    #[test]
    fn test_headline() {
        assert_eq!(ResultTier::Good.headline(7, 10), "Nice work! 7/10");
        assert_eq!(ResultTier::KeepTrying.headline(3, 10), "Keep going! 3/10");
    }

    #[test]
    fn test_accuracy_band() {
        assert_eq!(AccuracyBand::from_accuracy(100.0), AccuracyBand::Excellent);
        assert_eq!(AccuracyBand::from_accuracy(90.0), AccuracyBand::Fair);
        assert_eq!(AccuracyBand::from_accuracy(70.0), AccuracyBand::Fair);
        assert_eq!(AccuracyBand::from_accuracy(69.9), AccuracyBand::Poor);
        assert_eq!(AccuracyBand::from_accuracy(0.0), AccuracyBand::Poor);
    }
}
