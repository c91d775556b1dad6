//! Verbal reading of a posterior probability.
//!
//! Maps a probability to one of five ordered phrases:
//!
//! | Probability   | Phrase                |
//! |---------------|-----------------------|
//! | `[0, 0.13]`   | almost certainly not  |
//! | `(0.13, 0.4]` | probably not          |
//! | `(0.4, 0.6]`  | about equally likely  |
//! | `(0.6, 0.86]` | probably              |
//! | `(0.86, 1]`   | almost certain        |

use serde::Serialize;

/// Five-level verbal probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbalProbability {
    AlmostCertainlyNot,
    ProbablyNot,
    AboutEquallyLikely,
    Probably,
    AlmostCertain,
}

/// Inclusive upper bound of each level, in ascending order.
pub const PROBABILITY_SCALE: [(f64, VerbalProbability); 5] = [
    (0.13, VerbalProbability::AlmostCertainlyNot),
    (0.4, VerbalProbability::ProbablyNot),
    (0.6, VerbalProbability::AboutEquallyLikely),
    (0.86, VerbalProbability::Probably),
    (1.0, VerbalProbability::AlmostCertain),
];

impl VerbalProbability {
    /// Classify `p`. None when `p` is NaN or outside [0, 1].
    pub fn from_probability(p: f64) -> Option<Self> {
        if p.is_nan() || p < 0.0 {
            return None;
        }
        PROBABILITY_SCALE
            .iter()
            .find(|(upper, _)| p <= *upper)
            .map(|(_, level)| *level)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerbalProbability::AlmostCertainlyNot => "almost certainly not",
            VerbalProbability::ProbablyNot => "probably not",
            VerbalProbability::AboutEquallyLikely => "about equally likely",
            VerbalProbability::Probably => "probably",
            VerbalProbability::AlmostCertain => "almost certain",
        }
    }
}

impl std::fmt::Display for VerbalProbability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VerbalProbability::*;

    #[test]
    fn extremes() {
        assert_eq!(VerbalProbability::from_probability(0.0), Some(AlmostCertainlyNot));
        assert_eq!(VerbalProbability::from_probability(1.0), Some(AlmostCertain));
    }

    #[test]
    fn boundaries_belong_to_lower_level() {
        assert_eq!(VerbalProbability::from_probability(0.13), Some(AlmostCertainlyNot));
        assert_eq!(VerbalProbability::from_probability(0.4), Some(ProbablyNot));
        assert_eq!(VerbalProbability::from_probability(0.6), Some(AboutEquallyLikely));
        assert_eq!(VerbalProbability::from_probability(0.86), Some(Probably));
    }

    #[test]
    fn interior_values() {
        assert_eq!(VerbalProbability::from_probability(0.2), Some(ProbablyNot));
        assert_eq!(VerbalProbability::from_probability(0.5), Some(AboutEquallyLikely));
        assert_eq!(VerbalProbability::from_probability(0.7), Some(Probably));
        assert_eq!(VerbalProbability::from_probability(0.9863), Some(AlmostCertain));
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(VerbalProbability::from_probability(-0.01), None);
        assert_eq!(VerbalProbability::from_probability(1.01), None);
        assert_eq!(VerbalProbability::from_probability(f64::NAN), None);
    }

    #[test]
    fn labels() {
        assert_eq!(AlmostCertainlyNot.label(), "almost certainly not");
        assert_eq!(AboutEquallyLikely.to_string(), "about equally likely");
    }
}
