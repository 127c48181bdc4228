use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the raw score of a hit is to be read.
///
/// Each variant is a small ranking strategy: it knows whether larger scores are better and
/// how a score maps onto the non-negative-for-useful-hits weight that the optimiser sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreType {
    /// A generic additive score where higher is better, used as is.
    #[default]
    CrhScore,
    /// A bitscore: higher is better, used as is.
    Bitscore,
    /// An e-value: lower is better. Its weight is `-log10(evalue)`.
    Evalue,
}

static SCORE_TYPE_NAMES: Map<&'static str, ScoreType> = phf_map! {
    "crh-score" => ScoreType::CrhScore,
    "crh_score" => ScoreType::CrhScore,
    "score" => ScoreType::CrhScore,
    "bitscore" => ScoreType::Bitscore,
    "bit-score" => ScoreType::Bitscore,
    "evalue" => ScoreType::Evalue,
    "e-value" => ScoreType::Evalue,
    "full-evalue" => ScoreType::Evalue,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown score type '{0}' (expected one of: crh-score, bitscore, evalue)")]
pub struct ParseScoreTypeError(pub String);

impl ScoreType {
    pub const fn higher_is_better(self) -> bool {
        match self {
            Self::CrhScore | Self::Bitscore => true,
            Self::Evalue => false,
        }
    }

    /// Orders two raw scores best first: `Ordering::Less` means `a` is better than `b`.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        if self.higher_is_better() {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    }

    /// Returns `true` if score `a` is strictly better than score `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// The additive weight of a hit with the given raw score.
    ///
    /// An e-value of exactly zero is clamped to the smallest positive `f64`, giving a large
    /// but finite weight.
    pub fn weight(self, score: f64) -> f64 {
        match self {
            Self::CrhScore | Self::Bitscore => score,
            Self::Evalue => -score.max(f64::MIN_POSITIVE).log10(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::CrhScore => "crh-score",
            Self::Bitscore => "bitscore",
            Self::Evalue => "evalue",
        }
    }
}

impl FromStr for ScoreType {
    type Err = ParseScoreTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCORE_TYPE_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ParseScoreTypeError(s.to_string()))
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
