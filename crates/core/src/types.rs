use serde::{Deserialize, Serialize};

/// Returned when a selector value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

/// Qualitative tag derived from genre text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    FeelGood,
    Family,
    Dark,
    Intense,
    Thoughtful,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Self::FeelGood,
        Self::Family,
        Self::Dark,
        Self::Intense,
        Self::Thoughtful,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FeelGood => "feel-good",
            Self::Family => "family",
            Self::Dark => "dark",
            Self::Intense => "intense",
            Self::Thoughtful => "thoughtful",
        }
    }

    /// Human label used on cards ("feel-good" -> "feel good").
    pub fn label(self) -> String {
        self.as_str().replacen('-', " ", 1)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseKindError {
                kind: "mood",
                value: s.to_string(),
            })
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Score descending, rating breaks ties.
    #[default]
    #[serde(rename = "score-desc")]
    ScoreDesc,
    #[serde(rename = "rating-desc")]
    RatingDesc,
    #[serde(rename = "year-desc")]
    YearDesc,
    #[serde(rename = "year-asc")]
    YearAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        Self::ScoreDesc,
        Self::RatingDesc,
        Self::YearDesc,
        Self::YearAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScoreDesc => "score-desc",
            Self::RatingDesc => "rating-desc",
            Self::YearDesc => "year-desc",
            Self::YearAsc => "year-asc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseKindError {
                kind: "sort key",
                value: s.to_string(),
            })
    }
}

/// UI colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ParseKindError {
                kind: "theme",
                value: other.to_string(),
            }),
        }
    }
}
