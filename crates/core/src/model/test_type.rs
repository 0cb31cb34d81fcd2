use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("test type {raw:?} is not supported; only quick and free tests are available")]
pub struct UnsupportedTestType {
    pub raw: String,
}

/// Which flavour of test the quiz screen was opened with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Quick,
    Free,
}

impl TestType {
    pub const ALL: [TestType; 2] = [TestType::Quick, TestType::Free];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Quick => "quick",
            TestType::Free => "free",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TestType::Quick => "Quick",
            TestType::Free => "Free",
        }
    }

    /// Screen title, e.g. `Quick Test`.
    #[must_use]
    pub fn title(self) -> String {
        format!("{} Test", self.label())
    }

    #[must_use]
    pub fn badge(self) -> String {
        self.as_str().to_uppercase()
    }

    /// Parses an optional route parameter; a missing value means `Quick`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedTestType` for anything other than `quick` or `free`.
    pub fn from_param(raw: Option<&str>) -> Result<Self, UnsupportedTestType> {
        raw.map_or(Ok(TestType::Quick), str::parse)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = UnsupportedTestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(TestType::Quick),
            "free" => Ok(TestType::Free),
            other => Err(UnsupportedTestType {
                raw: other.to_string(),
            }),
        }
    }
}
