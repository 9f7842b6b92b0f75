mod benchmarks;
mod questions;

pub use benchmarks::{BenchmarkCatalog, Institution};
pub use questions::{AnswerOption, Category, QuestionCatalog};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an assessed category (1..N in the shipped question set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u16);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target admission region, usually a country ("USA", "UK", ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    pub fn new(name: impl AsRef<str>) -> Result<Self, InvalidCatalogError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidCatalogError::EmptyRegion);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Region {
    type Error = InvalidCatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Region::new(value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

/// Malformed reference data. Fatal to the scoring call that observes it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidCatalogError {
    #[error("category {0} is defined more than once")]
    DuplicateCategory(CategoryId),
    #[error("category {0} has no answer options, so its maximum is undefined")]
    MissingCap(CategoryId),
    #[error("option '{option}' in category {category} has invalid points {points}")]
    InvalidPoints {
        category: CategoryId,
        option: String,
        points: f64,
    },
    #[error("option '{option}' appears more than once in category {category}")]
    DuplicateOption { category: CategoryId, option: String },
    #[error("weight {weight} for category {category} in region {region} is outside 0.0..=1.0")]
    WeightOutOfRange {
        region: Region,
        category: CategoryId,
        weight: f64,
    },
    #[error("weight profile for region {region} references unknown category {category}")]
    UnknownWeightCategory { region: Region, category: CategoryId },
    #[error("region {region} lists more than one weight for category {category}")]
    DuplicateWeight { region: Region, category: CategoryId },
    #[error("institution '{name}' is listed more than once in region {region}")]
    DuplicateInstitution { region: Region, name: String },
    #[error("answer to category {0} does not match any catalog category")]
    UnknownAnswerCategory(CategoryId),
    #[error("answer '{option}' is not an option of category {category} in the catalog")]
    UnknownAnswerOption { category: CategoryId, option: String },
    #[error("region {0} has more than one weight profile")]
    DuplicateWeightProfile(Region),
    #[error("no weight profile configured for region {0}")]
    MissingWeightProfile(Region),
    #[error("region name must not be empty")]
    EmptyRegion,
}
