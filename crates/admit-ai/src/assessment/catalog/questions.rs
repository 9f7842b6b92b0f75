use super::{CategoryId, InvalidCatalogError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One selectable answer and the points it earns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub points: f64,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, points: f64) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

/// An assessed category. Leaving it unanswered is always allowed and earns zero points,
/// so the option list only holds real answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    pub options: Vec<AnswerOption>,
}

impl Category {
    pub fn new(id: CategoryId, label: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id,
            label: label.into(),
            options,
        }
    }

    /// Value of the highest-scoring option.
    pub fn cap(&self) -> Option<f64> {
        self.options
            .iter()
            .map(|option| option.points)
            .fold(None, |best, points| match best {
                Some(current) if current >= points => Some(current),
                _ => Some(points),
            })
    }

    /// Case-insensitive lookup on the trimmed label.
    pub fn option(&self, label: &str) -> Option<&AnswerOption> {
        let wanted = label.trim();
        self.options
            .iter()
            .find(|option| option.label.trim().eq_ignore_ascii_case(wanted))
    }

    fn validate(&self) -> Result<(), InvalidCatalogError> {
        if self.options.is_empty() {
            return Err(InvalidCatalogError::MissingCap(self.id));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !option.points.is_finite() || option.points < 0.0 {
                return Err(InvalidCatalogError::InvalidPoints {
                    category: self.id,
                    option: option.label.clone(),
                    points: option.points,
                });
            }
            if !seen.insert(option.label.trim().to_ascii_lowercase()) {
                return Err(InvalidCatalogError::DuplicateOption {
                    category: self.id,
                    option: option.label.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Ordered, validated set of categories. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionCatalog {
    categories: Vec<Category>,
}

impl QuestionCatalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, InvalidCatalogError> {
        let mut ids = HashSet::new();
        for category in &categories {
            if !ids.insert(category.id) {
                return Err(InvalidCatalogError::DuplicateCategory(category.id));
            }
            category.validate()?;
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.category(id).is_some()
    }

    pub fn cap(&self, id: CategoryId) -> Option<f64> {
        self.category(id).and_then(Category::cap)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
