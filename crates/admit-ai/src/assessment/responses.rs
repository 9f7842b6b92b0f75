use super::catalog::{CategoryId, QuestionCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The resolved answer for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Choice {
    Unanswered,
    Selected { option: String, points: f64 },
}

impl Choice {
    pub fn points(&self) -> f64 {
        match self {
            Choice::Unanswered => 0.0,
            Choice::Selected { points, .. } => *points,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Choice::Unanswered => None,
            Choice::Selected { option, .. } => Some(option),
        }
    }
}

/// A student's answers, one choice per catalog category.
///
/// Built against a catalog so every category resolves; tuning produces a new set instead of
/// editing this one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    choices: BTreeMap<CategoryId, Choice>,
}

impl ResponseSet {
    pub fn unanswered(catalog: &QuestionCatalog) -> Self {
        let choices = catalog
            .categories()
            .iter()
            .map(|category| (category.id, Choice::Unanswered))
            .collect();
        Self { choices }
    }

    /// Resolve option labels against the catalog. A blank label leaves the category
    /// unanswered.
    pub fn resolve(
        catalog: &QuestionCatalog,
        answers: &BTreeMap<CategoryId, String>,
    ) -> Result<Self, ResponseError> {
        Self::unanswered(catalog).with_adjustments(catalog, answers)
    }

    pub fn with_choice(
        &self,
        catalog: &QuestionCatalog,
        category: CategoryId,
        label: &str,
    ) -> Result<Self, ResponseError> {
        let mut next = self.clone();
        next.set(catalog, category, label)?;
        Ok(next)
    }

    pub fn with_adjustments(
        &self,
        catalog: &QuestionCatalog,
        adjustments: &BTreeMap<CategoryId, String>,
    ) -> Result<Self, ResponseError> {
        let mut next = self.clone();
        for (&category, label) in adjustments {
            next.set(catalog, category, label)?;
        }
        Ok(next)
    }

    pub fn choice(&self, category: CategoryId) -> Option<&Choice> {
        self.choices.get(&category)
    }

    pub fn earned(&self, category: CategoryId) -> f64 {
        self.choice(category).map(Choice::points).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &Choice)> {
        self.choices.iter()
    }

    pub fn answered(&self) -> usize {
        self.choices
            .values()
            .filter(|choice| matches!(choice, Choice::Selected { .. }))
            .count()
    }

    fn set(
        &mut self,
        catalog: &QuestionCatalog,
        category_id: CategoryId,
        label: &str,
    ) -> Result<(), ResponseError> {
        let category = catalog
            .category(category_id)
            .ok_or(ResponseError::UnknownCategory(category_id))?;

        let choice = if label.trim().is_empty() {
            Choice::Unanswered
        } else {
            let option = category
                .option(label)
                .ok_or_else(|| ResponseError::UnknownOption {
                    category: category_id,
                    option: label.trim().to_string(),
                })?;
            Choice::Selected {
                option: option.label.clone(),
                points: option.points,
            }
        };

        self.choices.insert(category_id, choice);
        Ok(())
    }
}

/// A submitted answer that does not match the question catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponseError {
    #[error("category {0} is not part of the question catalog")]
    UnknownCategory(CategoryId),
    #[error("'{option}' is not an option of category {category}")]
    UnknownOption { category: CategoryId, option: String },
}
