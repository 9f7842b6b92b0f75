//! CSV readers for the question, weight and benchmark catalogs.
//!
//! The core only sees the parsed catalogs; where the rows come from stays here.

mod normalizer;
mod parser;

use super::catalog::{
    AnswerOption, BenchmarkCatalog, Category, CategoryId, InvalidCatalogError, QuestionCatalog,
    Region,
};
use super::weights::{RegionalWeightProfile, WeightProfiles};
use parser::{QuestionRow, WeightRow};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no {column} column found in benchmark sheet")]
    MissingColumn { column: &'static str },
    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error(transparent)]
    Catalog(#[from] InvalidCatalogError),
}

/// Reads `Category ID, Category, Option, Points` rows.
pub struct QuestionCatalogLoader;

impl QuestionCatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<QuestionCatalog, CatalogLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<QuestionCatalog, CatalogLoadError> {
        let rows: Vec<QuestionRow> = parser::parse_rows(reader)?;

        let mut categories: Vec<Category> = Vec::new();
        for row in rows {
            let id = CategoryId(row.category_id);
            let option = AnswerOption::new(row.option, row.points);
            match categories.iter_mut().find(|category| category.id == id) {
                Some(category) => category.options.push(option),
                None => categories.push(Category::new(id, row.category, vec![option])),
            }
        }

        let catalog = QuestionCatalog::new(categories)?;
        info!(categories = catalog.len(), "question catalog loaded");
        Ok(catalog)
    }
}

/// Reads `Region, Category ID, Weight` rows into one profile per region.
pub struct WeightProfileLoader;

impl WeightProfileLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<WeightProfiles, CatalogLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<WeightProfiles, CatalogLoadError> {
        let rows: Vec<WeightRow> = parser::parse_rows(reader)?;

        let mut by_region: BTreeMap<Region, BTreeMap<CategoryId, f64>> = BTreeMap::new();
        for (offset, row) in rows.into_iter().enumerate() {
            let region = Region::new(&row.region).map_err(|_| CatalogLoadError::InvalidValue {
                row: offset + 2,
                column: "Region".to_string(),
                value: row.region.clone(),
            })?;
            let category = CategoryId(row.category_id);
            let weights = by_region.entry(region.clone()).or_default();
            if weights.insert(category, row.weight).is_some() {
                return Err(InvalidCatalogError::DuplicateWeight { region, category }.into());
            }
        }

        let profiles = by_region
            .into_iter()
            .map(|(region, weights)| RegionalWeightProfile::new(region, weights))
            .collect::<Result<Vec<_>, _>>()?;
        let profiles = WeightProfiles::new(profiles)?;
        info!(regions = profiles.len(), "weight profiles loaded");
        Ok(profiles)
    }
}

/// Reads an institution sheet, locating its columns by header keywords.
pub struct BenchmarkCatalogLoader;

impl BenchmarkCatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BenchmarkCatalog, CatalogLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<BenchmarkCatalog, CatalogLoadError> {
        let institutions = parser::parse_institutions(reader)?;
        let catalog = BenchmarkCatalog::new(institutions)?;
        info!(
            institutions = catalog.len(),
            regions = catalog.regions().len(),
            "benchmark catalog loaded"
        );
        Ok(catalog)
    }
}
