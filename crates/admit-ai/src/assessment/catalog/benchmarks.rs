use super::{CategoryId, InvalidCatalogError, Region};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A university and the score its admitted cohort typically reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub region: Region,
    /// `None` when the source sheet had no usable value.
    pub benchmark: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_benchmarks: BTreeMap<CategoryId, f64>,
}

impl Institution {
    pub fn new(name: impl Into<String>, region: Region, benchmark: f64) -> Self {
        Self {
            name: name.into(),
            region,
            benchmark: Some(benchmark),
            category_benchmarks: BTreeMap::new(),
        }
    }

    pub fn without_benchmark(name: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            region,
            benchmark: None,
            category_benchmarks: BTreeMap::new(),
        }
    }

    pub fn with_category_benchmark(mut self, category: CategoryId, value: f64) -> Self {
        self.category_benchmarks.insert(category, value);
        self
    }
}

/// Static institution reference data, kept in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkCatalog {
    institutions: Vec<Institution>,
}

impl BenchmarkCatalog {
    /// Institutions are identified by name within a region, so a repeated pair is rejected.
    pub fn new(institutions: Vec<Institution>) -> Result<Self, InvalidCatalogError> {
        let mut seen = BTreeSet::new();
        for institution in &institutions {
            if !seen.insert((&institution.region, institution.name.as_str())) {
                return Err(InvalidCatalogError::DuplicateInstitution {
                    region: institution.region.clone(),
                    name: institution.name.clone(),
                });
            }
        }
        Ok(Self { institutions })
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn for_region<'a>(&'a self, region: &'a Region) -> impl Iterator<Item = &'a Institution> {
        self.institutions
            .iter()
            .filter(move |institution| &institution.region == region)
    }

    pub fn regions(&self) -> BTreeSet<Region> {
        self.institutions
            .iter()
            .map(|institution| institution.region.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }
}
