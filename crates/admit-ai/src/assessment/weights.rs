use super::catalog::{CategoryId, InvalidCatalogError, QuestionCatalog, Region};
use serde::Serialize;
use std::collections::BTreeMap;

/// How much a region's admissions process values each category.
///
/// Weights are importance multipliers in `0.0..=1.0`; they are not expected to sum to one.
/// Categories without an entry weigh zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalWeightProfile {
    region: Region,
    weights: BTreeMap<CategoryId, f64>,
}

impl RegionalWeightProfile {
    pub fn new(
        region: Region,
        weights: BTreeMap<CategoryId, f64>,
    ) -> Result<Self, InvalidCatalogError> {
        for (&category, &weight) in &weights {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(InvalidCatalogError::WeightOutOfRange {
                    region,
                    category,
                    weight,
                });
            }
        }

        Ok(Self { region, weights })
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn weight(&self, category: CategoryId) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    pub fn weights(&self) -> &BTreeMap<CategoryId, f64> {
        &self.weights
    }

    /// Every weighted category must exist in the question catalog.
    pub fn check_against(&self, catalog: &QuestionCatalog) -> Result<(), InvalidCatalogError> {
        match self
            .weights
            .keys()
            .find(|category| !catalog.contains(**category))
        {
            Some(&category) => Err(InvalidCatalogError::UnknownWeightCategory {
                region: self.region.clone(),
                category,
            }),
            None => Ok(()),
        }
    }
}

/// The configured set of regional profiles, keyed by region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightProfiles {
    profiles: BTreeMap<Region, RegionalWeightProfile>,
}

impl WeightProfiles {
    pub fn new(
        profiles: impl IntoIterator<Item = RegionalWeightProfile>,
    ) -> Result<Self, InvalidCatalogError> {
        let mut by_region = BTreeMap::new();
        for profile in profiles {
            let region = profile.region.clone();
            if by_region.insert(region.clone(), profile).is_some() {
                return Err(InvalidCatalogError::DuplicateWeightProfile(region));
            }
        }

        Ok(Self {
            profiles: by_region,
        })
    }

    pub fn profile(&self, region: &Region) -> Result<&RegionalWeightProfile, InvalidCatalogError> {
        self.profiles
            .get(region)
            .ok_or_else(|| InvalidCatalogError::MissingWeightProfile(region.clone()))
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.profiles.keys()
    }

    pub fn check_against(&self, catalog: &QuestionCatalog) -> Result<(), InvalidCatalogError> {
        self.profiles
            .values()
            .try_for_each(|profile| profile.check_against(catalog))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usa() -> Region {
        Region::new("USA").expect("valid region")
    }

    #[test]
    fn rejects_weight_above_one() {
        let weights = BTreeMap::from([(CategoryId(1), 1.2)]);
        let err = RegionalWeightProfile::new(usa(), weights).expect_err("out of range");
        assert!(matches!(
            err,
            InvalidCatalogError::WeightOutOfRange { weight, .. } if weight == 1.2
        ));
    }

    #[test]
    fn unweighted_category_counts_as_zero() {
        let weights = BTreeMap::from([(CategoryId(1), 0.4)]);
        let profile = RegionalWeightProfile::new(usa(), weights).expect("valid profile");
        assert_eq!(profile.weight(CategoryId(1)), 0.4);
        assert_eq!(profile.weight(CategoryId(7)), 0.0);
    }

    #[test]
    fn missing_region_is_a_catalog_error() {
        let profiles = WeightProfiles::new(Vec::new()).expect("empty set is valid");
        let err = profiles.profile(&usa()).expect_err("no profile");
        assert_eq!(err, InvalidCatalogError::MissingWeightProfile(usa()));
    }

    #[test]
    fn duplicate_region_is_rejected() {
        let first = RegionalWeightProfile::new(usa(), BTreeMap::new()).expect("valid");
        let second = first.clone();
        let err = WeightProfiles::new([first, second]).expect_err("duplicate");
        assert_eq!(err, InvalidCatalogError::DuplicateWeightProfile(usa()));
    }
}
