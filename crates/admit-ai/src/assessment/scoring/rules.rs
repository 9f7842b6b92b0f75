use super::super::catalog::{InvalidCatalogError, QuestionCatalog};
use super::super::responses::{Choice, ResponseSet};
use super::super::weights::RegionalWeightProfile;
use super::ScoreComponent;

pub(crate) fn score_components(
    catalog: &QuestionCatalog,
    responses: &ResponseSet,
    profile: &RegionalWeightProfile,
) -> Result<Vec<ScoreComponent>, InvalidCatalogError> {
    profile.check_against(catalog)?;

    if let Some((&category, _)) = responses
        .iter()
        .find(|(category, _)| !catalog.contains(**category))
    {
        return Err(InvalidCatalogError::UnknownAnswerCategory(category));
    }

    catalog
        .categories()
        .iter()
        .map(|category| {
            let cap = category
                .cap()
                .ok_or(InvalidCatalogError::MissingCap(category.id))?;

            // Points always come from the catalog, never from the response set.
            let earned = match responses.choice(category.id) {
                None | Some(Choice::Unanswered) => 0.0,
                Some(Choice::Selected { option, .. }) => {
                    category
                        .option(option)
                        .ok_or_else(|| InvalidCatalogError::UnknownAnswerOption {
                            category: category.id,
                            option: option.clone(),
                        })?
                        .points
                }
            };

            Ok(ScoreComponent {
                category: category.id,
                label: category.label.clone(),
                earned,
                cap,
                weight: profile.weight(category.id),
            })
        })
        .collect()
}

/// `100 * Σ(earned * weight) / Σ(cap * weight)`, or `None` when the weighted cap is zero.
pub(crate) fn weighted_ratio(components: &[ScoreComponent]) -> Option<f64> {
    let (earned, cap) = components
        .iter()
        .fold((0.0_f64, 0.0_f64), |(earned, cap), component| {
            (
                earned + component.earned * component.weight,
                cap + component.cap * component.weight,
            )
        });

    if cap > 0.0 {
        Some(100.0 * earned / cap)
    } else {
        None
    }
}
