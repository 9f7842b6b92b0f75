use super::normalizer::{category_column_id, has_any_token, normalize_header, parse_number};
use super::CatalogLoadError;
use crate::assessment::catalog::{CategoryId, Institution, Region};
use csv::StringRecord;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    #[serde(rename = "Category ID", alias = "ID", alias = "Question ID")]
    pub(crate) category_id: u16,
    #[serde(rename = "Category", alias = "Question")]
    pub(crate) category: String,
    #[serde(rename = "Option", alias = "Answer")]
    pub(crate) option: String,
    #[serde(rename = "Points", alias = "Score")]
    pub(crate) points: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeightRow {
    #[serde(rename = "Region", alias = "Country")]
    pub(crate) region: String,
    #[serde(rename = "Category ID", alias = "ID", alias = "Question ID")]
    pub(crate) category_id: u16,
    #[serde(rename = "Weight")]
    pub(crate) weight: f64,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}

pub(crate) fn parse_rows<R, T>(source: R) -> Result<Vec<T>, CatalogLoadError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = reader(source);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<T>() {
        rows.push(row?);
    }
    Ok(rows)
}

#[derive(Debug, PartialEq)]
pub(crate) struct BenchmarkColumns {
    institution: usize,
    region: usize,
    benchmark: usize,
    categories: Vec<(usize, CategoryId)>,
}

const INSTITUTION_KEYWORDS: &[&str] = &["university", "institution", "college", "school"];
const REGION_KEYWORDS: &[&str] = &["country", "region"];

pub(crate) fn discover_columns(headers: &StringRecord) -> Result<BenchmarkColumns, CatalogLoadError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

    let categories: Vec<(usize, CategoryId)> = normalized
        .iter()
        .enumerate()
        .filter_map(|(index, header)| {
            category_column_id(header).map(|id| (index, CategoryId(id)))
        })
        .collect();
    let is_category = |index: usize| categories.iter().any(|(column, _)| *column == index);

    let find = |keywords: &[&str]| {
        normalized
            .iter()
            .enumerate()
            .find(|(index, header)| !is_category(*index) && has_any_token(header, keywords))
            .map(|(index, _)| index)
    };

    let institution = find(INSTITUTION_KEYWORDS).ok_or(CatalogLoadError::MissingColumn {
        column: "university",
    })?;
    let region = find(REGION_KEYWORDS).ok_or(CatalogLoadError::MissingColumn { column: "country" })?;

    let benchmark_candidates: Vec<usize> = normalized
        .iter()
        .enumerate()
        .filter(|(index, header)| !is_category(*index) && has_any_token(header, &["benchmark"]))
        .map(|(index, _)| index)
        .collect();
    let benchmark = benchmark_candidates
        .iter()
        .copied()
        .find(|&index| has_any_token(&normalized[index], &["total"]))
        .or_else(|| benchmark_candidates.first().copied())
        .or_else(|| {
            find(&["score"][..]).filter(|&index| index != institution && index != region)
        })
        .ok_or(CatalogLoadError::MissingColumn {
            column: "benchmark",
        })?;

    Ok(BenchmarkColumns {
        institution,
        region,
        benchmark,
        categories,
    })
}

pub(crate) fn parse_institutions<R: Read>(source: R) -> Result<Vec<Institution>, CatalogLoadError> {
    let mut csv_reader = reader(source);
    let headers = csv_reader.headers()?.clone();
    let columns = discover_columns(&headers)?;
    let header_name = |index: usize| headers.get(index).unwrap_or_default().to_string();

    let mut institutions = Vec::new();
    for (offset, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = offset + 2;
        let cell = |index: usize| record.get(index).unwrap_or_default().trim();

        let name = cell(columns.institution);
        let region_cell = cell(columns.region);
        if name.is_empty() && region_cell.is_empty() {
            continue;
        }
        if name.is_empty() {
            return Err(CatalogLoadError::InvalidValue {
                row,
                column: header_name(columns.institution),
                value: String::new(),
            });
        }

        let region = Region::new(region_cell).map_err(|_| CatalogLoadError::InvalidValue {
            row,
            column: header_name(columns.region),
            value: region_cell.to_string(),
        })?;

        let mut institution = match parse_number(cell(columns.benchmark)) {
            Some(benchmark) => Institution::new(name, region, benchmark),
            None => Institution::without_benchmark(name, region),
        };

        for &(index, category) in &columns.categories {
            let raw = cell(index);
            if raw.is_empty() {
                continue;
            }
            let value = parse_number(raw).ok_or_else(|| CatalogLoadError::InvalidValue {
                row,
                column: header_name(index),
                value: raw.to_string(),
            })?;
            institution = institution.with_category_benchmark(category, value);
        }

        institutions.push(institution);
    }

    Ok(institutions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_columns_from_loose_headers() {
        let headers = StringRecord::from(vec![
            "Rank",
            "Name of University",
            "Q1",
            "Country",
            "Benchmark (Academics)",
            "Total Benchmark Score",
        ]);

        let columns = discover_columns(&headers).expect("columns found");

        assert_eq!(columns.institution, 1);
        assert_eq!(columns.region, 3);
        assert_eq!(columns.benchmark, 5);
        assert_eq!(columns.categories, vec![(2, CategoryId(1))]);
    }

    #[test]
    fn missing_region_column_is_reported() {
        let headers = StringRecord::from(vec!["University", "Total Benchmark Score"]);
        let err = discover_columns(&headers).expect_err("no region column");
        assert!(matches!(
            err,
            CatalogLoadError::MissingColumn { column: "country" }
        ));
    }
}
