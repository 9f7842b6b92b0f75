/// Lowercase, punctuation to spaces, single-spaced. "Total Benchmark Score (%)" becomes
/// "total benchmark score".
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn has_any_token(normalized: &str, keywords: &[&str]) -> bool {
    normalized
        .split(' ')
        .any(|token| keywords.contains(&token))
}

/// Category id named by a per-category header: "Q3", "Cat 3", "Category 3 Benchmark".
pub(crate) fn category_column_id(normalized: &str) -> Option<u16> {
    let mut tokens = normalized.split(' ');
    let first = tokens.next()?;

    if let Some(digits) = first.strip_prefix('q') {
        if !digits.is_empty() {
            return digits.parse().ok();
        }
    }

    match first {
        "q" | "cat" | "category" => tokens.next()?.parse().ok(),
        _ => None,
    }
}

/// Numeric cell tolerant of decimal commas and a trailing percent sign.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_end_matches('%').trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}
