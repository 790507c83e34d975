use crate::common::tags::FieldTags;
use chrono::{Datelike, NaiveDate};

/// Two-digit years go first: chrono's `%Y` also accepts `17` and would read
/// it as year 17.
const DATE_FORMATS: [&str; 5] = ["%d/%m/%y", "%d-%m-%y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Conversion from the text after a header tag into a typed value.
pub trait TagValue: Sized {
    fn from_tag_value(raw: &str) -> Option<Self>;
}

impl TagValue for String {
    fn from_tag_value(raw: &str) -> Option<Self> {
        Some(raw.trim().to_string())
    }
}

impl TagValue for f64 {
    fn from_tag_value(raw: &str) -> Option<Self> {
        parse_float(raw)
    }
}

impl TagValue for i64 {
    fn from_tag_value(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(value);
        }

        // Older files wrote counters as floats ("360.0").
        let value = parse_float(trimmed)?;
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(value as i64)
        } else {
            None
        }
    }
}

impl TagValue for NaiveDate {
    fn from_tag_value(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        DATE_FORMATS
            .iter()
            .filter_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .find(|date| date.year() >= 100)
    }
}

/// Index of the first line whose key carries any of `tags`.
///
/// Lines are scanned in order and the first hit wins regardless of which
/// spelling matched. The key is the text before the first tab.
pub fn find_tagged_line(lines: &[&str], tags: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let key = line_key(line);
        tags.iter().any(|tag| key.contains(tag))
    })
}

/// Typed value of the first line tagged with any of `tags`, or `None` when
/// no line carries a tag or the value does not convert.
pub fn find<T: TagValue>(lines: &[&str], tags: &[&str]) -> Option<T> {
    let index = find_tagged_line(lines, tags)?;
    let raw = lines[index].split('\t').nth(1)?;
    T::from_tag_value(raw)
}

/// [`find`] over a field's accepted spellings, logging conversion failures.
pub fn find_field<T: TagValue>(lines: &[&str], field: &FieldTags) -> Option<T> {
    let index = find_tagged_line(lines, field.tags)?;
    let Some(raw) = lines[index].split('\t').nth(1) else {
        tracing::debug!("field '{}' has no value on line {}", field.field, index + 1);
        return None;
    };

    let value = T::from_tag_value(raw);
    if value.is_none() {
        tracing::debug!(
            "field '{}' value '{}' on line {} could not be converted",
            field.field,
            raw.trim(),
            index + 1
        );
    }
    value
}

/// String fields are `None` when the tag is present but blank.
pub fn find_text(lines: &[&str], field: &FieldTags) -> Option<String> {
    find_field::<String>(lines, field).filter(|value| !value.is_empty())
}

fn line_key(line: &str) -> &str {
    line.split('\t').next().unwrap_or(line)
}

fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
}
