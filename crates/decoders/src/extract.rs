//! Typed value extraction from decoded properties.
//!
//! Every function here is total: a missing property, a property of the wrong
//! kind, or an empty payload all resolve to a caller-visible default.

use penugasan_common::types::{DateValue, FormulaResult, NO_DATA, PropertyValue};

/// Join the plain text of a rich-text or title property with single spaces.
///
/// Returns `default` when the property is absent, of another kind, or holds no
/// fragments. Fragments without `plain_text` are skipped.
pub fn extract_text(property: Option<&PropertyValue>, default: &str) -> String {
    let fragments = match property {
        Some(PropertyValue::RichText { rich_text }) => rich_text,
        Some(PropertyValue::Title { title }) => title,
        _ => return default.to_string(),
    };

    if fragments.is_empty() {
        return default.to_string();
    }

    fragments
        .iter()
        .filter_map(|f| f.plain_text.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw `start` string of a date property, if any.
pub fn date_start(property: Option<&PropertyValue>) -> Option<&str> {
    match property {
        Some(PropertyValue::Date {
            date: Some(DateValue {
                start: Some(start), ..
            }),
        }) => Some(start.as_str()),
        _ => None,
    }
}

/// Start timestamp of a date property, unparsed, or the no-data sentinel.
pub fn extract_date(property: Option<&PropertyValue>) -> String {
    date_start(property).unwrap_or(NO_DATA).to_string()
}

/// Number property rendered as written in the source JSON (`42`, `1.5`).
pub fn extract_number(property: Option<&PropertyValue>, default: &str) -> String {
    match property {
        Some(PropertyValue::Number {
            number: Some(number),
        }) => number.to_string(),
        _ => default.to_string(),
    }
}

/// Formula result coerced to a string according to its declared type.
pub fn extract_formula(property: Option<&PropertyValue>) -> String {
    let Some(PropertyValue::Formula {
        formula: Some(result),
    }) = property
    else {
        return NO_DATA.to_string();
    };

    match result {
        FormulaResult::String {
            string: Some(value),
        } => value.clone(),
        FormulaResult::Number {
            number: Some(value),
        } => value.to_string(),
        FormulaResult::Boolean {
            boolean: Some(value),
        } => String::from(if *value { "True" } else { "False" }),
        FormulaResult::Date {
            date: Some(DateValue {
                start: Some(start), ..
            }),
        } => start.clone(),
        _ => NO_DATA.to_string(),
    }
}
