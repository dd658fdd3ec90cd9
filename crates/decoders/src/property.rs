use serde_json::Value;

use penugasan_common::types::{PropertyValue, Record};

/// Decode one property object into its typed form.
///
/// Never fails: anything serde cannot map onto a known kind becomes
/// `PropertyValue::Unsupported`, so extraction falls back to its default.
pub fn decode_property(value: Value) -> PropertyValue {
    match serde_json::from_value(value) {
        Ok(property) => property,
        Err(e) => {
            tracing::debug!(error = %e, "Undecodable property, treating as unsupported");
            PropertyValue::Unsupported
        }
    }
}

/// Decode a page object from a database query into a `Record`.
///
/// Returns `None` when the page has no string `id`, since such a page can
/// never be tracked in the sent-set.
pub fn decode_page(page: Value) -> Option<Record> {
    let Value::Object(mut page) = page else {
        tracing::warn!("Skipping query result that is not an object");
        return None;
    };

    let id = match page.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => {
            tracing::warn!("Skipping page without an id");
            return None;
        }
    };

    let properties = match page.remove("properties") {
        Some(Value::Object(map)) => map
            .into_iter()
            .map(|(name, value)| (name, decode_property(value)))
            .collect(),
        _ => Default::default(),
    };

    Some(Record { id, properties })
}
