use serde_json::Value;

/// The array held in `field`, if `value` has one.
pub fn array_field<'v>(value: &'v Value, field: &str) -> Option<&'v Vec<Value>> {
    value.get(field).and_then(Value::as_array)
}

pub fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|object| object.contains_key(key))
}

pub fn all_have_key(entries: &[Value], key: &str) -> bool {
    entries.iter().all(|entry| has_key(entry, key))
}

/// First entry of a `{"results": [...]}` listing whose `result_name` is
/// `name`. Other fields are not inspected, so an entry with an odd value type
/// is still found.
pub fn find_result_by_name<'v>(listing: &'v Value, name: &str) -> Option<&'v Value> {
    array_field(listing, "results")?
        .iter()
        .find(|entry| entry.get("result_name").and_then(Value::as_str) == Some(name))
}

pub fn str_field<'v>(entry: &'v Value, field: &str) -> Option<&'v str> {
    entry.get(field).and_then(Value::as_str)
}

pub fn u64_field(entry: &Value, field: &str) -> Option<u64> {
    entry.get(field).and_then(Value::as_u64)
}
