//! Dot-path traversal over loosely-typed documents.
//!
//! Traversal follows document-database conventions: when a path segment meets
//! an array, the remaining path is applied to every element, so `tags` on
//! `[{"tags": "a"}, {"tags": "b"}]` yields both values.

use serde_json::Value;

use crate::types::{Document, FieldPath};

/// All non-null values reachable through `path`.
pub fn field_values<'a>(doc: &'a Document, path: &FieldPath) -> Vec<&'a Value> {
    let mut out = Vec::new();
    if let Some((head, rest)) = path.segments().split_first() {
        if let Some(value) = doc.get(head) {
            collect(value, rest, &mut out);
        }
    }
    out
}

fn collect<'a>(value: &'a Value, segments: &[String], out: &mut Vec<&'a Value>) {
    match segments.split_first() {
        None => {
            if !value.is_null() {
                out.push(value);
            }
        }
        Some((head, rest)) => match value {
            Value::Object(map) => {
                if let Some(next) = map.get(head) {
                    collect(next, rest, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect(item, segments, out);
                }
            }
            _ => {}
        },
    }
}

/// String form of a single value. Arrays are joined with single spaces.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            Some(items.iter().filter_map(value_text).collect::<Vec<_>>().join(" "))
        }
        Value::Object(_) => Some(value.to_string()),
    }
}

/// The text of a field as a single string, or `None` when the field is absent or null.
pub fn field_text(doc: &Document, path: &FieldPath) -> Option<String> {
    let values = field_values(doc, path);
    if values.is_empty() {
        return None;
    }
    Some(values.into_iter().filter_map(value_text).collect::<Vec<_>>().join(" "))
}

/// Remove the field at `path`, descending into arrays of objects.
pub fn remove_path(doc: &mut Document, path: &FieldPath) {
    remove_in_map(doc, path.segments());
}

fn remove_in_map(map: &mut Document, segments: &[String]) {
    match segments {
        [] => {}
        [last] => {
            map.remove(last);
        }
        [head, rest @ ..] => {
            if let Some(next) = map.get_mut(head) {
                remove_in_value(next, rest);
            }
        }
    }
}

fn remove_in_value(value: &mut Value, segments: &[String]) {
    match value {
        Value::Object(map) => remove_in_map(map, segments),
        Value::Array(items) => {
            for item in items {
                remove_in_value(item, segments);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test documents are objects"),
        }
    }

    #[test]
    fn nested_scalar_is_stringified() {
        let d = doc(json!({"salary": {"min": 4500, "currency": "EUR"}}));
        let min = Category::Jobs.field("salary.min").unwrap();
        assert_eq!(field_text(&d, &min).as_deref(), Some("4500"));
    }

    #[test]
    fn arrays_are_joined_with_spaces() {
        let d = doc(json!({"skills": ["Rust", "Go", null, true]}));
        let skills = Category::Jobs.field("skills").unwrap();
        assert_eq!(field_text(&d, &skills).as_deref(), Some("Rust Go true"));
    }

    #[test]
    fn paths_fan_out_over_arrays_of_objects() {
        let d = doc(json!({"provider": [{"name": "Acme"}, {"name": "Globex"}, {"email": "x"}]}));
        let name = Category::BusinessServices.field("provider.name").unwrap();
        assert_eq!(field_text(&d, &name).as_deref(), Some("Acme Globex"));
    }

    #[test]
    fn null_and_missing_fields_are_absent() {
        let d = doc(json!({"title": null}));
        let title = Category::Jobs.field("title").unwrap();
        let location = Category::Jobs.field("location").unwrap();
        assert_eq!(field_text(&d, &title), None);
        assert_eq!(field_text(&d, &location), None);
    }

    #[test]
    fn remove_path_handles_nested_and_array_fields() {
        let mut d = doc(json!({
            "password": "secret",
            "provider": [{"name": "Acme", "email": "a@acme.test"}],
            "address": {"city": "Oslo", "country": "NO"}
        }));
        remove_path(&mut d, &Category::Users.field("password").unwrap());
        remove_path(&mut d, &Category::BusinessServices.field("provider.email").unwrap());
        remove_path(&mut d, &Category::Users.field("address.city").unwrap());
        assert_eq!(
            Value::Object(d),
            json!({"provider": [{"name": "Acme"}], "address": {"country": "NO"}})
        );
    }
}
