// Bracket-notation query serialization.
//
// The backend expects Rails/Laravel-style nested keys:
//   { filter: { name: "x" }, page: 2 }  ->  filter[name]=x&page=2
// Arrays repeat the key with an empty bracket: ids[]=1&ids[]=2.

use serde_json::Value;

/// Parameter map for list/query requests. Keys are serialized in map
/// order (alphabetical), which keeps request URLs deterministic.
pub type ParamMap = serde_json::Map<String, Value>;

/// Serialize a parameter map into a percent-encoded query string.
///
/// Nested objects become bracketed keys, arrays repeat `key[]`, and
/// `null` values are skipped. An empty map serializes to an empty
/// string (callers then send no query at all).
pub fn encode_query(params: &ParamMap) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        append_value(&mut serializer, key, value);
    }
    serializer.finish()
}

fn append_value(
    serializer: &mut url::form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: &Value,
) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (nested_key, nested) in map {
                append_value(serializer, &format!("{key}[{nested_key}]"), nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                append_value(serializer, &format!("{key}[]"), item);
            }
        }
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        Value::Bool(b) => {
            serializer.append_pair(key, if *b { "true" } else { "false" });
        }
        Value::Number(n) => {
            serializer.append_pair(key, &n.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> ParamMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn nested_filter_and_scalar() {
        let qs = encode_query(&params(json!({
            "filter": { "name": "a b" },
            "page": 2,
        })));
        assert_eq!(qs, "filter%5Bname%5D=a+b&page=2");
    }

    #[test]
    fn deeply_nested_keys() {
        let qs = encode_query(&params(json!({
            "filter": { "item": { "group": "cutting" } },
        })));
        assert_eq!(qs, "filter%5Bitem%5D%5Bgroup%5D=cutting");
    }

    #[test]
    fn arrays_repeat_the_key() {
        let qs = encode_query(&params(json!({ "ids": [1, 2, 3] })));
        assert_eq!(qs, "ids%5B%5D=1&ids%5B%5D=2&ids%5B%5D=3");
    }

    #[test]
    fn null_values_are_skipped() {
        let qs = encode_query(&params(json!({ "a": null, "b": true })));
        assert_eq!(qs, "b=true");
    }

    #[test]
    fn empty_map_serializes_to_nothing() {
        assert_eq!(encode_query(&ParamMap::new()), "");
    }

    #[test]
    fn special_characters_are_percent_encoded() {
        let qs = encode_query(&params(json!({ "filter": { "code": "A&B=C" } })));
        assert_eq!(qs, "filter%5Bcode%5D=A%26B%3DC");
    }
}
