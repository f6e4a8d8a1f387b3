//! Event payloads and dot-path defaulting.
//!
//! Payloads use the collector's wire field names (`eventLabel`,
//! `eventCategory`, `sessionId`, ...) so that existing collection
//! endpoints keep working unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key/value map carried by an event.
///
/// Keys may be dot-delimited paths ("page.loadTime"); see [`set_default`].
pub type EventValue = serde_json::Map<String, Value>;

/// One tracked event, as sent to the analytics endpoint.
///
/// # Invariant
/// By the time a payload reaches the transport, `product` and `timestamp`
/// are always populated; `session_id` is populated whenever a session
/// could be resolved (and is otherwise serialized as absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// A name for the event that occurred ("onload", "pageview", ...).
    pub event_label: String,

    /// The kind of event that occurred ("page load", "nav", ...).
    pub event_category: String,

    /// Key/value pairs capturing current page state.
    #[serde(default)]
    pub event_value: EventValue,

    /// Sensitivity marker (PHI, FOUO, ...). Classified payloads are kept
    /// out of the shared data layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    /// Product to log data for (defaults to the configured product).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// The visitor's session id (defaults to the cookie-derived session).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Event time in epoch milliseconds (defaults to "now").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl EventPayload {
    /// Bare payload with label, category and values; the remaining
    /// fields are filled in by `push`.
    pub fn new(
        label: impl Into<String>,
        category: impl Into<String>,
        values: EventValue,
    ) -> Self {
        Self {
            event_label: label.into(),
            event_category: category.into(),
            event_value: values,
            classification: None,
            product: None,
            session_id: None,
            timestamp: None,
        }
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }
}

/// Set `dotted_key` to `default` unless the path already resolves.
///
/// 読みも書きも dot-path を辿る:
/// - 読み: "page.host" はネストされたオブジェクトを段階的に辿り、
///   定義済み（null 以外）の値が見つかればそれをそのまま返す。
/// - 書き: 中間オブジェクトを作りながら末端のキーに `default` を置く。
///
/// 読みと書きは対称（pageview の `eventValue.page` がネストした
/// オブジェクトになるのはこの挙動が前提）。途中にオブジェクト以外の
/// 値があった場合、書き込み時にはオブジェクトで置き換える。
pub fn set_default(map: &mut EventValue, dotted_key: &str, default: Value) -> Value {
    if dotted_key.is_empty() {
        return Value::Null;
    }

    // 読み: パス全体が解決できればその値を返す
    if let Some(existing) = resolve_path(map, dotted_key) {
        return existing;
    }

    // 書き: 中間オブジェクトを作りつつ末端に default を置く
    match dotted_key.rsplit_once('.') {
        None => {
            map.insert(dotted_key.to_string(), default.clone());
            default
        }
        Some((parents, leaf)) => {
            let mut current = map;
            for segment in parents.split('.') {
                let entry = current
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(EventValue::new()));
                if !entry.is_object() {
                    *entry = Value::Object(EventValue::new());
                }
                let Value::Object(next) = entry else {
                    unreachable!("entry was just made an object");
                };
                current = next;
            }
            current.insert(leaf.to_string(), default.clone());
            default
        }
    }
}

/// Walk a dot-path through nested objects; `None` when any step is
/// missing or the final value is null.
fn resolve_path(map: &EventValue, dotted_key: &str) -> Option<Value> {
    let mut segments = dotted_key.split('.');
    let first = segments.next()?;
    let mut current = map.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current.clone())
    }
}
