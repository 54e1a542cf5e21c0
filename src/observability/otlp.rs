//! OTLP JSON encoding of finished spans.
//!
//! Spans are serialized into the OTLP trace format so the trace file can be
//! loaded directly by OTLP-aware viewers. One exported batch becomes one
//! complete OTLP document (one line in the file).

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::Value as JsonValue;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Scope name stamped into every exported document.
const SCOPE_NAME: &str = "clipstack";

/// Encodes a batch of spans as one OTLP JSON document.
pub fn encode_batch(resource: &Resource, batch: &[SpanData]) -> JsonValue {
    let resource_attrs: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| {
            serde_json::json!({
                "key": key.to_string(),
                "value": encode_value(value),
            })
        })
        .collect();

    let spans: Vec<JsonValue> = batch.iter().map(encode_span).collect();

    serde_json::json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attrs },
            "scopeSpans": [{
                "scope": { "name": SCOPE_NAME },
                "spans": spans,
            }]
        }]
    })
}

fn encode_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (status_code, status_message) = encode_status(&span.status);

    serde_json::json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": encode_kind(&span.span_kind),
        "startTimeUnixNano": nanos_since_epoch(span.start_time),
        "endTimeUnixNano": nanos_since_epoch(span.end_time),
        "attributes": encode_attributes(&span.attributes),
        "events": encode_events(&span.events),
        "status": {
            "code": status_code,
            "message": status_message,
        },
    })
}

fn nanos_since_epoch(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

const fn encode_kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn encode_attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| {
            serde_json::json!({
                "key": kv.key.to_string(),
                "value": encode_value(&kv.value),
            })
        })
        .collect()
}

fn encode_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => serde_json::json!({ "boolValue": b }),
        // OTLP carries 64-bit ints as strings
        Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
        Value::F64(f) => serde_json::json!({ "doubleValue": f }),
        Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
        Value::Array(_) => serde_json::json!({ "stringValue": format!("{value:?}") }),
    }
}

fn encode_events(events: &[opentelemetry::trace::Event]) -> Vec<JsonValue> {
    events
        .iter()
        .map(|event| {
            serde_json::json!({
                "timeUnixNano": nanos_since_epoch(event.timestamp),
                "name": event.name,
                "attributes": encode_attributes(&event.attributes),
            })
        })
        .collect()
}

fn encode_status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}
