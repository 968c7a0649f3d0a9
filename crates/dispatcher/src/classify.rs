//! Structural classification of host errors
//!
//! Hosts rarely hold an `IncomingError` at the point of failure. These
//! helpers turn whatever they do hold into one, and every input maps to
//! exactly one of the two kinds.

use std::any::TypeId;
use std::error::Error;

use contracts::{ClientError, IncomingError, TransportError};
use serde_json::Value;

/// Classify a typed error, using its type name for client errors
pub fn classify<E: Error + 'static>(error: &E) -> IncomingError {
    let shaped = TypeId::of::<E>() == TypeId::of::<ClientError>()
        || TypeId::of::<E>() == TypeId::of::<IncomingError>();

    match classify_error(error) {
        IncomingError::Client(client) if !shaped => {
            let name = short_type_name(std::any::type_name::<E>());
            IncomingError::Client(client.with_name(name))
        }
        other => other,
    }
}

/// Classify any error by walking its source chain
///
/// A link that is an `IncomingError`, a `TransportError` or a `reqwest::Error`
/// carrying an HTTP status makes the whole error a transport error.
/// Everything else is a client error whose causes are the chain messages.
pub fn classify_error(error: &(dyn Error + 'static)) -> IncomingError {
    if let Some(client) = error.downcast_ref::<ClientError>() {
        return client.clone().into();
    }
    if let Some(incoming @ IncomingError::Client(_)) = error.downcast_ref::<IncomingError>() {
        return incoming.clone();
    }

    let mut current: Option<&(dyn Error + 'static)> = Some(error);
    while let Some(link) = current {
        if let Some(transport) = transport_shape(link) {
            return transport;
        }
        current = link.source();
    }

    let mut client = ClientError::new(error.to_string());
    let mut source = error.source();
    while let Some(cause) = source {
        client = client.with_cause(cause.to_string());
        source = cause.source();
    }
    IncomingError::Client(client)
}

fn transport_shape(link: &(dyn Error + 'static)) -> Option<IncomingError> {
    if let Some(incoming) = link.downcast_ref::<IncomingError>() {
        return match incoming {
            IncomingError::Transport(_) => Some(incoming.clone()),
            IncomingError::Client(_) => None,
        };
    }

    if let Some(transport) = link.downcast_ref::<TransportError>() {
        return Some(transport.clone().into());
    }

    let http = link.downcast_ref::<reqwest::Error>()?;
    let status = http.status()?;
    let transport = TransportError::new(
        status.as_u16(),
        status.canonical_reason().map(str::to_string),
        http.url().map(|u| u.to_string()),
    );
    Some(transport.into())
}

/// Classify a JSON value reported by the host
///
/// An object with an integer `status` (or `statusCode`) in the u16 range is a
/// transport error; every other value is a client error.
pub fn classify_value(value: &Value) -> IncomingError {
    if let Some(status) = status_field(value) {
        let transport = TransportError::new(
            status,
            str_field(value, &["statusText", "status_text"]),
            str_field(value, &["url"]),
        );
        let transport = match str_field(value, &["message"]) {
            Some(message) => transport.with_message(message),
            None => transport,
        };
        return IncomingError::Transport(transport);
    }

    IncomingError::Client(client_from_value(value))
}

fn status_field(value: &Value) -> Option<u16> {
    let object = value.as_object()?;
    ["status", "statusCode"]
        .iter()
        .find_map(|k| object.get(*k).and_then(Value::as_u64))
        .and_then(|s| u16::try_from(s).ok())
}

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn client_from_value(value: &Value) -> ClientError {
    match value {
        Value::Object(object) => {
            let message = match object.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => value.to_string(),
            };

            let mut client = ClientError::new(message);
            if let Some(name) = object.get("name").and_then(Value::as_str) {
                client = client.with_name(name);
            }
            if let Some(stack) = object.get("stack").and_then(Value::as_str) {
                client = client.with_stack(stack);
            }

            let mut cause = object.get("cause");
            while let Some(c) = cause {
                let text = match c {
                    Value::String(s) => s.clone(),
                    Value::Object(o) => o
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| c.to_string()),
                    other => other.to_string(),
                };
                client = client.with_cause(text);
                cause = c.get("cause");
            }
            client
        }
        Value::String(s) => ClientError::new(s.clone()),
        other => ClientError::new(other.to_string()),
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
