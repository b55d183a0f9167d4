//! Event model for streamed apply output
//!
//! Records arrive as self-describing JSON objects tagged by `type`. Only the
//! `apply_complete` tag carries a payload we care about; every other tag is
//! kept as an opaque [`Event::Other`] so its payload is never inspected.

use serde::{Deserialize, Deserializer, Serialize};

/// Tag of the completion record that carries elapsed time
pub const APPLY_COMPLETE: &str = "apply_complete";

/// Explicit `null` decodes like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Resource descriptor attached to a hook payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Fully qualified resource address (e.g. `module.db.aws_instance.main`)
    #[serde(rename = "addr", deserialize_with = "null_as_default")]
    pub address: String,
    /// Logical provider name
    #[serde(deserialize_with = "null_as_default")]
    pub implied_provider: String,
    /// Type name within the provider
    #[serde(deserialize_with = "null_as_default")]
    pub resource_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_name: String,
}

/// Payload of an `apply_complete` record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyComplete {
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource: Resource,
    /// Seconds attributed to this completion
    #[serde(deserialize_with = "null_as_default")]
    pub elapsed_seconds: u64,
}

/// A decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Completion of a single resource operation
    ApplyComplete(ApplyComplete),
    /// Any other record; only the tag is retained
    Other { kind: String },
}

impl Event {
    /// The record's `type` tag
    pub fn kind(&self) -> &str {
        match self {
            Event::ApplyComplete(_) => APPLY_COMPLETE,
            Event::Other { kind } => kind,
        }
    }
}

/// Outer shape shared by every record.
///
/// The hook is held as an untyped value so that records with an
/// unrecognized tag decode regardless of what their payload looks like.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default)]
    hook: serde_json::Value,
}

impl Envelope {
    /// Resolve the envelope into a typed event, decoding the hook only for
    /// completion records.
    pub(crate) fn into_event(self) -> Result<Event, serde_json::Error> {
        if self.kind != APPLY_COMPLETE {
            return Ok(Event::Other { kind: self.kind });
        }

        let hook = if self.hook.is_null() {
            ApplyComplete::default()
        } else {
            serde_json::from_value(self.hook)?
        };
        Ok(Event::ApplyComplete(hook))
    }
}
