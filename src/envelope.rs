//! The `{json, meta}` envelope and both directions of the codec.
//!
//! Reconstruction ([`Envelope::restore`]) replays every `meta.values`
//! annotation against the raw `json` tree. Emission ([`Envelope::emit`])
//! walks a typed tree depth-first, replaces dates and big integers with their
//! canonical strings and records where it did so.
//!
//! An annotation whose path does not resolve is skipped without error. This
//! is a deliberate leniency: malformed paths are never reported.

use crate::path;
use crate::transform::{Registry, TypeTag};
use crate::value::date_to_iso;
use crate::{Config, Error, Map, Result, Value};
use chrono::{Datelike, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

/// The only envelope format version understood.
pub const FORMAT_VERSION: u32 = 1;

/// Side-channel type annotations for an envelope's `json` tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Meta {
    /// Path to tag chain, in payload order
    pub values: IndexMap<String, Vec<TypeTag>>,
    /// Format version (`v` on the wire)
    pub version: u32,
}

impl Default for Meta {
    fn default() -> Self {
        Meta {
            values: IndexMap::new(),
            version: FORMAT_VERSION,
        }
    }
}

impl Meta {
    fn from_map(map: &Map) -> Result<Self> {
        let version = match map.get("v") {
            None => FORMAT_VERSION,
            Some(v) => match v.as_i64() {
                Some(n) if n == i64::from(FORMAT_VERSION) => FORMAT_VERSION,
                _ => {
                    return Err(Error::invalid_meta(format!(
                        "Unsupported format version {}, expected {}",
                        v, FORMAT_VERSION
                    )))
                }
            },
        };

        let values = match map.get("values") {
            None | Some(Value::Null) => IndexMap::new(),
            Some(Value::Object(entries)) => {
                let mut values = IndexMap::with_capacity(entries.len());
                for (path, tags) in entries {
                    values.insert(path.clone(), parse_tags(path, tags)?);
                }
                values
            }
            Some(other) => {
                return Err(Error::invalid_meta(format!(
                    "\"values\" must be an object, found {}",
                    other.kind()
                )))
            }
        };

        Ok(Meta { values, version })
    }
}

fn parse_tags(path: &str, tags: &Value) -> Result<Vec<TypeTag>> {
    let items = tags.as_array().ok_or_else(|| {
        Error::invalid_meta(format!(
            "Tags for path {:?} must be an array, found {}",
            path,
            tags.kind()
        ))
    })?;

    items
        .iter()
        .map(|tag| {
            tag.as_str().map(TypeTag::parse).ok_or_else(|| {
                Error::invalid_meta(format!(
                    "Tag for path {:?} must be a string, found {}",
                    path,
                    tag.kind()
                ))
            })
        })
        .collect()
}

/// A decoded envelope.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::{value, Config, Envelope};
///
/// let payload = value!({
///     "json": { "created": "2024-01-01T00:00:00.000Z" },
///     "meta": { "values": { "created": ["Date"] }, "v": 1 }
/// });
///
/// let envelope = Envelope::from_value(payload).unwrap();
/// let restored = envelope.restore(&Config::new()).unwrap();
/// assert!(restored.get("created").unwrap().is_date());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub json: Value,
    pub meta: Option<Meta>,
}

impl Envelope {
    /// Validates a decoded payload and splits it into tree and annotations.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidJson`] if the payload is not an object
    /// - [`Error::InvalidMeta`] if `json` is missing or `meta` is malformed
    pub fn from_value(payload: Value) -> Result<Self> {
        let mut payload = match payload {
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_json(format!(
                    "Payload must be an object, found {}",
                    other.kind()
                )))
            }
        };

        let json = payload
            .remove("json")
            .ok_or_else(|| Error::invalid_meta("Missing \"json\" key in payload"))?;

        let meta = match payload.get("meta") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(Meta::from_map(map)?),
            Some(other) => {
                return Err(Error::invalid_meta(format!(
                    "\"meta\" must be an object, found {}",
                    other.kind()
                )))
            }
        };

        Ok(Envelope { json, meta })
    }

    /// Applies every annotation to the tree and returns it.
    ///
    /// # Errors
    ///
    /// Fails on the first annotation whose transform fails. Unresolved paths
    /// are not errors.
    pub fn restore(self, config: &Config) -> Result<Value> {
        let Envelope { mut json, meta } = self;
        let meta = match meta {
            Some(meta) => meta,
            None => return Ok(json),
        };

        let registry = Registry::new(config);
        for (path, tags) in &meta.values {
            restore_path(&mut json, path, tags, &registry, config)?;
        }
        Ok(json)
    }

    /// Builds an envelope from a typed tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] when a big integer cannot be
    /// rendered by the active handler, or when handler selection fails.
    /// Dates outside years 0000-9999 and annotated values stored under a
    /// top-level `""` key are rejected the same way, since neither could be
    /// read back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use serde_superjson::{value, Config, Envelope, TypeTag, Value};
    ///
    /// let mut tree = value!({ "name": "launch" });
    /// if let Value::Object(map) = &mut tree {
    ///     map.insert("at".into(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into());
    /// }
    ///
    /// let envelope = Envelope::emit(&tree, &Config::new()).unwrap();
    /// assert_eq!(envelope.json.get("at"), Some(&Value::from("2024-01-01T00:00:00.000Z")));
    /// assert_eq!(envelope.meta.unwrap().values["at"], vec![TypeTag::Date]);
    /// ```
    pub fn emit(value: &Value, config: &Config) -> Result<Self> {
        let mut emitter = Emitter {
            config,
            segments: Vec::new(),
            values: IndexMap::new(),
        };
        let json = emitter.walk(value)?;
        Ok(Envelope {
            json,
            meta: Some(Meta {
                values: emitter.values,
                version: FORMAT_VERSION,
            }),
        })
    }

    /// The envelope as a plain tree, in wire shape.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut payload = Map::with_capacity(2);
        payload.insert("json".to_string(), self.json);
        if let Some(meta) = self.meta {
            let mut wire = Map::with_capacity(2);
            if !meta.values.is_empty() {
                let values = meta
                    .values
                    .into_iter()
                    .map(|(path, tags)| {
                        let tags = tags
                            .iter()
                            .map(|tag| Value::from(tag.as_str()))
                            .collect::<Vec<_>>();
                        (path, Value::Array(tags))
                    })
                    .collect::<Map>();
                wire.insert("values".to_string(), Value::Object(values));
            }
            wire.insert("v".to_string(), Value::from(meta.version));
            payload.insert("meta".to_string(), Value::Object(wire));
        }
        Value::Object(payload)
    }
}

impl TryFrom<Value> for Envelope {
    type Error = Error;

    fn try_from(payload: Value) -> Result<Self> {
        Envelope::from_value(payload)
    }
}

impl Serialize for Meta {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.values.is_empty() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.values.is_empty() {
            map.serialize_entry("values", &Annotations(&self.values))?;
        }
        map.serialize_entry("v", &self.version)?;
        map.end()
    }
}

struct Annotations<'a>(&'a IndexMap<String, Vec<TypeTag>>);

impl Serialize for Annotations<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

impl Serialize for Envelope {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.meta.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("json", &self.json)?;
        if let Some(meta) = &self.meta {
            map.serialize_entry("meta", meta)?;
        }
        map.end()
    }
}

fn restore_path(
    root: &mut Value,
    path: &str,
    tags: &[TypeTag],
    registry: &Registry<'_>,
    config: &Config,
) -> Result<()> {
    let undefined = matches!(tags.last(), Some(TypeTag::Undefined));

    let mut slot = match path::resolve(root, path) {
        Some(slot) => slot,
        None => {
            debug!(path, "annotation path does not resolve, skipping");
            return Ok(());
        }
    };

    let current = match slot.value_mut() {
        Some(value) => std::mem::take(value),
        None => {
            if undefined && config.create_undefined_keys() {
                trace!(path, "creating undefined key");
                slot.set(Value::Null);
            } else if !undefined {
                debug!(path, "annotated key is absent, skipping");
            }
            return Ok(());
        }
    };

    trace!(path, tags = tags.len(), "applying annotation");
    let restored = registry.apply_all(tags, current)?;
    if undefined && !config.create_undefined_keys() {
        slot.remove();
    } else {
        slot.set(restored);
    }
    Ok(())
}

struct Emitter<'a> {
    config: &'a Config,
    segments: Vec<String>,
    values: IndexMap<String, Vec<TypeTag>>,
}

impl Emitter<'_> {
    fn walk(&mut self, node: &Value) -> Result<Value> {
        match node {
            Value::Date(date) => {
                let year = date.with_timezone(&Utc).year();
                if !(0..=9999).contains(&year) {
                    return Err(Error::unsupported_type(format!(
                        "Date year {} has no RFC 3339 form",
                        year
                    )));
                }
                self.record(TypeTag::Date)?;
                Ok(Value::String(date_to_iso(date)))
            }
            Value::BigInt(_) => {
                let digits = self.config.big_int_handler()?.stringify(node)?;
                self.record(TypeTag::BigInt)?;
                Ok(Value::String(digits))
            }
            Value::Null if self.config.null_to_undefined() => {
                self.record(TypeTag::Undefined)?;
                Ok(Value::Null)
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.segments.push(index.to_string());
                    out.push(self.walk(item)?);
                    self.segments.pop();
                }
                Ok(Value::Array(out))
            }
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    self.segments.push(key.clone());
                    out.insert(key.clone(), self.walk(item)?);
                    self.segments.pop();
                }
                Ok(Value::Object(out))
            }
            other => Ok(other.clone()),
        }
    }

    fn record(&mut self, tag: TypeTag) -> Result<()> {
        // A top-level "" key joins to the root path.
        if let [only] = self.segments.as_slice() {
            if only.is_empty() {
                return Err(Error::unsupported_type(format!(
                    "Cannot annotate {} under the empty top-level key",
                    tag
                )));
            }
        }
        self.values.insert(path::join(&self.segments), vec![tag]);
        Ok(())
    }
}

/// Turns keyed containers whose keys are exactly `"0"`..`"n-1"` into
/// sequences. Empty keyed containers stay objects.
pub(crate) fn normalize_sequences(value: Value) -> Value {
    match value {
        Value::Object(map) if is_sequence_like(&map) => Value::Array(
            map.into_iter()
                .map(|(_, item)| normalize_sequences(item))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, normalize_sequences(item)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_sequences).collect()),
        other => other,
    }
}

fn is_sequence_like(map: &Map) -> bool {
    !map.is_empty()
        && map
            .keys()
            .enumerate()
            .all(|(index, key)| path::parse_index(key) == Some(index))
}
