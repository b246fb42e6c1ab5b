//! Response mappings from upstream JSON payloads to [`PositionRecord`].
//!
//! Each upstream API publishes the same telemetry under a different layout.
//! Rather than one decoder per API, a [`ResponseMapping`] lists where each
//! record field lives (a dotted JSON path) and how to coerce it. Built-in
//! mappings cover the supported [`Preset`]s; custom ones come from config.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PositionRecord;
use crate::error::{ConfigError, FetchError};

/// A field of [`PositionRecord`] that a rule can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Latitude,
    Longitude,
    Timestamp,
    Altitude,
    Velocity,
    Visibility,
}

impl RecordField {
    pub const ALL: [Self; 6] = [
        Self::Latitude,
        Self::Longitude,
        Self::Timestamp,
        Self::Altitude,
        Self::Velocity,
        Self::Visibility,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Timestamp => "timestamp",
            Self::Altitude => "altitude",
            Self::Velocity => "velocity",
            Self::Visibility => "visibility",
        }
    }

    /// Required fields must resolve for a record to exist at all.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Latitude | Self::Longitude | Self::Timestamp)
    }

    const fn accepts(self, coercion: Coercion) -> bool {
        match self {
            Self::Latitude | Self::Longitude | Self::Altitude | Self::Velocity => {
                matches!(coercion, Coercion::Float | Coercion::Integer)
            }
            Self::Timestamp => matches!(coercion, Coercion::Integer),
            Self::Visibility => matches!(coercion, Coercion::Text),
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a raw JSON value is turned into a record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// JSON number, or a string holding a decimal number.
    Float,
    /// JSON integer, an integral float, or a numeric string.
    Integer,
    /// JSON string; numbers are rendered to text.
    Text,
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Text => "text",
        })
    }
}

/// One row of a mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub target: RecordField,
    /// Dotted path into the response body, e.g. `iss_position.latitude`.
    /// Numeric segments index into arrays.
    pub path: String,
    pub coercion: Coercion,
}

impl FieldRule {
    #[must_use]
    pub fn new(target: RecordField, path: impl Into<String>, coercion: Coercion) -> Self {
        Self {
            target,
            path: path.into(),
            coercion,
        }
    }
}

/// Field-mapping table for one upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMapping {
    name: String,
    rules: Vec<FieldRule>,
}

impl ResponseMapping {
    /// Build a mapping, checking that it can produce complete records.
    ///
    /// # Errors
    ///
    /// Fails when a required field is not covered, a field is mapped twice,
    /// a path is empty, or a coercion does not fit the target's type.
    pub fn new(name: impl Into<String>, rules: Vec<FieldRule>) -> Result<Self, ConfigError> {
        for (i, rule) in rules.iter().enumerate() {
            if rule.path.split('.').any(str::is_empty) {
                return Err(ConfigError::InvalidValue {
                    field: "provider.fields",
                    reason: format!("empty path segment in '{}' for {}", rule.path, rule.target),
                });
            }
            if !rule.target.accepts(rule.coercion) {
                return Err(ConfigError::InvalidValue {
                    field: "provider.fields",
                    reason: format!("{} cannot be coerced as {}", rule.target, rule.coercion),
                });
            }
            if rules[..i].iter().any(|r| r.target == rule.target) {
                return Err(ConfigError::InvalidValue {
                    field: "provider.fields",
                    reason: format!("{} is mapped more than once", rule.target),
                });
            }
        }

        if let Some(missing) = RecordField::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .find(|f| !rules.iter().any(|r| r.target == *f))
        {
            return Err(ConfigError::InvalidValue {
                field: "provider.fields",
                reason: format!("required field {missing} is not mapped"),
            });
        }

        Ok(Self {
            name: name.into(),
            rules,
        })
    }

    /// Mapping for `api.open-notify.org/iss-now.json`.
    ///
    /// Coordinates arrive as strings nested under `iss_position`.
    #[must_use]
    pub fn open_notify() -> Self {
        Self {
            name: Preset::OpenNotify.to_string(),
            rules: vec![
                FieldRule::new(RecordField::Latitude, "iss_position.latitude", Coercion::Float),
                FieldRule::new(RecordField::Longitude, "iss_position.longitude", Coercion::Float),
                FieldRule::new(RecordField::Timestamp, "timestamp", Coercion::Integer),
            ],
        }
    }

    /// Mapping for `api.wheretheiss.at/v1/satellites/<id>`.
    #[must_use]
    pub fn where_the_iss() -> Self {
        Self {
            name: Preset::WhereTheIss.to_string(),
            rules: vec![
                FieldRule::new(RecordField::Latitude, "latitude", Coercion::Float),
                FieldRule::new(RecordField::Longitude, "longitude", Coercion::Float),
                FieldRule::new(RecordField::Timestamp, "timestamp", Coercion::Integer),
                FieldRule::new(RecordField::Altitude, "altitude", Coercion::Float),
                FieldRule::new(RecordField::Velocity, "velocity", Coercion::Float),
                FieldRule::new(RecordField::Visibility, "visibility", Coercion::Text),
            ],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Decode a response body into a complete record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] when a required field is missing or
    /// null, or any mapped field has a value that cannot be coerced.
    pub fn decode(&self, body: &Value) -> Result<PositionRecord, FetchError> {
        let mut draft = Draft::default();

        for rule in &self.rules {
            let raw = match lookup(body, &rule.path) {
                Some(Value::Null) | None if rule.target.is_required() => {
                    return Err(FetchError::Decode(format!(
                        "missing field {} (at '{}')",
                        rule.target, rule.path
                    )));
                }
                Some(Value::Null) | None => continue,
                Some(raw) => raw,
            };

            let value = coerce(raw, rule.coercion).ok_or_else(|| {
                FetchError::Decode(format!(
                    "field {} (at '{}') is not a valid {}: {raw}",
                    rule.target, rule.path, rule.coercion
                ))
            })?;
            draft.set(rule.target, value);
        }

        draft.finish()
    }
}

/// Built-in upstream providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    #[default]
    #[serde(rename = "open-notify")]
    OpenNotify,
    #[serde(rename = "wheretheiss")]
    WhereTheIss,
    /// User-supplied field table from config.
    #[serde(rename = "custom")]
    Custom,
}

impl Preset {
    pub const BUILT_IN: [Self; 2] = [Self::OpenNotify, Self::WhereTheIss];

    /// Default endpoint for the preset. Custom mappings have none.
    #[must_use]
    pub const fn default_url(self) -> Option<&'static str> {
        match self {
            Self::OpenNotify => Some("http://api.open-notify.org/iss-now.json"),
            Self::WhereTheIss => Some("https://api.wheretheiss.at/v1/satellites/25544"),
            Self::Custom => None,
        }
    }

    /// Built-in mapping for the preset. Custom mappings have none.
    #[must_use]
    pub fn mapping(self) -> Option<ResponseMapping> {
        match self {
            Self::OpenNotify => Some(ResponseMapping::open_notify()),
            Self::WhereTheIss => Some(ResponseMapping::where_the_iss()),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenNotify => "open-notify",
            Self::WhereTheIss => "wheretheiss",
            Self::Custom => "custom",
        })
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open-notify" | "opennotify" => Ok(Self::OpenNotify),
            "wheretheiss" | "where-the-iss" => Ok(Self::WhereTheIss),
            "custom" => Ok(Self::Custom),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

enum Coerced {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl Coerced {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            Self::Text(_) => None,
        }
    }
}

#[derive(Default)]
struct Draft {
    latitude: Option<f64>,
    longitude: Option<f64>,
    timestamp: Option<i64>,
    altitude: Option<f64>,
    velocity: Option<f64>,
    visibility: Option<String>,
}

impl Draft {
    fn set(&mut self, target: RecordField, value: Coerced) {
        match (target, value) {
            (RecordField::Timestamp, Coerced::Integer(v)) => self.timestamp = Some(v),
            (RecordField::Visibility, Coerced::Text(v)) => self.visibility = Some(v),
            (RecordField::Latitude, v) => self.latitude = v.as_f64(),
            (RecordField::Longitude, v) => self.longitude = v.as_f64(),
            (RecordField::Altitude, v) => self.altitude = v.as_f64(),
            (RecordField::Velocity, v) => self.velocity = v.as_f64(),
            // Ruled out when the mapping was built.
            (RecordField::Timestamp | RecordField::Visibility, _) => {}
        }
    }

    fn finish(self) -> Result<PositionRecord, FetchError> {
        let missing = |field: RecordField| FetchError::Decode(format!("missing field {field}"));

        Ok(PositionRecord {
            latitude: self.latitude.ok_or_else(|| missing(RecordField::Latitude))?,
            longitude: self.longitude.ok_or_else(|| missing(RecordField::Longitude))?,
            timestamp: self.timestamp.ok_or_else(|| missing(RecordField::Timestamp))?,
            altitude: self.altitude,
            velocity: self.velocity,
            visibility: self.visibility,
        })
    }
}

fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |node, segment| match node {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => node.get(segment),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn coerce(raw: &Value, coercion: Coercion) -> Option<Coerced> {
    match (coercion, raw) {
        (Coercion::Float, Value::Number(n)) => n.as_f64().map(Coerced::Float),
        (Coercion::Float, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Coerced::Float),
        (Coercion::Integer, Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| is_integral(*v)).map(|v| v as i64))
            .map(Coerced::Integer),
        (Coercion::Integer, Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| is_integral(*v))
                        .map(|v| v as i64)
                })
                .map(Coerced::Integer)
        }
        (Coercion::Text, Value::String(s)) => Some(Coerced::Text(s.clone())),
        (Coercion::Text, Value::Number(n)) => Some(Coerced::Text(n.to_string())),
        _ => None,
    }
}

fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15
}
