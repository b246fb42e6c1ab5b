//! Upstream response bodies in each supported shape.

use serde_json::{json, Value};

/// An `iss-now.json` body with string coordinates.
pub fn open_notify(latitude: &str, longitude: &str, timestamp: i64) -> Value {
    json!({
        "message": "success",
        "iss_position": {"latitude": latitude, "longitude": longitude},
        "timestamp": timestamp,
    })
}

/// A `wheretheiss.at` satellite body with every telemetry field.
pub fn where_the_iss(latitude: f64, longitude: f64, timestamp: i64) -> Value {
    json!({
        "name": "iss",
        "id": 25544,
        "latitude": latitude,
        "longitude": longitude,
        "altitude": 420.1,
        "velocity": 27600.0,
        "visibility": "daylight",
        "footprint": 4500.0,
        "timestamp": timestamp,
        "units": "kilometers",
    })
}
