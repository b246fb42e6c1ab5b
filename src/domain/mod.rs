//! Provider-agnostic domain types: the position record and the response
//! mappings that produce it.

mod mapping;
mod position;

pub use mapping::{Coercion, FieldRule, Preset, RecordField, ResponseMapping};
pub use position::PositionRecord;
