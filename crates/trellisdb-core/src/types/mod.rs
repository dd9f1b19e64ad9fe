//! Core data types for `TrellisDB`.

mod value;

pub use value::AttributeValue;
