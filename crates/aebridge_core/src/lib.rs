//! Safe, owned views over opaque Apple Event style descriptors.

/// Descriptor ownership, classification, coercion, and extraction.
pub mod desc;
