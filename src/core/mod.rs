//! Project build description.

pub mod manifest;

pub use manifest::{FlagStep, Manifest, MANIFEST_NAME};
