//! Core library for fcmat.
//!
//! This crate reads and writes FreeCAD material cards (`.FCMat`), a sectioned
//! `key = value` text format, and carries the fixed catalog of recognized
//! material property names grouped by category.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod card;
pub mod catalog;
pub mod error;

pub use card::{composite_key, export_card, import_card, split_key, MaterialRecord, KEY_DELIMITER};
pub use catalog::{property_groups, PropertyGroup};
pub use error::{Error, Result};
