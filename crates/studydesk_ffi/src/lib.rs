//! Flutter-facing bindings for StudyDesk core.
//!
//! Only `api` is exported to Dart; it owns no business rules of its own.

pub mod api;
