//! Typed CRUD repositories over the record store.
//!
//! # Responsibility
//! - Provide `list/add/update/delete` per entity, scoped by owning user.
//! - Assign ids and timestamps on creation.
//!
//! # Invariants
//! - `list(None)` returns every owner's records (admin view).
//! - `update`/`delete` on an unknown id are silent no-ops.
//! - Ids are unique within their collection and derived from the clock.

pub mod note_repo;
pub mod quick_note_repo;
pub mod task_repo;
