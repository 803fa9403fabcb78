//! Domain operations, one module per resource family.
//!
//! Each operation follows the same pattern: build a deterministic URL
//! from the configured prefix, perform exactly one HTTP call through the
//! verb helpers, map the response through [`crate::json`]. Operations
//! taking a target-shape parameter are generic over
//! [`FromJson`](crate::FromJson); pass [`JsonObject`](crate::JsonObject)
//! when no richer shape is needed.
//!
//! Each module also declares its `ERROR_MESSAGES` table, collected into
//! the registry by [`ErrorMessages::builtin`](crate::ErrorMessages::builtin).

pub mod courses;
pub mod gradebooks;
pub mod groups;
pub mod organizations;
pub mod users;
pub mod workgroups;
