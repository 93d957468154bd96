//! SeaORM entities for the accounts service.
//!
//! Group and permission assignments are explicit join-table entities
//! (`user_groups`, `user_permissions`, `group_permissions`) with
//! composite primary keys; the composite keys are what give the
//! assignments set semantics.

pub mod group_permissions;
pub mod groups;
pub mod permissions;
pub mod user_groups;
pub mod user_permissions;
pub mod users;
