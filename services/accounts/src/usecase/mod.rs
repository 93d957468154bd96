pub mod group;
pub mod membership;
pub mod permission;
pub mod user;
