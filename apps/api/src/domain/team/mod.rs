// Team domain module
// Contains the team entity, its member view and its typed query path

#![allow(clippy::module_inception)]

pub mod path;
pub mod team;

// Re-export main types for convenience
pub use path::{TeamPath, TEAM};
pub use team::{Team, TeamMembers};
