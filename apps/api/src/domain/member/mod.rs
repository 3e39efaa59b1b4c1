// Member domain module
// Contains the member entity and its typed query path

#![allow(clippy::module_inception)]

pub mod member;
pub mod path;

// Re-export main types for convenience
pub use member::Member;
pub use path::{MemberPath, MEMBER};
