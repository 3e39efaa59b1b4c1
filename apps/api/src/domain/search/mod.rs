// Search value objects
// The filter accepted by member searches and the rows they project into

pub mod condition;
pub mod projection;

pub use condition::MemberSearchCondition;
pub use projection::{MemberTeam, TeamAgeAverage};
