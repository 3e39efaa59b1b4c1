// Domain layer module exports
// Entities, search value objects and repository contracts
// Domain is independent of infrastructure concerns

pub mod member;
pub mod repositories;
pub mod search;
pub mod team;
