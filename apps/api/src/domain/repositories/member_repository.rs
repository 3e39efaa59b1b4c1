use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::member::Member;
use crate::domain::search::{MemberSearchCondition, MemberTeam};
use crate::query::{Page, PageRequest};

/// Repository trait for the Member entity
///
/// Lookups come in two flavours: plain SQL and the type-safe query builder.
/// Both must return the same rows.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a member (insert or update)
    async fn save(&self, member: &Member) -> Result<(), String>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, String>;

    /// Find every member
    async fn find_all(&self) -> Result<Vec<Member>, String>;

    /// Find every member, built with the query builder
    async fn find_all_query_builder(&self) -> Result<Vec<Member>, String>;

    /// Find members whose username equals `username`
    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, String>;

    /// Find members whose username equals `username`, built with the query builder
    async fn find_by_username_query_builder(&self, username: &str)
        -> Result<Vec<Member>, String>;

    /// Search members with their team, accumulating filters in a condition builder
    async fn search_by_builder(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeam>, String>;

    /// Search members with their team, passing each optional filter to the query
    async fn search(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeam>, String>;

    /// One page of [`search`](MemberRepository::search) plus the total match count
    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> Result<Page<MemberTeam>, String>;
}
