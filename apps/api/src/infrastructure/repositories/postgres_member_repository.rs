use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::member::{Member, MEMBER};
use crate::domain::repositories::MemberRepository;
use crate::domain::search::{MemberSearchCondition, MemberTeam};
use crate::domain::team::TEAM;
use crate::query::{ConditionBuilder, Page, PageRequest, Predicate, SelectQuery, Selectable};

/// PostgreSQL implementation of MemberRepository
///
/// Plain lookups use hand-written SQL through `sqlx::query_as`; the
/// `*_query_builder` and search methods go through [`SelectQuery`].
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO member (member_id, username, age, team_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (member_id) DO UPDATE SET
                username = EXCLUDED.username,
                age = EXCLUDED.age,
                team_id = EXCLUDED.team_id
            "#,
        )
        .bind(member.id())
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save member: {}", e))?;

        tracing::debug!(member_id = %member.id(), "member saved");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, String> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, age, team_id
            FROM member
            WHERE member_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find member by id: {}", e))
    }

    async fn find_all(&self) -> Result<Vec<Member>, String> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, age, team_id
            FROM member
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find members: {}", e))
    }

    async fn find_all_query_builder(&self) -> Result<Vec<Member>, String> {
        SelectQuery::select_from(&MEMBER)
            .fetch(&self.pool)
            .await
            .map_err(|e| format!("Failed to find members: {}", e))
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, String> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, age, team_id
            FROM member
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find members by username: {}", e))
    }

    async fn find_by_username_query_builder(
        &self,
        username: &str,
    ) -> Result<Vec<Member>, String> {
        SelectQuery::select_from(&MEMBER)
            .where_(MEMBER.username.eq(username))
            .fetch(&self.pool)
            .await
            .map_err(|e| format!("Failed to find members by username: {}", e))
    }

    async fn search_by_builder(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeam>, String> {
        search_by_builder_query(condition)
            .fetch(&self.pool)
            .await
            .map_err(|e| format!("Failed to search members: {}", e))
    }

    async fn search(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeam>, String> {
        search_query(condition)
            .fetch(&self.pool)
            .await
            .map_err(|e| format!("Failed to search members: {}", e))
    }

    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> Result<Page<MemberTeam>, String> {
        search_query(condition)
            .fetch_page(&self.pool, page)
            .await
            .map_err(|e| format!("Failed to search member page: {}", e))
    }
}

/// Members left-joined to their team, projected into [`MemberTeam`]
fn member_team_query() -> SelectQuery {
    SelectQuery::select(&[
        &MEMBER.id,
        &MEMBER.username,
        &MEMBER.age,
        &TEAM.id,
        &TEAM.name.as_alias("team_name"),
    ])
    .from(&MEMBER)
    .left_join(&TEAM, MEMBER.team(&TEAM))
    .order_by(MEMBER.username.asc().nulls_last())
    .order_by(MEMBER.id.asc())
}

fn search_by_builder_query(condition: &MemberSearchCondition) -> SelectQuery {
    let mut builder = ConditionBuilder::new();
    if let Some(fragment) = condition.username_substring() {
        builder.and(MEMBER.username.contains(fragment));
    }
    if let Some(name) = condition.team_name() {
        builder.and(TEAM.name.eq(name));
    }
    if let Some(age) = condition.age_goe {
        builder.and(MEMBER.age.goe(age));
    }
    if let Some(age) = condition.age_loe {
        builder.and(MEMBER.age.loe(age));
    }

    member_team_query().where_all([builder.build()])
}

fn search_query(condition: &MemberSearchCondition) -> SelectQuery {
    member_team_query().where_all([
        username_contains(condition.username_substring()),
        team_name_eq(condition.team_name()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ])
}

fn username_contains(fragment: Option<&str>) -> Option<Predicate> {
    fragment.map(|fragment| MEMBER.username.contains(fragment))
}

fn team_name_eq(name: Option<&str>) -> Option<Predicate> {
    name.map(|name| TEAM.name.eq(name))
}

fn age_goe(age: Option<i32>) -> Option<Predicate> {
    age.map(|age| MEMBER.age.goe(age))
}

fn age_loe(age: Option<i32>) -> Option<Predicate> {
    age.map(|age| MEMBER.age.loe(age))
}
