use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::member::{Member, MEMBER};
use crate::domain::repositories::TeamRepository;
use crate::domain::search::TeamAgeAverage;
use crate::domain::team::{Team, TeamMembers, TEAM};
use crate::query::{SelectQuery, Selectable};

/// PostgreSQL implementation of TeamRepository
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO team (team_id, name)
            VALUES ($1, $2)
            ON CONFLICT (team_id) DO UPDATE SET
                name = EXCLUDED.name
            "#,
        )
        .bind(team.id())
        .bind(team.name())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save team: {}", e))?;

        tracing::debug!(team_id = %team.id(), "team saved");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String> {
        SelectQuery::select_from(&TEAM)
            .where_(TEAM.id.eq(id))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| format!("Failed to find team by id: {}", e))
    }

    async fn find_all(&self) -> Result<Vec<Team>, String> {
        SelectQuery::select_from(&TEAM)
            .order_by(TEAM.name.asc())
            .fetch(&self.pool)
            .await
            .map_err(|e| format!("Failed to find teams: {}", e))
    }

    async fn find_with_members(&self, id: Uuid) -> Result<Option<TeamMembers>, String> {
        let Some(team) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let members: Vec<Member> = SelectQuery::select_from(&MEMBER)
            .where_(MEMBER.team_id.eq(id))
            .order_by(MEMBER.username.asc().nulls_last())
            .fetch(&self.pool)
            .await
            .map_err(|e| format!("Failed to find team members: {}", e))?;

        Ok(Some(TeamMembers::new(team, members)))
    }

    async fn average_age_by_team(&self) -> Result<Vec<TeamAgeAverage>, String> {
        SelectQuery::select(&[
            &TEAM.name.as_alias("team_name"),
            &MEMBER.age.avg().as_alias("average_age"),
        ])
        .from(&MEMBER)
        .join(&TEAM, MEMBER.team(&TEAM))
        .group_by(&[&TEAM.name])
        .order_by(TEAM.name.asc())
        .fetch(&self.pool)
        .await
        .map_err(|e| format!("Failed to average ages by team: {}", e))
    }
}
