use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::search::TeamAgeAverage;
use crate::domain::team::{Team, TeamMembers};

/// Repository trait for the Team entity
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> Result<(), String>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String>;

    /// Find every team, ordered by name
    async fn find_all(&self) -> Result<Vec<Team>, String>;

    /// Load a team together with the members that belong to it
    async fn find_with_members(&self, id: Uuid) -> Result<Option<TeamMembers>, String>;

    /// Average member age per team, for teams with at least one member
    async fn average_age_by_team(&self) -> Result<Vec<TeamAgeAverage>, String>;
}
