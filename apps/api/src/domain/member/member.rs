use std::fmt;
use uuid::Uuid;

use crate::domain::team::Team;

/// Member entity
///
/// A member optionally belongs to one team; the association is owned here
/// through `team_id`.
///
/// # Example
/// ```
/// use roster_api::domain::member::Member;
/// use roster_api::domain::team::Team;
///
/// let team = Team::new("teamA");
/// let member = Member::with_team("member1", 10, &team);
///
/// assert_eq!(member.username(), Some("member1"));
/// assert_eq!(member.team_id(), Some(team.id()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Member {
    #[sqlx(rename = "member_id")]
    id: Uuid,
    username: Option<String>,
    age: i32,
    team_id: Option<Uuid>,
}

impl Member {
    /// Creates a member without a team
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// Creates a member already assigned to `team`
    pub fn with_team(username: impl Into<String>, age: i32, team: &Team) -> Self {
        let mut member = Self::new(username, age);
        member.change_team(team);
        member
    }

    /// Creates a member with no username
    pub fn unnamed(age: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: None,
            age,
            team_id: None,
        }
    }

    /// Moves the member to `team`
    pub fn change_team(&mut self, team: &Team) {
        self.team_id = Some(team.id());
    }

    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the owning team's ID if assigned
    pub fn team_id(&self) -> Option<Uuid> {
        self.team_id
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member(id={}, username={}, age={})",
            self.id,
            self.username.as_deref().unwrap_or("null"),
            self.age
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_has_no_team() {
        let member = Member::new("member1", 10);

        assert_eq!(member.username(), Some("member1"));
        assert_eq!(member.age(), 10);
        assert!(member.team_id().is_none());
    }

    #[test]
    fn members_get_distinct_ids() {
        let first = Member::new("member1", 10);
        let second = Member::new("member1", 10);

        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn change_team_moves_member() {
        let team_a = Team::new("teamA");
        let team_b = Team::new("teamB");
        let mut member = Member::with_team("member1", 10, &team_a);

        member.change_team(&team_b);
        assert_eq!(member.team_id(), Some(team_b.id()));

        member.leave_team();
        assert!(member.team_id().is_none());
    }

    #[test]
    fn unnamed_member_displays_null() {
        let member = Member::unnamed(100);

        assert!(member.username().is_none());
        assert!(member.to_string().contains("username=null"));
        assert!(member.to_string().ends_with("age=100)"));
    }
}
