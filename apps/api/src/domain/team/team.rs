use std::fmt;
use uuid::Uuid;

use crate::domain::member::Member;

/// Team entity
///
/// Members reference their team; the team itself holds no member list.
/// The reverse view is loaded on demand as [`TeamMembers`].
///
/// # Example
/// ```
/// use roster_api::domain::team::Team;
///
/// let team = Team::new("teamA");
/// assert_eq!(team.name(), "teamA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Team {
    #[sqlx(rename = "team_id")]
    id: Uuid,
    name: String,
}

impl Team {
    /// Creates a new team with a freshly generated ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team(id={}, name={})", self.id, self.name)
    }
}

/// Read-only view of a team together with the members that reference it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMembers {
    team: Team,
    members: Vec<Member>,
}

impl TeamMembers {
    pub fn new(team: Team, members: Vec<Member>) -> Self {
        Self { team, members }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn into_parts(self) -> (Team, Vec<Member>) {
        (self.team, self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_team_with_name() {
        let team = Team::new("teamA");

        assert_eq!(team.name(), "teamA");
        assert_eq!(team.to_string(), format!("Team(id={}, name=teamA)", team.id()));
    }

    #[test]
    fn team_members_view_exposes_members() {
        let team = Team::new("teamA");
        let members = vec![
            Member::with_team("member1", 10, &team),
            Member::with_team("member2", 20, &team),
        ];

        let view = TeamMembers::new(team.clone(), members);

        assert_eq!(view.team(), &team);
        assert_eq!(view.members().len(), 2);
        assert!(view
            .members()
            .iter()
            .all(|member| member.team_id() == Some(team.id())));

        let (owner, members) = view.into_parts();
        assert_eq!(owner, team);
        assert_eq!(members[1].username(), Some("member2"));
    }
}
