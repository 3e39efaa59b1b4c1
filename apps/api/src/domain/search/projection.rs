use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member joined with its team, flattened for transport
///
/// Team fields are `None` for members without a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeam {
    pub member_id: Uuid,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

/// Average member age of one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub average_age: Decimal,
}
