use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::repositories::MemberRepository;
use crate::domain::search::condition::empty_string_as_none;
use crate::domain::search::{MemberSearchCondition, MemberTeam};
use crate::infrastructure::repositories::PostgresMemberRepository;
use crate::query::{Page, PageRequest};

/// Paging parameters for the v2 search
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
}

impl TryFrom<PageParams> for PageRequest {
    type Error = ApiError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let defaults = PageRequest::default();
        let offset = params.offset.unwrap_or(defaults.offset);
        let limit = params.limit.unwrap_or(defaults.limit);

        if offset < 0 {
            return Err(ApiError::bad_request("offset must not be negative"));
        }
        if limit < 0 {
            return Err(ApiError::bad_request("limit must not be negative"));
        }

        Ok(PageRequest::new(offset, limit))
    }
}

/// Search members with their team
///
/// GET /v1/members?usernameSubstring=&teamName=&ageGoe=&ageLoe=
pub async fn search_members(
    State(pool): State<PgPool>,
    Query(condition): Query<MemberSearchCondition>,
) -> Result<Json<Vec<MemberTeam>>, ApiError> {
    tracing::debug!(?condition, "searching members");

    let member_repo = PostgresMemberRepository::new(pool);
    let members = member_repo
        .search(&condition)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(members))
}

/// Search members with their team, one page at a time
///
/// GET /v2/members?usernameSubstring=&teamName=&ageGoe=&ageLoe=&offset=&limit=
pub async fn search_members_page(
    State(pool): State<PgPool>,
    Query(condition): Query<MemberSearchCondition>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<MemberTeam>>, ApiError> {
    let page = PageRequest::try_from(params)?;
    tracing::debug!(?condition, offset = page.offset, limit = page.limit, "searching member page");

    let member_repo = PostgresMemberRepository::new(pool);
    let members = member_repo
        .search_page(&condition, page)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn condition_from(uri: &str) -> MemberSearchCondition {
        let uri: Uri = uri.parse().unwrap();
        Query::<MemberSearchCondition>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn query_string_binds_into_condition() {
        let condition =
            condition_from("/v1/members?usernameSubstring=mem&teamName=teamB&ageGoe=35&ageLoe=40");

        assert_eq!(
            condition,
            MemberSearchCondition {
                username_substring: Some("mem".to_string()),
                team_name: Some("teamB".to_string()),
                age_goe: Some(35),
                age_loe: Some(40),
            }
        );
    }

    #[test]
    fn empty_parameters_bind_as_absent() {
        let condition = condition_from("/v1/members?usernameSubstring=&teamName=&ageGoe=&ageLoe=");

        assert_eq!(condition, MemberSearchCondition::default());
    }

    #[test]
    fn missing_query_string_binds_empty_condition() {
        assert!(condition_from("/v1/members").is_empty());
    }

    #[test]
    fn malformed_age_is_rejected() {
        let uri: Uri = "/v1/members?ageGoe=old".parse().unwrap();
        assert!(Query::<MemberSearchCondition>::try_from_uri(&uri).is_err());
    }

    #[test]
    fn page_params_default_and_validate() {
        let page = PageRequest::try_from(PageParams::default()).unwrap();
        assert_eq!(page, PageRequest::default());

        let negative = PageParams {
            offset: Some(-1),
            limit: None,
        };
        let err = PageRequest::try_from(negative).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
