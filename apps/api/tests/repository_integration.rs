//! Integration tests for repository layer
//!
//! These tests verify that repository implementations correctly interact
//! with the PostgreSQL database: saving and loading entities, the plain and
//! query-builder lookups, and dynamic member searches.
//!
//! Each test runs against a fresh database created by `#[sqlx::test]`, so
//! `DATABASE_URL` must point at a server the test user may create databases on.

use fixture::*;
use roster_api::domain::member::Member;
use roster_api::domain::repositories::{MemberRepository, TeamRepository};
use roster_api::domain::search::MemberSearchCondition;
use roster_api::domain::team::Team;
use roster_api::infrastructure::repositories::{PostgresMemberRepository, PostgresTeamRepository};
use roster_api::query::PageRequest;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

mod fixture {
    use super::*;

    /// Teams A and B with members 1-4 aged 10, 20, 30, 40 (A, A, B, B)
    pub async fn given_teams_and_members(pool: &PgPool) -> (Team, Team) {
        let team_repo = PostgresTeamRepository::new(pool.clone());
        let member_repo = PostgresMemberRepository::new(pool.clone());

        let team_a = Team::new("teamA");
        let team_b = Team::new("teamB");
        team_repo.save(&team_a).await.expect("Failed to save teamA");
        team_repo.save(&team_b).await.expect("Failed to save teamB");

        for (username, age, team) in [
            ("member1", 10, &team_a),
            ("member2", 20, &team_a),
            ("member3", 30, &team_b),
            ("member4", 40, &team_b),
        ] {
            member_repo
                .save(&Member::with_team(username, age, team))
                .await
                .expect("Failed to save member");
        }

        (team_a, team_b)
    }

    pub fn usernames<'a, I>(rows: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = &'a roster_api::domain::search::MemberTeam>,
    {
        rows.into_iter().map(|row| row.username.clone()).collect()
    }

    pub fn named(names: &[&str]) -> Vec<Option<String>> {
        names.iter().map(|name| Some(name.to_string())).collect()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_repository_basic_lookups(pool: PgPool) {
    let member_repo = PostgresMemberRepository::new(pool);

    let member = Member::new("member1", 10);
    member_repo.save(&member).await.expect("Failed to save member");

    // Test: Find by id
    let found = member_repo
        .find_by_id(member.id())
        .await
        .expect("Failed to find member by id");
    assert_eq!(found, Some(member.clone()), "Member should round-trip");

    // Test: Find all
    let all = member_repo.find_all().await.expect("Failed to find members");
    assert_eq!(all, vec![member.clone()]);

    // Test: Find by username
    let by_name = member_repo
        .find_by_username("member1")
        .await
        .expect("Failed to find by username");
    assert_eq!(by_name, vec![member]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_repository_query_builder_lookups(pool: PgPool) {
    let member_repo = PostgresMemberRepository::new(pool);

    let member = Member::new("member1", 10);
    member_repo.save(&member).await.expect("Failed to save member");

    let all = member_repo
        .find_all_query_builder()
        .await
        .expect("Failed to find members");
    assert_eq!(all, vec![member.clone()]);

    let by_name = member_repo
        .find_by_username_query_builder("member1")
        .await
        .expect("Failed to find by username");
    assert_eq!(by_name, vec![member]);

    let missing = member_repo
        .find_by_username_query_builder("nobody")
        .await
        .expect("Failed to find by username");
    assert!(missing.is_empty(), "Unknown username should match nothing");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_repository_find_by_unknown_id(pool: PgPool) {
    let member_repo = PostgresMemberRepository::new(pool);

    let found = member_repo
        .find_by_id(Uuid::new_v4())
        .await
        .expect("Lookup should succeed");

    assert!(found.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_repository_upsert_updates_existing(pool: PgPool) {
    let team_repo = PostgresTeamRepository::new(pool.clone());
    let member_repo = PostgresMemberRepository::new(pool);

    let team = Team::new("teamA");
    team_repo.save(&team).await.expect("Failed to save team");

    let mut member = Member::new("member1", 10);
    member_repo.save(&member).await.expect("Failed to save member");

    // Save again after joining a team (should update, not duplicate)
    member.change_team(&team);
    member_repo.save(&member).await.expect("Failed to update member");

    let all = member_repo.find_all().await.expect("Failed to find members");
    assert_eq!(all.len(), 1, "Should only have 1 member (upserted)");
    assert_eq!(all[0].team_id(), Some(team.id()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_by_builder_applies_all_bounds(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let member_repo = PostgresMemberRepository::new(pool);

    let condition = MemberSearchCondition {
        age_goe: Some(35),
        age_loe: Some(40),
        team_name: Some("teamB".to_string()),
        ..Default::default()
    };

    let result = member_repo
        .search_by_builder(&condition)
        .await
        .expect("Search should succeed");

    assert_eq!(usernames(&result), named(&["member4"]));
    assert_eq!(result[0].team_name.as_deref(), Some("teamB"));
    assert_eq!(result[0].age, 40);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_applies_all_bounds(pool: PgPool) {
    let (_, team_b) = given_teams_and_members(&pool).await;
    let member_repo = PostgresMemberRepository::new(pool);

    let condition = MemberSearchCondition {
        age_goe: Some(35),
        age_loe: Some(40),
        team_name: Some("teamB".to_string()),
        ..Default::default()
    };

    let result = member_repo
        .search(&condition)
        .await
        .expect("Search should succeed");

    assert_eq!(usernames(&result), named(&["member4"]));
    assert_eq!(result[0].team_id, Some(team_b.id()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_without_condition_returns_everyone(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let member_repo = PostgresMemberRepository::new(pool);

    // A member without a team still shows up through the left join
    let loner = Member::new("member5", 50);
    member_repo.save(&loner).await.expect("Failed to save member");

    let result = member_repo
        .search(&MemberSearchCondition::default())
        .await
        .expect("Search should succeed");

    assert_eq!(
        usernames(&result),
        named(&["member1", "member2", "member3", "member4", "member5"])
    );
    let last = result.last().unwrap();
    assert_eq!(last.member_id, loner.id());
    assert!(last.team_id.is_none());
    assert!(last.team_name.is_none());

    let by_builder = member_repo
        .search_by_builder(&MemberSearchCondition::default())
        .await
        .expect("Search should succeed");
    assert_eq!(by_builder, result, "Both search flavours should agree");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_username_substring(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let member_repo = PostgresMemberRepository::new(pool);

    let condition = MemberSearchCondition {
        username_substring: Some("ber1".to_string()),
        ..Default::default()
    };
    let result = member_repo.search(&condition).await.expect("Search should succeed");
    assert_eq!(usernames(&result), named(&["member1"]));

    // Wildcards in the fragment are matched literally
    let wildcard = MemberSearchCondition {
        username_substring: Some("%".to_string()),
        ..Default::default()
    };
    let result = member_repo.search(&wildcard).await.expect("Search should succeed");
    assert!(result.is_empty(), "A literal % matches no username");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_single_bound(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let member_repo = PostgresMemberRepository::new(pool);

    let condition = MemberSearchCondition {
        age_goe: Some(20),
        ..Default::default()
    };
    let result = member_repo
        .search_by_builder(&condition)
        .await
        .expect("Search should succeed");

    assert_eq!(usernames(&result), named(&["member2", "member3", "member4"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_page_slices_and_counts(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let member_repo = PostgresMemberRepository::new(pool);

    let page = member_repo
        .search_page(&MemberSearchCondition::default(), PageRequest::new(1, 2))
        .await
        .expect("Search page should succeed");

    assert_eq!(page.total, 4);
    assert_eq!(page.offset, 1);
    assert_eq!(page.limit, 2);
    assert_eq!(usernames(&page.content), named(&["member2", "member3"]));
    assert!(page.has_next());

    let filtered = member_repo
        .search_page(
            &MemberSearchCondition {
                team_name: Some("teamA".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .expect("Search page should succeed");

    assert_eq!(filtered.total, 2);
    assert_eq!(usernames(&filtered.content), named(&["member1", "member2"]));
    assert!(!filtered.has_next());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_team_repository_save_and_find(pool: PgPool) {
    let team_repo = PostgresTeamRepository::new(pool);

    let team_b = Team::new("teamB");
    let team_a = Team::new("teamA");
    team_repo.save(&team_b).await.expect("Failed to save team");
    team_repo.save(&team_a).await.expect("Failed to save team");

    let found = team_repo
        .find_by_id(team_a.id())
        .await
        .expect("Failed to find team");
    assert_eq!(found, Some(team_a.clone()));

    let all = team_repo.find_all().await.expect("Failed to find teams");
    assert_eq!(all, vec![team_a, team_b], "Teams should be ordered by name");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_team_repository_find_with_members(pool: PgPool) {
    let (team_a, _) = given_teams_and_members(&pool).await;
    let team_repo = PostgresTeamRepository::new(pool);

    let view = team_repo
        .find_with_members(team_a.id())
        .await
        .expect("Failed to load team")
        .expect("Team should exist");

    assert_eq!(view.team(), &team_a);
    let names: Vec<_> = view.members().iter().map(|m| m.username()).collect();
    assert_eq!(names, vec![Some("member1"), Some("member2")]);

    let missing = team_repo
        .find_with_members(Uuid::new_v4())
        .await
        .expect("Lookup should succeed");
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_team_repository_average_age_by_team(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let team_repo = PostgresTeamRepository::new(pool);

    let averages = team_repo
        .average_age_by_team()
        .await
        .expect("Aggregation should succeed");

    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].team_name, "teamA");
    assert_eq!(averages[0].average_age, Decimal::from(15));
    assert_eq!(averages[1].team_name, "teamB");
    assert_eq!(averages[1].average_age, Decimal::from(35));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repository_futures_run_on_spawned_tasks(pool: PgPool) {
    given_teams_and_members(&pool).await;
    let team_repo = PostgresTeamRepository::new(pool.clone());
    let member_repo = PostgresMemberRepository::new(pool);

    // Repositories are used from axum handlers, which run on the multi-threaded runtime
    let averages = tokio::spawn(async move { team_repo.average_age_by_team().await })
        .await
        .expect("Task should not panic")
        .expect("Aggregation should succeed");
    assert_eq!(averages.len(), 2);

    let page = tokio::spawn(async move {
        member_repo
            .search_page(&MemberSearchCondition::default(), PageRequest::new(0, 2))
            .await
    })
    .await
    .expect("Task should not panic")
    .expect("Search page should succeed");
    assert_eq!(page.total, 4);
}
