//! Read-only functional tests

use predicates::prelude::*;

use super::{FunctionalTestContext, PUBLIC_STEAM_ID, TF2_APP_ID};

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_status_reports_reachable() {
    let ctx = FunctionalTestContext::new();

    ctx.run(&["status"])
        .success()
        .stdout(predicate::str::contains("API key configured"))
        .stdout(predicate::str::contains("reachable"));
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_player_summary_json() {
    let ctx = FunctionalTestContext::new();

    ctx.run(&["player", "summary", PUBLIC_STEAM_ID, "--format", "json"])
        .success()
        .stdout(predicate::str::contains(PUBLIC_STEAM_ID))
        .stdout(predicate::str::contains("\"meta\""));
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_resolve_vanity_url() {
    let ctx = FunctionalTestContext::new();

    let stdout = ctx.run_success(&["player", "resolve", "gabelogannewell"]);
    assert!(stdout.contains(PUBLIC_STEAM_ID));
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_player_bans() {
    let ctx = FunctionalTestContext::new();

    ctx.run(&["player", "bans", PUBLIC_STEAM_ID]).success();
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_current_players() {
    let ctx = FunctionalTestContext::new();

    ctx.run(&["stats", "players", TF2_APP_ID])
        .success()
        .stdout(predicate::str::contains("players in app 440"));
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_news_count_is_respected() {
    let ctx = FunctionalTestContext::new();

    let stdout = ctx.run_success(&["stats", "news", TF2_APP_ID, "--count", "2", "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed["data"].as_array().is_some_and(|items| items.len() <= 2));
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_store_details() {
    let ctx = FunctionalTestContext::new();

    ctx.run(&["games", "details", TF2_APP_ID])
        .success()
        .stdout(predicate::str::contains("Team Fortress 2"));
}
