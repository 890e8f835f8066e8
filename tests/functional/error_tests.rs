//! Error scenario functional tests

use predicates::prelude::*;

use super::FunctionalTestContext;

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_unknown_vanity_name_does_not_fail() {
    let ctx = FunctionalTestContext::new();

    ctx.run(&["player", "resolve", "steamy-functest-nobody-should-own-this-name"])
        .success()
        .stdout(predicate::str::contains("No profile matches"));
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_bad_api_key_is_rejected() {
    let ctx = FunctionalTestContext::new();

    ctx.command(&["player", "bans", "76561197960287930"])
        .env("STEAM_API_KEY", "0000000000000000000000000000000")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("rejected")
                .or(predicate::str::contains("denied"))
                .or(predicate::str::contains("Bad request")),
        );
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_family_without_token_is_configuration_error() {
    let ctx = FunctionalTestContext::new();

    ctx.command(&["family", "group"])
        .env_remove("STEAM_STORE_TOKEN")
        .env_remove("STEAM_ACCESS_TOKEN")
        .env_remove("STEAM_COMMUNITY_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("steamy status"));
}
