use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const STEAM_ENV: [&str; 4] = [
    "STEAM_API_KEY",
    "STEAM_STORE_TOKEN",
    "STEAM_ACCESS_TOKEN",
    "STEAM_COMMUNITY_TOKEN",
];

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn config_with_base(dir: &Path, base: &str, credentials: &str) -> PathBuf {
    let contents = format!(
        "{credentials}\nsettings:\n  api_base_url: {base}\n  store_base_url: {base}\n  community_base_url: {base}\n"
    );
    write_config(dir, &contents)
}

/// `steamy` with every Steam credential variable cleared.
fn steamy() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("steamy"));
    for var in STEAM_ENV {
        cmd.env_remove(var);
    }
    cmd.env_remove("STEAMY_CONFIG").env_remove("STEAMY_FORMAT");
    cmd
}

#[test]
fn status_without_credentials_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "settings:\n  request_timeout_secs: 5\n");

    let assert = steamy()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("API key not configured"));
    assert!(stdout.contains("STEAM_API_KEY"));

    Ok(())
}

#[test]
fn token_inspect_reads_store_payload() {
    steamy()
        .args(["token", "inspect", r#"{"success":1,"data":{"webapi_token":"abcdefgh"}}"#])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("***efgh"))
        .stdout(predicate::str::contains("\"meta\""));
}

#[test]
fn invalid_steam_id_is_rejected_before_any_request() {
    steamy()
        .args(["player", "friends", "not-a-number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be numeric"));
}

#[test]
fn missing_credentials_show_configuration_hint() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // Unroutable base: the command must fail before reaching it
    let config_path = config_with_base(temp.path(), "http://127.0.0.1:9", "");

    steamy()
        .args(["player", "friends", "76561197960435530"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("steamy status"));

    Ok(())
}

#[test]
fn malformed_config_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "settings: [unclosed\n");

    steamy()
        .args(["stats", "players", "440"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn friends_json_output_uses_env_api_key() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _friends = server
        .mock("GET", "/ISteamUser/GetFriendList/v1/")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("steamid".into(), "76561197960435530".into()),
            mockito::Matcher::UrlEncoded("key".into(), "env-key".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"friendslist": {"friends": [
                {"steamid": "76561197960265731", "relationship": "friend", "friend_since": 0}
            ]}}"#,
        )
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = config_with_base(temp.path(), &server.url(), "api_key: file-key");

    let assert = steamy()
        .args(["player", "friends", "76561197960435530", "--format", "json"])
        .arg("--config")
        .arg(&config_path)
        .env("STEAM_API_KEY", "env-key")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("76561197960265731"));
    assert!(stdout.contains("\"data\""));
    _friends.assert();

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn market_price_table_without_credentials() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _price = server
        .mock("GET", "/market/priceoverview/")
        .match_query(mockito::Matcher::UrlEncoded(
            "market_hash_name".into(),
            "Chroma 2 Case".into(),
        ))
        .with_status(200)
        .with_body(r#"{"success": true, "lowest_price": "$2.50", "median_price": "$2.47", "volume": "1,024"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = config_with_base(temp.path(), &server.url(), "");

    steamy()
        .args(["market", "price", "Chroma 2 Case"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("$2.50"))
        .stdout(predicate::str::contains("1,024"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn private_library_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _owned = server
        .mock("GET", "/IPlayerService/GetOwnedGames/v1/")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"response": {}}"#)
        .create();

    let temp = tempdir()?;
    let config_path = config_with_base(temp.path(), &server.url(), "api_key: K");

    steamy()
        .args(["games", "owned", "76561197960435530"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("private"));

    Ok(())
}
