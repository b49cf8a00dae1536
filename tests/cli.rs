use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(temp: &Path, default_agent: Option<&str>) -> PathBuf {
    let path = temp.join("config.yaml");
    let mut contents = String::from("preferences:\n  page_size: 50\n");
    if let Some(agent) = default_agent {
        contents.push_str(&format!("default_agent: {agent}\n"));
    }
    fs::write(&path, contents).expect("failed to write config");
    path
}

/// Structurally valid unsigned JWT expiring one hour from now.
fn fresh_jwt() -> String {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let exp = (Utc::now() + chrono::Duration::hours(1)).timestamp();
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#).as_bytes());
    format!("{header}.{payload}.sig")
}

fn write_session(temp: &Path, token: &str) -> PathBuf {
    let path = temp.join("session.yaml");
    let contents = format!(
        "token: {token}\nuser:\n  id: u-1\n  email: tester@example.com\n  name: Tester\n"
    );
    fs::write(&path, contents).expect("failed to write session");
    path
}

fn verseop() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verseop"));
    cmd.env_remove("VERSEOP_CONFIG")
        .env_remove("VERSEOP_API_HOST")
        .env_remove("VERSEOP_FORMAT");
    cmd
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), Some("a-42"));

    verseop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Default agent: a-42"))
        .stdout(predicate::str::contains(
            config_path.to_string_lossy().to_string(),
        ));

    Ok(())
}

#[test]
fn status_reports_signed_in_user() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_session(temp.path(), &fresh_jwt());

    verseop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tester@example.com"));

    Ok(())
}

#[test]
fn missing_config_shows_helpful_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let nonexistent_config = temp.path().join("does-not-exist.yaml");

    verseop()
        .arg("agent")
        .arg("list")
        .arg("--config")
        .arg(&nonexistent_config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("verseop init"));

    Ok(())
}

#[test]
fn not_signed_in_suggests_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    // No session file: nothing to authenticate with

    verseop()
        .arg("agent")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("verseop login"));

    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    verseop()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("verseop"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn agent_list_renders_json_envelope_data() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _agents = server
        .mock("GET", "/agents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "success": true,
                "data": [
                    { "agentId": "a-1", "name": "Support Bot", "model": "gpt-4o-mini" }
                ],
                "message": "ok"
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_session(temp.path(), &fresh_jwt());

    verseop()
        .arg("--no-cache")
        .arg("agent")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .arg("--format")
        .arg("json")
        .env("VERSEOP_API_HOST", &api_host)
        .assert()
        .success()
        .stdout(predicate::str::contains("Support Bot"))
        .stdout(predicate::str::contains("a-1"))
        .stdout(predicate::str::contains("\"meta\""));

    Ok(())
}

/// A 401 on a data endpoint clears the persisted session file.
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn expired_session_is_cleared_on_disk() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _agents = server
        .mock("GET", "/agents")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(r#"{"success": false, "message": "token expired"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    let session_path = write_session(temp.path(), "stale-token");

    verseop()
        .arg("--no-cache")
        .arg("agent")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .env("VERSEOP_API_HOST", &api_host)
        .assert()
        .failure()
        .stderr(predicate::str::contains("verseop login"));

    let saved = fs::read_to_string(session_path)?;
    assert!(
        predicate::str::contains("stale-token").not().eval(&saved),
        "Expected session file to be cleared, got: {}",
        saved
    );

    Ok(())
}

/// A failure envelope surfaces its message verbatim.
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn failure_envelope_message_reaches_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _create = server
        .mock("POST", "/agents")
        .with_status(200)
        .with_body(r#"{"success": false, "message": "Agent name already taken"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_session(temp.path(), &fresh_jwt());

    verseop()
        .arg("agent")
        .arg("create")
        .arg("Duplicate")
        .arg("--config")
        .arg(&config_path)
        .env("VERSEOP_API_HOST", &api_host)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Agent name already taken"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn server_error_shows_helpful_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _agents = server
        .mock("GET", "/agents")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body(r#"{"error": "Internal server error"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_session(temp.path(), &fresh_jwt());

    verseop()
        .arg("--no-cache")
        .arg("agent")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .env("VERSEOP_API_HOST", &api_host)
        .assert()
        .failure()
        .stderr(predicate::str::contains("try again later"));

    Ok(())
}

#[test]
fn connection_error_shows_network_message() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_session(temp.path(), &fresh_jwt());

    // Point to a port that nothing is listening on
    verseop()
        .arg("--no-cache")
        .arg("agent")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .env("VERSEOP_API_HOST", "http://127.0.0.1:59999")
        .assert()
        .failure()
        .stderr(predicate::str::contains("connect"));

    Ok(())
}
