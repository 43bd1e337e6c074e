//! CLI integration tests for the tokex command-line interface.
//!
//! The token endpoint is a local wiremock server; the issuer is passed with
//! an explicit `http://` scheme so no TLS is involved.

use std::collections::BTreeMap;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_BODY: &str = r#"{"access_token":"tok123","expires_in":"3600","token_type":"Bearer"}"#;

/// Get a command for the tokex binary.
fn tokex() -> Command {
    let mut cmd = Command::cargo_bin("tokex").unwrap();
    cmd.env_remove("TOKEX_TIMEOUT").env_remove("RUST_LOG");
    cmd
}

async fn provider(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

async fn received_form(server: &MockServer) -> BTreeMap<String, String> {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    url::form_urlencoded::parse(&requests[0].body)
        .into_owned()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    tokex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("OAuth 2.0 access token"))
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("--m2m"))
        .stdout(predicate::str::contains("--clientId"))
        .stdout(predicate::str::contains("--clientSecret"))
        .stdout(predicate::str::contains("--issuer"));
}

#[test]
fn test_version_displays() {
    tokex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tokex"));
}

#[test]
fn test_unknown_flag_rejected() {
    tokex().arg("--no-such-flag").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Token Exchange Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_m2m_prints_token() {
    let server = provider(200, TOKEN_BODY).await;

    tokex()
        .args(["--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your JWT is:"))
        .stdout(predicate::str::contains("tok123"))
        .stdout(predicate::str::contains("Please enter").not());

    let form = received_form(&server).await;
    assert_eq!(form.len(), 4);
    assert_eq!(form["client_id"], "a");
    assert_eq!(form["client_secret"], "b");
    assert_eq!(form["audience"], "aud");
    assert_eq!(form["grant_type"], "client_credentials");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_password_realm_form() {
    let server = provider(200, TOKEN_BODY).await;

    tokex()
        .args(["--username", "u", "--password", "p"])
        .args(["--client-id", "a", "--client-secret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("tok123"));

    let form = received_form(&server).await;
    assert_eq!(form["username"], "u");
    assert_eq!(form["password"], "p");
    assert_eq!(
        form["grant_type"],
        "http://auth0.com/oauth/grant-type/password-realm"
    );
    assert_eq!(form["realm"], "Username-Password-Authentication");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_non_zero() {
    let server = provider(401, r#"{"error":"invalid"}"#).await;

    tokex()
        .args(["--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Your JWT is").not())
        .stderr(predicate::str::contains("401"))
        .stderr(predicate::str::contains(r#"{"error":"invalid"}"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_output() {
    let server = provider(200, TOKEN_BODY).await;

    let output = tokex()
        .args(["--json", "--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(value["access_token"], "tok123");
    assert_eq!(value["expires_in"], "3600");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_prints_token_details() {
    let server = provider(200, TOKEN_BODY).await;

    tokex()
        .args(["-v", "--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("tok123"))
        .stdout(predicate::str::contains("Token type: Bearer"))
        .stdout(predicate::str::contains("Expires in: 3600 seconds"))
        .stdout(predicate::str::contains("Scope:").not())
        .stderr(predicate::str::contains("Selected flow"))
        .stderr(predicate::str::contains("Prepared token request"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quiet_run_omits_token_details() {
    let server = provider(200, TOKEN_BODY).await;

    tokex()
        .args(["--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token type:").not())
        .stderr(predicate::str::contains("Prepared token request").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Resolution Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_supplies_missing_fields() {
    let server = provider(200, TOKEN_BODY).await;

    let mut profile = tempfile::NamedTempFile::new().unwrap();
    writeln!(profile, "CLIENTID=profile-id").unwrap();
    writeln!(profile, "clientSecret=profile-secret").unwrap();
    writeln!(profile, "AUDIENCE=profile-aud").unwrap();
    writeln!(profile, "ISSUER={}", server.uri()).unwrap();
    profile.flush().unwrap();

    tokex()
        .args(["--m2m", "--clientId", "flag-id"])
        .arg("--profile")
        .arg(profile.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter").not())
        .stdout(predicate::str::contains("tok123"));

    let form = received_form(&server).await;
    assert_eq!(form["client_id"], "flag-id");
    assert_eq!(form["client_secret"], "profile-secret");
    assert_eq!(form["audience"], "profile-aud");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_profile_is_not_fatal() {
    let server = provider(200, TOKEN_BODY).await;
    let dir = tempfile::tempdir().unwrap();

    tokex()
        .args(["--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .arg("--profile")
        .arg(dir.path().join("missing.env"))
        .assert()
        .success()
        .stdout(predicate::str::contains("tok123"))
        .stderr(predicate::str::contains("Error loading profile"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_notes_empty_profile() {
    let server = provider(200, TOKEN_BODY).await;
    let dir = tempfile::tempdir().unwrap();

    tokex()
        .args(["--verbose", "--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", &server.uri()])
        .arg("--profile")
        .arg(dir.path().join("missing.env"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Profile supplies no values"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prompts_for_missing_fields_in_order() {
    let server = provider(200, TOKEN_BODY).await;

    let output = tokex()
        .arg("--m2m")
        .write_stdin(format!("prompted-id\nprompted-secret\naud\n{}\n", server.uri()))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Please enter a username"));
    assert!(!stdout.contains("Please enter a password"));
    let positions: Vec<usize> = ["clientId", "clientSecret", "audience", "issuer"]
        .iter()
        .map(|f| {
            let prompt = format!("Please enter a {}: ", f);
            assert_eq!(stdout.matches(&prompt).count(), 1, "{prompt}");
            stdout.find(&prompt).unwrap()
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let form = received_form(&server).await;
    assert_eq!(form["client_id"], "prompted-id");
    assert_eq!(form["client_secret"], "prompted-secret");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_prompt_answer_is_accepted() {
    let server = provider(200, TOKEN_BODY).await;

    tokex()
        .args(["--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--issuer", &server.uri()])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a audience: "));

    let form = received_form(&server).await;
    assert_eq!(form["audience"], "");
}

#[test]
fn test_invalid_issuer_fails_before_request() {
    tokex()
        .args(["--m2m", "--clientId", "a", "--clientSecret", "b"])
        .args(["--audience", "aud", "--issuer", "not a host"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid issuer"));
}

#[test]
fn test_secrets_are_not_echoed() {
    tokex()
        .args(["--m2m", "--clientId", "client-identifier"])
        .args(["--clientSecret", "very-secret-value"])
        .args(["--audience", "aud", "--issuer", "not a host"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Reading clientSecret argument from command line: ver..."))
        .stdout(predicate::str::contains("very-secret-value").not());
}
