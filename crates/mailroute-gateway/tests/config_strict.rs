#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mailroute_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8080"
api:
  auth_token_envv: "TOKEN" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.api.auth_token_env, "MAILROUTE_API_TOKEN");
    assert!(cfg.store.seed_path.is_none());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:9025"
api:
  auth_token_env: "ROUTES_TOKEN"
store:
  seed_path: "routes.json"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.listen_addr().unwrap().port(), 9025);
    assert_eq!(cfg.api.auth_token_env, "ROUTES_TOKEN");
    assert_eq!(cfg.store.seed_path.as_deref(), Some("routes.json"));
}

#[test]
fn wrong_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_listen_rejected() {
    let bad = "version: 1\ngateway:\n  listen: \"not-an-addr\"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("gateway.listen"));
}

#[test]
fn empty_token_env_rejected() {
    let bad = "version: 1\napi:\n  auth_token_env: \"  \"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("api.auth_token_env"));
}
