#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use metricsum_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:9999"
window:
  windw_ms: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:9999");
    assert_eq!(cfg.window.window_ms, 10_000);
    assert!(cfg.janitor.enabled);
    assert_eq!(cfg.window.window().as_nanos(), 10_000_000_000);
}

#[test]
fn sweep_interval_is_window_plus_grace() {
    let cfg = config::load_from_str(
        r#"
version: 1
window:
  window_ms: 2000
  grace_ms: 250
janitor:
  enabled: false
"#,
    )
    .expect("must parse");
    assert_eq!(cfg.window.sweep_interval(), Duration::from_millis(2250));
    assert!(!cfg.janitor.enabled);
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nwindow:\n  window_ms: 0\n",
        "version: 1\nwindow:\n  grace_ms: 3600001\n",
        "version: 1\nserver:\n  listen: \"not-an-addr\"\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.client_code().as_str(), "BAD_CONFIG", "input={bad}");
    }
}

#[test]
fn missing_file_is_a_config_error() {
    let err = config::load_from_file("/nonexistent/metricsum.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}
