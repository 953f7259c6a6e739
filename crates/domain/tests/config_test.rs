use netdns_domain::{CliOverrides, Config, ConfigError, LogHook, ResolverKind};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert!(!config.server.tcp);
    assert!(!config.server.passthrough);
    assert_eq!(config.dns.resolver, ResolverKind::Proxy);
    assert_eq!(config.dns.upstream, "8.8.8.8:53");
    assert_eq!(config.dns.udp_max_payload, 0);
    assert!(!config.dns.servfail_on_error);
    assert_eq!(config.query_timeout(), Duration::from_secs(5));
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.hooks.is_empty());
    assert!(!config.logging.prefix);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let file = write_config(
        r#"
[server]
dns_port = 15353
tcp = true

[dns]
resolver = "stub"
udp_max_payload = 512
"#,
    );

    let config = Config::load(file.path().to_str(), CliOverrides::default()).unwrap();

    assert_eq!(config.server.dns_port, 15353);
    assert!(config.server.tcp);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.dns.resolver, ResolverKind::Stub);
    assert_eq!(config.dns.udp_max_payload, 512);
    assert_eq!(config.dns.upstream, "8.8.8.8:53");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_cli_overrides_take_precedence() {
    let file = write_config(
        r#"
[server]
dns_port = 5300

[logging]
hooks = "+recv"
"#,
    );

    let overrides = CliOverrides {
        dns_port: Some(15353),
        upstream: Some("1.1.1.1:53".to_string()),
        passthrough: true,
        log_hooks: Some("recv,send".to_string()),
        log_prefix: true,
        ..Default::default()
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.server.dns_port, 15353);
    assert!(config.server.passthrough);
    assert_eq!(config.dns.upstream, "1.1.1.1:53");
    assert!(config.logging.prefix);

    let hooks = config.logging.log_hooks();
    assert!(hooks.contains(LogHook::Recv));
    assert!(hooks.contains(LogHook::Send));
    assert!(!hooks.contains(LogHook::Request));
}

#[test]
fn test_missing_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/netdns.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_config("[server\ndns_port = ");
    let result = Config::load(file.path().to_str(), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_unknown_resolver_is_parse_error() {
    let file = write_config("[dns]\nresolver = \"recursive\"\n");
    let result = Config::load(file.path().to_str(), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.server.dns_port = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_bad_bind_address() {
    let mut config = Config::default();
    config.server.bind_address = "localhost".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_upstream() {
    let mut config = Config::default();
    config.dns.upstream = "8.8.8.8:dns".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_timeouts() {
    let mut config = Config::default();
    config.dns.query_timeout = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.server.read_timeout = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_udp_max_payload_bounds() {
    let mut config = Config::default();

    config.dns.udp_max_payload = 11;
    assert!(config.validate().is_err());

    config.dns.udp_max_payload = 12;
    assert!(config.validate().is_ok());

    config.dns.udp_max_payload = 0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_save_and_reload_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("netdns.toml");
    let path = path.to_str().unwrap();

    let mut config = Config::default();
    config.server.dns_port = 5353;
    config.dns.resolver = ResolverKind::Stub;
    config.logging.hooks = "-reply".to_string();
    config.save(path).unwrap();

    let reloaded = Config::from_file(path).unwrap();
    assert_eq!(reloaded.server.dns_port, 5353);
    assert_eq!(reloaded.dns.resolver, ResolverKind::Stub);
    assert_eq!(reloaded.logging.hooks, "-reply");
}

#[test]
fn test_resolver_kind_from_str() {
    assert_eq!("proxy".parse::<ResolverKind>(), Ok(ResolverKind::Proxy));
    assert_eq!("STUB".parse::<ResolverKind>(), Ok(ResolverKind::Stub));
    assert!("forward".parse::<ResolverKind>().is_err());
}
