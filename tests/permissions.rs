//! Integration tests for config-driven permission resolution.

mod common;

use common::{PFX, RecordingSink, line};
use slirc_bot::config::{self, Config, ConfigError, ValidationError};
use slirc_bot::handlers::{Command, Signature, sync_handler};
use slirc_bot::security::{MaskPermissions, PermissionResolver, PermissionSet};
use slirc_bot::{Dispatcher, Outcome};
use std::io::Write;

const CONFIG: &str = r#"
[bot]
prefix = "~"
nickname = "bot"

[permissions]
[permissions.masks]
"*!*@test/staff/*" = ["staff"]
"*!*@*.example.com" = ["voice"]
"nick!*@*" = ["trusted", "voice"]

[permissions.opers]
ad = ["dergon"]
"net*" = ["netadmin"]
"#;

fn labels(items: &[&str]) -> PermissionSet {
    items.iter().map(|s| s.to_string()).collect()
}

fn resolver() -> MaskPermissions {
    let config: Config = toml::from_str(CONFIG).unwrap();
    MaskPermissions::from_config(config.permissions.as_ref().unwrap()).unwrap()
}

#[test]
fn test_named_oper_grants() {
    let perms = resolver().resolve(&line("@oper=ad :someOper!magic@host PRIVMSG bot :~x"));
    assert_eq!(perms, labels(&["oper", "oper.ad", "dergon"]));
}

#[test]
fn test_masks_accumulate() {
    let perms = resolver().resolve(&line(":nick!user@host.example.com PRIVMSG #c :hi"));
    assert_eq!(perms, labels(&["trusted", "voice"]));
}

#[test]
fn test_resolution_is_recomputed_per_line() {
    let resolver = resolver();
    let plain = line(":someone!u@test/staff/one PRIVMSG #c :hi");
    let opered = line("@oper=netops :someone!u@test/staff/one PRIVMSG #c :hi");
    assert_eq!(resolver.resolve(&plain), labels(&["staff"]));
    assert_eq!(
        resolver.resolve(&opered),
        labels(&["staff", "oper", "oper.netops", "netadmin"])
    );
    assert_eq!(resolver.resolve(&plain), labels(&["staff"]));
}

#[test]
fn test_closure_resolver() {
    let resolver = |line: &slirc_bot::Line| -> PermissionSet {
        line.nick().map(|n| labels(&[n])).unwrap_or_default()
    };
    assert_eq!(resolver.resolve(&line(":derg!a@b PRIVMSG #c :x")), labels(&["derg"]));
}

#[tokio::test]
async fn test_dispatcher_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = Config::load(file.path()).unwrap();
    config::validate(&config).unwrap();

    let sink = RecordingSink::new();
    let mut dispatcher = Dispatcher::from_config(&config).unwrap().with_sink(sink.clone());
    let handler = sync_handler(Signature::Named(&[]), |_| Ok("welcome, staff".into()));
    dispatcher
        .add_command(
            Command::builder(["staff"], handler)
                .help("staff -- Staff only.")
                .permission("staff")
                .build()
                .unwrap(),
        )
        .unwrap();

    let nick = config.bot.nickname.as_deref();
    let allowed = dispatcher
        .on_line(&line(":s!u@test/staff/s PRIVMSG #ops :bot: staff"), nick)
        .await
        .unwrap();
    assert_eq!(allowed, Outcome::Completed);

    let denied = dispatcher
        .on_line(&line(&format!("{PFX}~staff")), nick)
        .await
        .unwrap();
    assert_eq!(denied, Outcome::Denied);

    assert_eq!(
        sink.take(),
        vec![
            ("#ops".to_string(), "welcome, staff".to_string()),
            ("test".to_string(), "Access Denied.".to_string()),
        ]
    );
}

#[test]
fn test_invalid_patterns() {
    let bad = r#"
[bot]
prefix = ""
channel_prefixes = ""

[permissions.masks]
"[oops" = ["x"]
"#;
    let config: Config = toml::from_str(bad).unwrap();
    let errors = config::validate(&config).unwrap_err();
    assert!(matches!(errors[0], ValidationError::EmptyPrefix));
    assert!(matches!(errors[1], ValidationError::EmptyChannelPrefixes));
    assert!(matches!(errors[2], ValidationError::InvalidMask(ref m) if m == "[oops"));

    let err = Dispatcher::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Permissions(_)));
}
