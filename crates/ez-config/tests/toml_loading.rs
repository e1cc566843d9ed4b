//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use ez_config::EzConfig;
use pretty_assertions::assert_eq;

fn layered(jail_file: &str) -> Figment {
    Figment::from(Serialized::defaults(EzConfig::default())).merge(Toml::file(jail_file))
}

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind = "0.0.0.0:9000"
max_body_bytes = 1024

[database]
path = "/var/lib/ezriya/app.db"
url = "libsql://ezriya.turso.io"
auth_token = "db-token"

[auth]
service_keys = ["svc-a", "svc-b"]

[general]
templates_path = "seed/templates.toml"
"#,
        )?;

        let config: EzConfig = layered("config.toml").extract()?;

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.max_body_bytes, 1024);
        assert_eq!(config.database.path, "/var/lib/ezriya/app.db");
        assert!(config.database.is_configured());
        assert_eq!(config.auth.service_keys, ["svc-a", "svc-b"]);
        assert!(config.auth.accepts("svc-b"));
        assert_eq!(config.general.templates_path, "seed/templates.toml");
        config.validate().expect("valid");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind = "127.0.0.1:3000"
"#,
        )?;

        let config: EzConfig = layered("config.toml").extract()?;
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.server.max_body_bytes, 64 * 1024);
        assert_eq!(config.database.path, "ezriya.db");
        assert!(!config.auth.is_enforced());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ezriya")?;
        jail.create_file(
            ".ezriya/config.toml",
            r#"
[database]
path = "local.db"
"#,
        )?;

        let config = EzConfig::load().expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn invalid_bind_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind = "not an address"
"#,
        )?;

        let config: EzConfig = layered("config.toml").extract()?;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.bind"), "{err}");
        Ok(())
    });
}

#[test]
fn wrong_type_is_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
max_body_bytes = "lots"
"#,
        )?;

        let result: Result<EzConfig, _> = layered("config.toml").extract();
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("EZRIYA_DATABASE__PATH", "from-env.db");

        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"
auth_token = "toml-token"
"#,
        )?;

        let config: EzConfig = layered("config.toml")
            .merge(Env::prefixed("EZRIYA_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.database.path, "from-env.db");
        // TOML value not overridden by env should remain
        assert_eq!(config.database.auth_token, "toml-token");
        Ok(())
    });
}
