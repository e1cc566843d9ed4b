//! `EZRIYA_*` environment variables through the full provider chain.

use figment::Jail;
use ez_config::{ConfigError, EzConfig};
use pretty_assertions::assert_eq;

#[test]
fn nested_env_vars_map_to_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("EZRIYA_SERVER__BIND", "0.0.0.0:8080");
        jail.set_env("EZRIYA_SERVER__MAX_BODY_BYTES", "2048");
        jail.set_env("EZRIYA_DATABASE__URL", "libsql://jail.turso.io");
        jail.set_env("EZRIYA_DATABASE__AUTH_TOKEN", "jail-token");
        jail.set_env("EZRIYA_AUTH__SERVICE_KEYS", r#"["svc-jail"]"#);
        jail.set_env("EZRIYA_GENERAL__TEMPLATES_PATH", "templates.toml");
        jail.set_env("EZRIYA_MAINTENANCE__STALE_LISTING_DAYS", "45");

        let config = EzConfig::load().expect("config loads");

        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.server.max_body_bytes, 2048);
        assert!(config.database.is_configured());
        assert!(config.auth.accepts("svc-jail"));
        assert_eq!(config.general.templates_path, "templates.toml");
        assert_eq!(config.maintenance.stale_listing_days, 45);
        Ok(())
    });
}

/// Documents the figment gotcha: typo'd env var keys are silently ignored.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("EZRIYA_DATABASE__PAHT", "typo.db");

        let config = EzConfig::load().expect("config loads");
        assert_eq!(config.database.path, "ezriya.db");
        Ok(())
    });
}

#[test]
fn bad_env_value_surfaces_as_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("EZRIYA_SERVER__MAX_BODY_BYTES", "-1");

        let err = EzConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}
