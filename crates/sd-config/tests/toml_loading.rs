//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use sd_config::SdConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://pm.example.com/api/"
request_timeout_secs = 15

[sync]
report_poll_interval_ms = 1500

[auth]
keyring_service = "sprintdesk-test"
file_only = true
"#,
        )?;

        let config: SdConfig = Figment::from(Serialized::defaults(SdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://pm.example.com/api/");
        assert_eq!(config.api.request_timeout_secs, Some(15));
        assert_eq!(config.sync.report_poll_interval_ms, 1500);
        assert_eq!(config.sync.default_page_size, 20);
        assert_eq!(config.auth.keyring_service, "sprintdesk-test");
        assert!(config.auth.file_only);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://from-toml.example.com/api/"
"#,
        )?;
        jail.set_env("SPRINTDESK_API__BASE_URL", "https://from-env.example.com/api/");

        let config: SdConfig = Figment::from(Serialized::defaults(SdConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SPRINTDESK_").split("__"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://from-env.example.com/api/");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sprintdesk")?;
        jail.create_file(
            ".sprintdesk/config.toml",
            r#"
[sync]
report_poll_interval_ms = 500
"#,
        )?;

        let config = SdConfig::load().expect("config loads");
        assert_eq!(config.sync.report_poll_interval_ms, 500);
        Ok(())
    });
}

#[test]
fn env_poll_interval_is_numeric() {
    Jail::expect_with(|jail| {
        jail.set_env("SPRINTDESK_SYNC__REPORT_POLL_INTERVAL_MS", "250");
        let config = SdConfig::load().expect("config loads");
        assert_eq!(config.sync.report_poll_interval_ms, 250);
        Ok(())
    });
}

#[test]
fn malformed_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SPRINTDESK_SYNC__REPORT_POLL_INTERVAL_MS", "soon");
        assert!(SdConfig::load().is_err());
        Ok(())
    });
}
