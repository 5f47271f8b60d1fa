use anyhow::Context;
use sd_config::SdConfig;

use crate::cli::GlobalFlags;

/// Load layered config (`.env`, TOML files, `SPRINTDESK_*`), then apply flag overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SdConfig> {
    let mut config = SdConfig::load_with_dotenv().context("failed to load sprintdesk config")?;

    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
    }
    config
        .api
        .normalized_base_url()
        .context("invalid API base URL")?;

    tracing::debug!(base_url = %config.api.base_url, "config loaded");
    Ok(config)
}
