use anyhow::Result;
use log::debug;
use crate::config::Config;
use crate::llm::AssistantClient;
use crate::llm::gemini::GeminiClient;
use crate::llm::noop::NoopClient;

/// Build the assistant client based on CLI + config.
pub fn build_assistant_client(cfg: &Config) -> Result<Box<dyn AssistantClient>> {
    if cfg.no_model {
        debug!("Using NoopClient (no model calls).");
        return Ok(Box::new(NoopClient));
    }

    if cfg.api_key.is_empty() {
        log::warn!("No API key configured; the endpoint will reject requests");
    }

    debug!("Using GeminiClient with model: {}", cfg.model);

    let client = GeminiClient::new(
        cfg.api_key.clone(),
        cfg.model.clone(),
        cfg.endpoint.clone(),
        cfg.timeout,
    )?;
    Ok(Box::new(client))
}
