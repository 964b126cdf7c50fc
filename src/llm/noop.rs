use super::{truncate, AssistantClient};

/// No-op / dummy client for offline use with --no-model.
pub struct NoopClient;

impl AssistantClient for NoopClient {
    fn generate(&self, prompt: &str, _system_instruction: &str) -> String {
        log::debug!("NoopClient answering without a model call");
        format!("[DUMMY REPLY] {}", truncate(prompt.trim(), 200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_prompt() {
        assert_eq!(NoopClient.generate("  hi there\n", "sys"), "[DUMMY REPLY] hi there");
    }
}
