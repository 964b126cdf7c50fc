pub mod gemini;
pub mod noop;
mod prompts;
pub mod prompt_builder;

/// Returned when the endpoint answered but no candidate text could be found.
pub const NO_RESPONSE: &str = "No response generated.";

/// Returned when the call itself failed (transport, unreadable or non-JSON body).
pub const GENERATION_ERROR: &str = "Error generating response.";

/// Trait for talking to a text-generation backend.
///
/// Calls never fail from the caller's point of view: every outcome is a string,
/// either a genuine answer or one of [`NO_RESPONSE`] / [`GENERATION_ERROR`].
pub trait AssistantClient: Send + Sync {
    /// Perform exactly one generation call.
    fn generate(&self, prompt: &str, system_instruction: &str) -> String;
}

/// Truncate long strings for debug logging.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...\n[truncated {} chars]", &s[..cut], s.len() - cut)
}
