//! Profile Generator: turns a name, a city and a matched context window into
//! synthetic profile text via the chat-completion API.
//!
//! API failures are soft: the error text is returned in place of a profile and the
//! caller stores it like any other result.

pub mod prompts;

use std::sync::Arc;

use tracing::error;

use crate::llm_client::{CompletionClient, LlmError};
use crate::profile::prompts::{PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM};

/// Fills the profile template in a single pass, so placeholder-like text inside a
/// name, a city or the context is copied through literally.
pub fn build_profile_prompt(
    first_name: &str,
    last_name: &str,
    city: &str,
    context: &str,
) -> String {
    fill_template(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("{first_name}", first_name),
            ("{last_name}", last_name),
            ("{city}", city),
            ("{profile_book_data}", context),
        ],
    )
}

fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        match values.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn error_placeholder(err: &LlmError) -> String {
    format!("Error generating profile: {err}")
}

#[derive(Clone)]
pub struct ProfileGenerator {
    llm: Arc<dyn CompletionClient>,
}

impl ProfileGenerator {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Trimmed model output. A blank reply counts as `EmptyContent`.
    async fn try_generate(
        &self,
        first_name: &str,
        last_name: &str,
        city: &str,
        context: &str,
    ) -> Result<String, LlmError> {
        let prompt = build_profile_prompt(first_name, last_name, city, context);
        let text = self.llm.complete(PROFILE_SYSTEM, &prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }

    /// Returns the trimmed model output. On failure the error description comes
    /// back instead, so the result is never empty.
    pub async fn generate(
        &self,
        first_name: &str,
        last_name: &str,
        city: &str,
        context: &str,
    ) -> String {
        self.try_generate(first_name, last_name, city, context)
            .await
            .unwrap_or_else(|e| {
                error!("Error generating profile for {first_name} {last_name}: {e}");
                error_placeholder(&e)
            })
    }
}
