//! Resume summarization — one completion call at session start. The summary
//! is stored on the session and never regenerated.

use crate::llm_client::{ChatMessage, CompletionClient, LlmError};

const RESUME_SUMMARY_TEMPERATURE: f32 = 0.3;

const RESUME_SUMMARY_SYSTEM: &str =
    "You are an expert career coach. Summarize resumes and extract key skills.";

/// Replace `{resume_text}` before sending.
const RESUME_SUMMARY_PROMPT_TEMPLATE: &str = "\
Here is the candidate's resume:

{resume_text}

Summarize their profile in 4-6 bullet points and list their main skills.";

/// Summarizes raw resume text into a short profile used to ground questions.
/// Failures propagate: a dead completion service aborts interview start visibly.
pub async fn summarize_resume(
    llm: &dyn CompletionClient,
    resume_text: &str,
) -> Result<String, LlmError> {
    let messages = vec![
        ChatMessage::system(RESUME_SUMMARY_SYSTEM),
        ChatMessage::user(RESUME_SUMMARY_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)),
    ];
    llm.complete(&messages, RESUME_SUMMARY_TEMPERATURE).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedClient;

    #[tokio::test]
    async fn test_summarize_resume_returns_model_text() {
        let llm = ScriptedClient::with_responses(&["- Built payment systems in Rust"]);
        let summary = summarize_resume(&llm, "Senior engineer, 8 years, Rust and Go.")
            .await
            .unwrap();
        assert_eq!(summary, "- Built payment systems in Rust");
    }

    #[tokio::test]
    async fn test_summarize_resume_propagates_transport_failure() {
        let llm = ScriptedClient::failing();
        let result = summarize_resume(&llm, "resume text").await;
        assert!(result.is_err());
    }
}
