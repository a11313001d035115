//! Axum route handlers for the Interview API.
//!
//! Wire JSON is camelCase (`interviewId`, `nextQuestion`, `feedbackMarkdown`)
//! to stay compatible with the existing web client.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::{start_interview, submit_answer, InterviewStyle, StartParams};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewRequest {
    pub role: String,
    #[serde(default)]
    pub custom_role: Option<String>,
    pub experience: String,
    pub style: InterviewStyle,
    /// 0, null, or omitted means unbounded.
    #[serde(default)]
    pub max_questions: Option<u32>,
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewResponse {
    pub interview_id: Uuid,
    pub question: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub interview_id: Uuid,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub end: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub done: bool,
    pub next_question: Option<String>,
    pub feedback_markdown: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /start-interview
///
/// Creates a session (summarizing the resume first when one is supplied) and
/// returns the new interview id with the opening question.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Json(request): Json<StartInterviewRequest>,
) -> Result<Json<StartInterviewResponse>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    if request.experience.trim().is_empty() {
        return Err(AppError::Validation("experience cannot be empty".to_string()));
    }

    let params = StartParams {
        role: request.role,
        custom_role: request.custom_role,
        experience: request.experience,
        style: request.style,
        max_questions: request.max_questions,
        resume_text: request.resume_text,
    };

    let (interview_id, question) =
        start_interview(&state.sessions, state.llm.as_ref(), params).await?;

    Ok(Json(StartInterviewResponse {
        interview_id,
        question,
    }))
}

/// POST /answer
///
/// Records an answer and returns either the next question or, once the
/// interview terminates, the closing message and feedback.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let outcome = submit_answer(
        &state.sessions,
        state.llm.as_ref(),
        request.interview_id,
        request.answer.as_deref(),
        request.end,
    )
    .await?;

    Ok(Json(AnswerResponse {
        done: outcome.done,
        next_question: outcome.next_question,
        feedback_markdown: outcome.feedback,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::session::SessionStore;
    use crate::llm_client::testing::ScriptedClient;
    use std::sync::Arc;

    fn test_state(llm: ScriptedClient) -> AppState {
        AppState {
            sessions: Arc::new(SessionStore::new()),
            llm: Arc::new(llm),
        }
    }

    #[test]
    fn test_start_request_accepts_camel_case_wire_format() {
        let body = r#"{
            "role": "Backend Engineer",
            "customRole": null,
            "experience": "Mid",
            "style": "Strict",
            "maxQuestions": 2,
            "resumeText": "some resume"
        }"#;
        let request: StartInterviewRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.role, "Backend Engineer");
        assert_eq!(request.style, InterviewStyle::Strict);
        assert_eq!(request.max_questions, Some(2));
        assert_eq!(request.resume_text.as_deref(), Some("some resume"));
    }

    #[test]
    fn test_start_request_tolerates_omitted_optionals() {
        let body = r#"{"role": "QA Engineer", "experience": "Junior", "style": "Supportive"}"#;
        let request: StartInterviewRequest = serde_json::from_str(body).unwrap();
        assert!(request.max_questions.is_none());
        assert!(request.custom_role.is_none());
        assert!(request.resume_text.is_none());
    }

    #[test]
    fn test_answer_response_serializes_camel_case_keys() {
        let response = AnswerResponse {
            done: true,
            next_question: Some("closing".to_string()),
            feedback_markdown: Some("feedback".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["done"], true);
        assert_eq!(json["nextQuestion"], "closing");
        assert_eq!(json["feedbackMarkdown"], "feedback");
    }

    #[tokio::test]
    async fn test_start_rejects_empty_role() {
        let state = test_state(ScriptedClient::with_responses(&[]));
        let request = StartInterviewRequest {
            role: "  ".to_string(),
            custom_role: None,
            experience: "Mid".to_string(),
            style: InterviewStyle::Strict,
            max_questions: None,
            resume_text: None,
        };
        let result = handle_start_interview(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_two_question_interview_end_to_end() {
        let state = test_state(ScriptedClient::with_responses(&[
            "What was the hardest bug you fixed recently?",
            "Great, thanks. That concludes our loop.",
        ]));

        let start = handle_start_interview(
            State(state.clone()),
            Json(StartInterviewRequest {
                role: "Backend Engineer".to_string(),
                custom_role: None,
                experience: "Mid".to_string(),
                style: InterviewStyle::Strict,
                max_questions: Some(2),
                resume_text: None,
            }),
        )
        .await
        .unwrap();
        assert!(!start.0.question.is_empty());

        let answer = "I introduced feature flags and a canary pipeline so we could roll out \
                      schema changes to the billing service without downtime across regions";

        let first = handle_answer(
            State(state.clone()),
            Json(AnswerRequest {
                interview_id: start.0.interview_id,
                answer: Some(answer.to_string()),
                end: false,
            }),
        )
        .await
        .unwrap();
        assert!(!first.0.done);
        assert!(first.0.feedback_markdown.is_none());

        let second = handle_answer(
            State(state),
            Json(AnswerRequest {
                interview_id: start.0.interview_id,
                answer: Some(answer.to_string()),
                end: false,
            }),
        )
        .await
        .unwrap();
        assert!(second.0.done);
        assert!(second.0.feedback_markdown.is_some());
        assert!(second
            .0
            .next_question
            .as_deref()
            .unwrap()
            .contains("concludes the interview"));
    }

    #[tokio::test]
    async fn test_answer_for_unknown_interview_is_not_found() {
        let state = test_state(ScriptedClient::with_responses(&[]));
        let result = handle_answer(
            State(state),
            Json(AnswerRequest {
                interview_id: Uuid::new_v4(),
                answer: Some("hello".to_string()),
                end: false,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
