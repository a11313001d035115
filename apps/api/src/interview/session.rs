//! Interview session store and state machine.
//!
//! Sessions live in an explicit store injected via `AppState`, never in
//! ambient module state. The store maps id → `Arc<Mutex<InterviewSession>>`: the
//! per-session lock is held for the full duration of a submit call, including
//! the outbound completion call, so concurrent submissions against the same
//! id serialize instead of racing on the transcript and done flag.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::feedback;
use crate::interview::heuristics::needs_followup;
use crate::interview::prompts::{build_system_prompt, build_user_prompt, INTRO_QUESTION};
use crate::interview::resume::summarize_resume;
use crate::llm_client::{ChatMessage, CompletionClient};

const QUESTION_TEMPERATURE: f32 = 0.7;

/// Fixed response for submissions against an already-finished interview.
const ALREADY_FINISHED: &str = "Interview already finished.";

/// Interviewer interaction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStyle {
    Supportive,
    Strict,
}

impl InterviewStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStyle::Supportive => "Supportive",
            InterviewStyle::Strict => "Strict",
        }
    }
}

/// One asked-question/given-answer pair. The transcript is append-only.
#[derive(Debug, Clone)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// State of one simulated interview.
///
/// Two states: awaiting an answer (`current_question` set, `done` false) and
/// terminal (`done` true, `current_question` cleared). The done flag is
/// monotonic; nothing mutates a finished session.
#[derive(Debug)]
pub struct InterviewSession {
    pub role: String,
    pub experience: String,
    pub style: InterviewStyle,
    /// None means unbounded: only an explicit end terminates the interview.
    pub max_questions: Option<usize>,
    pub transcript: Vec<QaPair>,
    pub current_question: Option<String>,
    pub done: bool,
    /// Produced once at session start, immutable thereafter.
    pub resume_summary: Option<String>,
    /// Never populated by any code path; the closing message includes it only
    /// when present. Kept rather than wired to a guessed extraction step.
    pub candidate_name: Option<String>,
    pub last_activity: DateTime<Utc>,
}

/// In-memory session store. Constructed at process start and carried in
/// `AppState`; the idle sweeper calls `evict_idle` periodically.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, session: InterviewSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<InterviewSession>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session. Operational reset; nothing in the request path calls it.
    #[allow(dead_code)]
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Removes sessions whose last activity is older than `max_idle`.
    /// Sessions currently mid-submit hold their lock and are skipped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => guard.last_activity >= cutoff,
            Err(_) => true, // in use right now, not idle
        });
        before - sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs for starting an interview, already deserialized from the wire.
#[derive(Debug)]
pub struct StartParams {
    pub role: String,
    pub custom_role: Option<String>,
    pub experience: String,
    pub style: InterviewStyle,
    /// 0 or omitted means unbounded.
    pub max_questions: Option<u32>,
    pub resume_text: Option<String>,
}

/// Result of one answer submission.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub done: bool,
    pub next_question: Option<String>,
    pub feedback: Option<String>,
}

/// Resolves the effective role name: `"Custom"` plus a non-empty custom value
/// yields the trimmed custom value.
fn resolve_role(role: &str, custom_role: Option<&str>) -> String {
    if role == "Custom" {
        if let Some(custom) = custom_role.map(str::trim).filter(|c| !c.is_empty()) {
            return custom.to_string();
        }
    }
    role.to_string()
}

fn closing_message(candidate_name: Option<&str>) -> String {
    match candidate_name {
        Some(name) => format!("Thank you for your time, {name}. This concludes the interview."),
        None => "Thank you for your time. This concludes the interview.".to_string(),
    }
}

/// Creates a new session and returns its id plus the fixed opening question.
///
/// When resume text is supplied it is summarized with one completion call
/// before the session exists; a transport failure here aborts the start.
pub async fn start_interview(
    store: &SessionStore,
    llm: &dyn CompletionClient,
    params: StartParams,
) -> Result<(Uuid, String), AppError> {
    let role = resolve_role(&params.role, params.custom_role.as_deref());

    let resume_summary = match params.resume_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(summarize_resume(llm, text).await?),
        _ => None,
    };

    let max_questions = match params.max_questions {
        Some(0) | None => None,
        Some(n) => Some(n as usize),
    };

    let session = InterviewSession {
        role,
        experience: params.experience,
        style: params.style,
        max_questions,
        transcript: Vec::new(),
        current_question: Some(INTRO_QUESTION.to_string()),
        done: false,
        resume_summary,
        candidate_name: None,
        last_activity: Utc::now(),
    };

    let id = store.insert(session).await;
    tracing::info!(interview_id = %id, "Interview started");

    Ok((id, INTRO_QUESTION.to_string()))
}

/// Records an answer and advances the state machine: either the next question
/// (via the completion client) or, on termination, the closing message plus
/// synthesized feedback.
///
/// Feedback synthesis never fails the call: a dead completion service at
/// termination degrades to an inline error string. Question generation has no
/// such guarantee and surfaces the error.
pub async fn submit_answer(
    store: &SessionStore,
    llm: &dyn CompletionClient,
    interview_id: Uuid,
    answer: Option<&str>,
    end: bool,
) -> Result<SubmitOutcome, AppError> {
    let session = store
        .get(interview_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    // One submission at a time per session, held across the completion call.
    let mut session = session.lock().await;

    if session.done {
        return Ok(SubmitOutcome {
            done: true,
            next_question: None,
            feedback: Some(ALREADY_FINISHED.to_string()),
        });
    }

    session.last_activity = Utc::now();

    let answer = answer.map(str::trim).filter(|a| !a.is_empty());
    if let (Some(answer), Some(question)) = (answer, session.current_question.clone()) {
        session.transcript.push(QaPair {
            question,
            answer: answer.to_string(),
        });
    }

    let reached_cap = session
        .max_questions
        .is_some_and(|max| session.transcript.len() >= max);

    if end || reached_cap {
        let feedback = feedback::synthesize_feedback(llm, &session).await;
        let closing = closing_message(session.candidate_name.as_deref());

        session.done = true;
        session.current_question = None;
        tracing::info!(interview_id = %interview_id, questions = session.transcript.len(), "Interview finished");

        return Ok(SubmitOutcome {
            done: true,
            next_question: Some(closing),
            feedback: Some(feedback),
        });
    }

    let last_answer = session
        .transcript
        .last()
        .map(|pair| pair.answer.as_str())
        .unwrap_or("");
    let followup = needs_followup(last_answer);

    let system = build_system_prompt(
        &session.role,
        &session.experience,
        session.style,
        session.resume_summary.as_deref(),
    );
    let user = build_user_prompt(
        &session.transcript,
        &session.role,
        session.resume_summary.as_deref(),
        followup,
    );
    let messages = vec![ChatMessage::system(system), ChatMessage::user(user)];

    let next_question = llm.complete(&messages, QUESTION_TEMPERATURE).await?;
    session.current_question = Some(next_question.clone());

    Ok(SubmitOutcome {
        done: false,
        next_question: Some(next_question),
        feedback: None,
    })
}
