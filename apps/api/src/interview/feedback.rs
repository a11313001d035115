//! Feedback synthesizer — one completion call at termination that turns the
//! full transcript into a structured plain-text evaluation.
//!
//! This is the one path with a local-recovery guarantee: the interview must
//! be able to report a closing state even when the completion service is
//! down, so failures degrade to an inline error string instead of surfacing.

use crate::interview::prompts::history_text;
use crate::interview::session::InterviewSession;
use crate::llm_client::{ChatMessage, CompletionClient};

const FEEDBACK_TEMPERATURE: f32 = 0.4;

/// Replace `{candidate_name}`, `{role}`, `{experience}`, `{style}`,
/// `{resume_summary}` before sending.
const FEEDBACK_SYSTEM_TEMPLATE: &str = "\
You are a REAL human interviewer wrapping up a professional job interview.
Your tone must be natural, concise, human-like, and role-appropriate.

HARD BANNED PHRASES (DO NOT USE EVER):
- \"This will help me understand...\"
- \"This might help me understand...\"
- \"This helps us evaluate...\"
- \"Let's explore that together...\"
- \"I want to know...\"
- \"This will give me insight...\"
- \"This might help...\"
- \"Let's break it down...\"

If you accidentally produce a sentence that resembles ANY of these patterns,
IMMEDIATELY rewrite the line in a clean, human way WITHOUT explaining anything.

CANDIDATE DETAILS:
- Name: {candidate_name}
- Role: {role}
- Experience: {experience}
- Style: {style}
- Resume: {resume_summary}

GREETING:
- Start with a simple greeting using the candidate's name (if available).

TONE RULES:
- Supportive: warm, encouraging, light fillers (Alright, Got it, Sounds good)
- Strict: crisp, minimal fillers, professional, firm

Never justify your evaluation process and never use teacher-like, mentor-like,
or coach-like phrasing. Your ONLY task is to generate POST-INTERVIEW FEEDBACK.
Return plain text with emoji headers exactly as requested.";

/// Replace `{history}` and `{resume_part}` before sending.
const FEEDBACK_PROMPT_TEMPLATE: &str = "\
Here is the full interview transcript (questions and candidate answers):

{history}
{resume_part}
Now provide feedback in plain text with CLEAR emoji section headers.
Follow exactly this structure and DO NOT add extra sections:

\u{1F3AF} Overall Summary:
(one short paragraph about how the candidate did in general)

\u{1F5E3}\u{FE0F} Communication Skills (rate out of 10):
(one short paragraph, include a rating like \"7/10\" and why)

\u{1F4BB} Technical / Role Knowledge (rate out of 10):
(one short paragraph, include a rating and mention strengths/weaknesses)

\u{1F9E9} Structure & Clarity of Answers (rate out of 10):
(one short paragraph on how well they structure answers, include rating)

\u{1F4CC} Use of Resume / Past Experience:
(one short paragraph about how well they connect their background to the role)

\u{1F680} Top Suggestions to Improve:
Write 3-5 bullet points, each starting with \"\u{2022} \".
Each point should be a specific, practical suggestion.

Remember:
- No markdown (#, *, -) and no numbered lists like \"1)\".
- Use exactly these emoji section headers.";

fn build_system_prompt(session: &InterviewSession) -> String {
    FEEDBACK_SYSTEM_TEMPLATE
        .replace("{candidate_name}", session.candidate_name.as_deref().unwrap_or(""))
        .replace("{role}", &session.role)
        .replace("{experience}", &session.experience)
        .replace("{style}", session.style.as_str())
        .replace("{resume_summary}", session.resume_summary.as_deref().unwrap_or(""))
}

fn build_user_prompt(session: &InterviewSession) -> String {
    let resume_part = match session.resume_summary.as_deref() {
        Some(summary) => format!(
            "\nHere is a summary of the candidate's resume and key skills:\n{summary}\n"
        ),
        None => String::new(),
    };

    FEEDBACK_PROMPT_TEMPLATE
        .replace("{history}", &history_text(&session.transcript))
        .replace("{resume_part}", &resume_part)
}

/// Generates the closing evaluation from the full transcript.
///
/// Never returns an error: a transport failure yields a readable
/// "Feedback generation failed: ..." string and an empty model response
/// yields a fixed fallback, so session termination always completes.
pub async fn synthesize_feedback(llm: &dyn CompletionClient, session: &InterviewSession) -> String {
    let messages = vec![
        ChatMessage::system(build_system_prompt(session)),
        ChatMessage::user(build_user_prompt(session)),
    ];

    match llm.complete(&messages, FEEDBACK_TEMPERATURE).await {
        Ok(text) if text.trim().is_empty() => "No feedback generated by model.".to_string(),
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Feedback generation failed: {e}");
            format!("Feedback generation failed: {e}")
        }
    }
}
