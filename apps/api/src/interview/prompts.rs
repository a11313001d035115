//! All LLM prompt constants and builders for the interview loop.
//!
//! Templates use `{placeholder}` markers replaced before sending. The
//! one-question-per-turn and sentence-length rules live in prompt wording
//! only; the model output is treated as untrusted free text downstream.

use crate::interview::session::{InterviewStyle, QaPair};

/// Fixed opening question for every interview. Asked verbatim, no model call.
pub const INTRO_QUESTION: &str =
    "To begin, can you briefly introduce yourself and walk me through your background \
     and the experiences you feel are most relevant to this role?";

/// Interviewer system prompt. Replace `{role}`, `{experience}`, `{style}`,
/// `{resume_section}` before sending.
const SYSTEM_PROMPT_TEMPLATE: &str = "\
You are an intelligent but HUMAN-LIKE job interviewer for the role: {role}.
The candidate experience level is: {experience}.

Interviewer style: {style}.
- If style is 'Supportive', be friendly, encouraging, and add short positive reactions (\"that's great\", \"nice example\") before questions.
- If style is 'Strict', be concise, firm, and professional but not rude.
{resume_section}
Question strategy:
- Ask ONE question at a time.
- Keep each turn at most 2-3 sentences.
- Mix questions from three sources:
  1) The candidate's introduction and previous answers,
  2) Their resume and past projects (if available),
  3) Role-specific technical/behavioral questions for {role}.
- You can briefly acknowledge their last answer first (1 short sentence), then ask the next question.
- Do NOT give overall feedback during the interview. Feedback is only at the end.";

/// Appended to the system prompt only when a resume summary exists.
const RESUME_SECTION_TEMPLATE: &str = "
Here is a summary of the candidate's resume and key skills:
{resume_summary}

Use this to ask questions about their projects, responsibilities, tools and achievements.
";

/// User prompt right after the self-introduction (transcript length == 1).
/// Forces resume-grounded follow-ups when a resume summary is present.
const FIRST_ANSWER_PROMPT_TEMPLATE: &str = "\
Here is the candidate's self-introduction and first answer:

{history}

Resume summary (if provided):
{resume_summary}

As a human interviewer:
- Begin with one brief acknowledgement of their introduction (1 short sentence, e.g., \"Thanks for sharing that.\").
- THEN, if a resume summary is present, ask TWO targeted follow-up questions that explicitly reference items from the resume (project names, certifications, tools, or specific results).
  Example phrasings:
    \"Your resume says you worked on <project name> - can you describe your role and the main technical challenge?\"
    \"I see you used <tool/tech> on that project; which part did you implement and how did you measure success?\"
- If NO resume was provided, ask ONE role-relevant follow-up question instead.
Keep each question short (1-2 sentences). Do NOT provide feedback or extra commentary.";

/// User prompt when the last answer was short or hedged.
const FOLLOWUP_PROMPT_TEMPLATE: &str = "\
Here is the interview so far:

{history}

The candidate's last answer seems short or uncertain.

As a human interviewer:
- Start with a very brief reaction to their last answer (1 short sentence).
- Then ask ONE follow-up question that digs deeper into the SAME topic.
- If relevant, tie it to their resume or previous answers.
Total 1-2 sentences. No overall feedback.";

/// Default user prompt: acknowledge and advance to a fresh mixed-focus question.
const NEXT_QUESTION_PROMPT_TEMPLATE: &str = "\
Here is the interview so far:

{history}

Now, as a human interviewer for {role}:
- Start with a very brief acknowledgment of the last answer (1 short sentence).
- Then ask the NEXT interview question.
- Mix focus between:
  1) their resume / past projects (if you have resume summary),
  2) skills needed for {role},
  3) general behavioral questions (teamwork, challenges, learning, etc.).
Ask only ONE question this turn. Total 1-2 sentences. No overall feedback.";

/// Renders the transcript as readable `Qn:`/`An:` history for prompts.
pub fn history_text(transcript: &[QaPair]) -> String {
    transcript
        .iter()
        .enumerate()
        .map(|(i, pair)| format!("Q{n}: {q}\nA{n}: {a}", n = i + 1, q = pair.question, a = pair.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the interviewer system prompt. The resume-usage instruction is
/// included only when a summary exists.
pub fn build_system_prompt(
    role: &str,
    experience: &str,
    style: InterviewStyle,
    resume_summary: Option<&str>,
) -> String {
    let resume_section = match resume_summary {
        Some(summary) => RESUME_SECTION_TEMPLATE.replace("{resume_summary}", summary),
        None => "\n".to_string(),
    };

    SYSTEM_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{experience}", experience)
        .replace("{style}", style.as_str())
        .replace("{resume_section}", &resume_section)
}

/// Builds the user prompt for the next question, selecting one of three
/// templates: first-answer (transcript length 1), follow-up, or default.
/// The follow-up decision is made by the caller via the heuristic.
pub fn build_user_prompt(
    transcript: &[QaPair],
    role: &str,
    resume_summary: Option<&str>,
    followup: bool,
) -> String {
    let history = history_text(transcript);

    if transcript.len() == 1 {
        FIRST_ANSWER_PROMPT_TEMPLATE
            .replace("{history}", &history)
            .replace("{resume_summary}", resume_summary.unwrap_or("No resume provided."))
    } else if followup {
        FOLLOWUP_PROMPT_TEMPLATE.replace("{history}", &history)
    } else {
        NEXT_QUESTION_PROMPT_TEMPLATE
            .replace("{history}", &history)
            .replace("{role}", role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(q: &str, a: &str) -> QaPair {
        QaPair {
            question: q.to_string(),
            answer: a.to_string(),
        }
    }

    #[test]
    fn test_history_text_numbers_pairs_from_one() {
        let transcript = vec![pair("Tell me about yourself.", "I build APIs."), pair("Which stack?", "Mostly Rust.")];
        let history = history_text(&transcript);
        assert!(history.starts_with("Q1: Tell me about yourself.\nA1: I build APIs."));
        assert!(history.contains("Q2: Which stack?\nA2: Mostly Rust."));
    }

    #[test]
    fn test_history_text_empty_transcript_is_empty() {
        assert_eq!(history_text(&[]), "");
    }

    #[test]
    fn test_system_prompt_includes_resume_instruction_only_when_present() {
        let with = build_system_prompt(
            "Backend Engineer",
            "Mid",
            InterviewStyle::Strict,
            Some("- 5 years of Rust"),
        );
        assert!(with.contains("summary of the candidate's resume"));
        assert!(with.contains("- 5 years of Rust"));

        let without = build_system_prompt("Backend Engineer", "Mid", InterviewStyle::Strict, None);
        assert!(!without.contains("summary of the candidate's resume"));
        assert!(!without.contains("{resume_section}"));
    }

    #[test]
    fn test_system_prompt_interpolates_role_and_style() {
        let prompt =
            build_system_prompt("Data Engineer", "Senior", InterviewStyle::Supportive, None);
        assert!(prompt.contains("for the role: Data Engineer"));
        assert!(prompt.contains("experience level is: Senior"));
        assert!(prompt.contains("Interviewer style: Supportive."));
    }

    #[test]
    fn test_first_answer_template_selected_after_intro() {
        let transcript = vec![pair(INTRO_QUESTION, "I am a backend engineer.")];
        let prompt = build_user_prompt(&transcript, "Backend Engineer", Some("- Rust"), true);
        assert!(prompt.contains("self-introduction and first answer"));
        assert!(prompt.contains("- Rust"));
    }

    #[test]
    fn test_first_answer_template_without_resume_says_so() {
        let transcript = vec![pair(INTRO_QUESTION, "I am a backend engineer.")];
        let prompt = build_user_prompt(&transcript, "Backend Engineer", None, false);
        assert!(prompt.contains("No resume provided."));
    }

    #[test]
    fn test_followup_template_selected_when_flagged() {
        let transcript = vec![pair("Q", "A"), pair("Q2", "not sure")];
        let prompt = build_user_prompt(&transcript, "Backend Engineer", None, true);
        assert!(prompt.contains("seems short or uncertain"));
        assert!(prompt.contains("SAME topic"));
    }

    #[test]
    fn test_default_template_selected_otherwise() {
        let transcript = vec![pair("Q", "A"), pair("Q2", "a long substantive answer")];
        let prompt = build_user_prompt(&transcript, "Platform Engineer", None, false);
        assert!(prompt.contains("ask the NEXT interview question"));
        assert!(prompt.contains("skills needed for Platform Engineer"));
    }
}
