//! Follow-up heuristic — decides whether the last answer warrants digging
//! deeper into the same topic instead of moving on.
//!
//! Pure and deterministic: no model call, so the state machine's branching
//! is testable without a network dependency.

/// Answers shorter than this many words are treated as thin.
const MIN_SUBSTANTIVE_WORDS: usize = 15;

/// Hedge phrases that signal an uncertain answer, matched on the lowercased text.
const HEDGE_PHRASES: &[&str] = &["don't know", "not sure", "no idea", "can't say"];

/// Returns true when the answer is short or hedged and the interviewer should
/// ask a follow-up on the same topic rather than advance.
pub fn needs_followup(answer: &str) -> bool {
    if answer.split_whitespace().count() < MIN_SUBSTANTIVE_WORDS {
        return true;
    }
    let lowered = answer.to_lowercase();
    HEDGE_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}
