// Interview engine: session store + state machine, prompt templating,
// follow-up heuristic, feedback synthesis, resume summarization.
// All LLM calls go through llm_client — no direct Groq calls here.

pub mod feedback;
pub mod handlers;
pub mod heuristics;
pub mod prompts;
pub mod resume;
pub mod session;
