//! Prompt strings and assembly for completion calls.
//!
//! The defaults below are what the assistant ships with; each one can be
//! overridden through the environment (see [`crate::config`]). Assembly is
//! kept in pure functions so the exact text sent upstream is testable.

/// System prompt for conversational chat.
pub const DEFAULT_CHAT_PROMPT: &str =
    "You are a helpful AI assistant for a construction project management system.";

/// System prompt for plan generation.
pub const DEFAULT_PLANNER_PROMPT: &str =
    "You are a helpful assistant that structures projects.";

/// Instruction the project goal is appended to when generating a plan.
pub const DEFAULT_PLANNER_INSTRUCTION: &str = "You are an expert construction project \
consultant in Dubai. Break down the project goal into phases, give suggestions, \
timelines, and warnings.";

/// System prompt for weekly-update analysis.
pub const DEFAULT_ANALYST_PROMPT: &str = "You are a smart project analyst.";

/// Instruction the weekly update text is appended to.
pub const DEFAULT_ANALYST_INSTRUCTION: &str =
    "Analyze this weekly update and return needs, issues, and progress:";

/// Build the user prompt for plan generation.
///
/// The goal is embedded after the instruction; a phase cap, when given,
/// becomes an explicit limiting sentence.
#[must_use]
pub fn plan_request(instruction: &str, goal: &str, num_phases: Option<u32>) -> String {
    let mut prompt = format!("{instruction}\n\nProject goal: {goal}");
    if let Some(limit) = num_phases {
        prompt.push_str(&format!(" Limit to {limit} phases."));
    }
    prompt
}

/// Build the user prompt for weekly-update analysis.
#[must_use]
pub fn weekly_summary_request(instruction: &str, update_text: &str) -> String {
    format!("{instruction}\n{update_text}")
}
