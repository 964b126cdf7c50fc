use crate::llm::prompts;
use crate::profile::Profile;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// One-shot "future direction" question about a single project.
///
/// Inputs are interpolated as given; empty strings are not rejected.
pub fn insight_prompt(subject_title: &str, subject_tools: &str) -> PromptPair {
    let user = format!(
        "Suggest a future technical direction for the project: \"{subject_title}\" which uses {subject_tools}."
    );

    PromptPair {
        system: prompts::INSIGHT_ADVISOR.to_owned(),
        user,
    }
}

/// System instruction for one chat turn, rebuilt from the profile every time.
pub fn chat_system_instruction(profile: &Profile) -> String {
    let context = format!(
        "Name: {name}\n\
         Role: {headline}\n\
         Summary: {career}\n\
         Skills: {skills}",
        name = profile.name,
        headline = profile.headline,
        career = profile.career_summary(),
        skills = profile.flat_skills(),
    );

    format!(
        "You are the Digital Twin of {name}. Answer questions based on this profile: {context}. {closing}",
        name = profile.name,
        closing = prompts::CHAT_CLOSING,
    )
}

/// Opening assistant message of every chat transcript.
pub fn chat_greeting(profile: &Profile) -> String {
    let first_name = profile.name.split_whitespace().next().unwrap_or(profile.name);
    format!(
        "Hello. I'm {first_name}'s Digital Assistant. How can I help you understand {first_name}'s work?"
    )
}
