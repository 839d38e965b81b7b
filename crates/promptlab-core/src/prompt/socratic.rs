//! Socratic dialogue prompt: one system message describing the student,
//! followed by the dialogue so far as shown on the page.

use crate::fields::SocraticParams;
use crate::prompt::{Slots, Template};
use crate::state::{build_conversation, ChatMessage};

const SYSTEM_TEMPLATE: &str = "{intro}{finished}{math_problem}{answered}{math_problem_answer}.\
{guess_history}.{recent_incorrect_guess}.\
{skills_intro}{skills}.\
{misconceptions_intro}{misconceptions}\
{question_instructions}{follow_up_instructions}{audience}";

/// Static text slots and their default wording. A page may override any of
/// them with a `static-<slot>` field (underscores become dashes).
pub const STATIC_SLOTS: &[(&str, &str)] = &[
    (
        "intro",
        "Can you engage me in a socratic dialogue, assuming the following: ",
    ),
    ("finished", "I just finished the "),
    ("answered", " problem by correctly answering "),
    ("skills_intro", " My level of skills is as follows: "),
    (
        "misconceptions_intro",
        " The misconceptions I have shown while learning are, ",
    ),
    (
        "question_instructions",
        ". Taking my level of skills and prior misconceptions into account, ask a \
conceptual or procedural question -- wait for my answer before asking the next one. ",
    ),
    (
        "follow_up_instructions",
        "If the student answers with an incorrect number or something even vaguely \
related to decimal numbers, ask a follow-up question about the misconception behind \
it instead of giving the answer. ",
    ),
    (
        "audience",
        "This is a middle school student so keep the language simple.",
    ),
];

pub fn guess_history(params: &SocraticParams) -> String {
    if params.correct_first_time {
        "I got it right the first time".to_string()
    } else {
        format!(
            "Before getting it correct, I made the erroneous {}",
            params.recent_incorrect_guess
        )
    }
}

pub fn system_prompt(params: &SocraticParams) -> String {
    let mut slots: Slots = STATIC_SLOTS
        .iter()
        .map(|(slot, default)| {
            let text = params
                .static_text
                .get(*slot)
                .cloned()
                .unwrap_or_else(|| default.to_string());
            (slot.to_string(), text)
        })
        .collect();

    slots.insert("math_problem".into(), params.math_problem.clone());
    slots.insert(
        "math_problem_answer".into(),
        params.math_problem_answer.clone(),
    );
    slots.insert("guess_history".into(), guess_history(params));
    slots.insert(
        "recent_incorrect_guess".into(),
        params.recent_incorrect_guess.clone(),
    );
    slots.insert("skills".into(), params.skills.clone());
    slots.insert("misconceptions".into(), params.misconceptions.clone());

    Template::parse(SYSTEM_TEMPLATE).render(&slots)
}

/// System message followed by the reconstructed dialogue.
pub fn construct_prompt(params: &SocraticParams) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(system_prompt(params))];
    messages.extend(build_conversation(&params.user_prompts, &params.responses));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{self, MemoryPage};
    use crate::state::ChatRole;

    fn page() -> MemoryPage {
        MemoryPage::new()
            .with_field(fields::MATH_PROBLEM, "sequence problem 0.0, 0.4, 0.8")
            .with_field(fields::MATH_PROBLEM_ANSWER, "1.2")
            .with_field(fields::RECENT_GUESS, "incorrect")
            .with_field(fields::RECENT_INCORRECT_GUESS, "sequence 0.0, 0.4, 0.8, 0.12")
            .with_field(fields::SKILLS, "poor in sorting decimals")
            .with_field(fields::MISCONCEPTIONS, "5 times 'longer decimals are larger'")
    }

    #[test]
    fn test_system_prompt_interpolates_parameters() {
        let params = SocraticParams::collect(&page(), "gpt-4o-mini");
        let prompt = system_prompt(&params);

        assert!(prompt.starts_with("Can you engage me in a socratic dialogue"));
        assert!(prompt.contains("I just finished the sequence problem 0.0, 0.4, 0.8 problem"));
        assert!(prompt.contains(
            "Before getting it correct, I made the erroneous sequence 0.0, 0.4, 0.8, 0.12."
        ));
        assert!(prompt.contains("My level of skills is as follows: poor in sorting decimals."));
        assert!(prompt.ends_with("keep the language simple."));
    }

    #[test]
    fn test_correct_first_time_clause() {
        let page = page().with_field(fields::RECENT_GUESS, "correct");
        let params = SocraticParams::collect(&page, "gpt-4o-mini");
        assert!(system_prompt(&params).contains("I got it right the first time."));
    }

    #[test]
    fn test_static_override_replaces_default() {
        let page = page().with_field("static-audience", "Use short sentences.");
        let params = SocraticParams::collect(&page, "gpt-4o-mini");
        let prompt = system_prompt(&params);
        assert!(prompt.ends_with("Use short sentences."));
        assert!(!prompt.contains("middle school"));
    }

    #[test]
    fn test_construct_prompt_appends_dialogue() {
        let page = page()
            .with_group(fields::USER_PROMPTS, &["0.12", ""])
            .with_group(fields::RESPONSES, &["Which is bigger, 0.8 or 0.12?"]);
        let params = SocraticParams::collect(&page, "gpt-4o-mini");
        let messages = construct_prompt(&params);

        let roles: Vec<ChatRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::System, ChatRole::Assistant, ChatRole::User]
        );
        assert_eq!(messages[2].content, "0.12");
    }

    #[test]
    fn test_missing_fields_still_build() {
        let params = SocraticParams::collect(&MemoryPage::new(), "gpt-4o-mini");
        let messages = construct_prompt(&params);
        assert_eq!(messages.len(), 1);
        assert!(!messages[0].content.is_empty());
    }
}
