//! Decimal addition reflection prompt.
//!
//! The model grades a student's reflection on a column addition problem and
//! answers with a leading `1` (correct) or `0` (incorrect) followed by feedback.

use crate::fields::AddingParams;
use crate::prompt::{renumber_after_drop, Slots, Template, NO_MISCONCEPTION};
use crate::state::ChatMessage;

pub const DEFAULT_PROMPT_HEAD: &str = "You are a tutor checking a middle school student's \
reflection on adding decimals. You will get JSON data describing the problem, the carries \
and answer digits the student entered, the reflection question and the student's answer. \
Start your reply with 1 if the reflection shows the student understands the regrouping, \
otherwise 0. Then write feedback that:\n\
1) Is one or two sentences long\n\
2) Uses simple, encouraging language\n";

pub const DEFAULT_PROMPT_TAIL: &str = "4) Asks a guiding question when the reflection is wrong\n\
5) Never gives away the answer";

const MISCONCEPTION_LABEL: u32 = 3;
/// Numbered items after the misconception item in the tail text
const TRAILING_ITEMS: u32 = 2;

const PROBLEM_STATE_TEMPLATE: &str = "Here is some JSON data: {number1: {number1}, \
number2: {number2}, carry: [{carry}], ans: [{ans}], reflection_questions: \
{reflection_questions}, student_answers: {student_answers}}";

const PROBLEM_STATE_SLOTS: [&str; 6] = [
    "number1",
    "number2",
    "carry",
    "ans",
    "reflection_questions",
    "student_answers",
];

pub fn has_misconception(params: &AddingParams) -> bool {
    params.misconception != NO_MISCONCEPTION
}

pub fn system_prompt(params: &AddingParams) -> String {
    let head = params.prompt_head.as_deref().unwrap_or(DEFAULT_PROMPT_HEAD);
    let tail = params.prompt_tail.as_deref().unwrap_or(DEFAULT_PROMPT_TAIL);

    let (clause, tail) = if has_misconception(params) {
        (
            format!(
                "{}) Addresses their misconception that {}",
                MISCONCEPTION_LABEL, params.misconception
            ),
            tail.to_string(),
        )
    } else {
        (
            String::new(),
            renumber_after_drop(tail, MISCONCEPTION_LABEL, TRAILING_ITEMS),
        )
    };

    let slots: Slots = [
        ("head".to_string(), head.to_string()),
        ("misconception_clause".to_string(), clause),
        ("tail".to_string(), tail),
    ]
    .into_iter()
    .collect();

    Template::parse("{head}{misconception_clause}{tail}").render(&slots)
}

/// Worked examples shown to the model before the real problem
pub fn few_shot_examples() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user(
            "Here is some JSON data: {number1: 2.54, number2: 5.49, carry: [0, 1, 1, 0], \
ans: [0, 8, 0, 3], reflection_question: \"How did you add the hundredths columns when \
their sum was more than 10?\", student_response: \"I carried the 1 from the 13 to the \
next column and put the 3 in that column.\"}",
        ),
        ChatMessage::assistant("1Great job! Looks like you got how to add decimals really well!."),
        ChatMessage::user(
            "Here is some JSON data: {number1: 2.54, number2: 5.49, carry: [0, 1, 1, 0], \
ans: [0, 8, 0, 3], reflection_question: \"How did you add the hundredths columns when \
their sum was more than 10?\", student_response: \"They add to 13 so the 13 just \
becomes 3 for that column.\"}",
        ),
        ChatMessage::assistant(
            "0You're right that the 3 is then put in the hundredths column, but what about \
the 10? Try again with this in mind.",
        ),
    ]
}

pub fn problem_state_message(params: &AddingParams) -> ChatMessage {
    let slots: Slots = PROBLEM_STATE_SLOTS
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let value = params.problem_state.get(i).cloned().unwrap_or_default();
            (slot.to_string(), value)
        })
        .collect();

    ChatMessage::user(Template::parse(PROBLEM_STATE_TEMPLATE).render(&slots))
}

/// System message, the worked examples, then the problem on the page.
pub fn construct_prompt(params: &AddingParams) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(system_prompt(params))];
    messages.extend(few_shot_examples());
    messages.push(problem_state_message(params));
    messages
}
