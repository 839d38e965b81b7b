//! Reading parameters from the page and writing results back to it.
//!
//! The page is whatever surface hosts the form: a browser bridge, the CLI's
//! JSON page file, or a test double. Flows only talk to it through
//! [`FieldReader`] and [`Page`], and always read at send time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::render::{HistoryRow, HistoryTable};

pub const MODEL_SELECT: &str = "model-select";
pub const PROMPT_INPUT: &str = "prompt-input";
pub const MATH_PROBLEM: &str = "mathProblem";
pub const MATH_PROBLEM_ANSWER: &str = "mathProblemAnswer";
pub const RECENT_GUESS: &str = "recentGuess";
pub const RECENT_INCORRECT_GUESS: &str = "recentIncorrectGuess";
pub const SKILLS: &str = "skills";
pub const MISCONCEPTIONS: &str = "misconceptions";
pub const CUSTOM_SAMPLE: &str = "custom-sample";
pub const DESCRIPTION: &str = "description";
pub const USE_RAG: &str = "useRag";

/// Repeated elements, read in document order
pub const USER_PROMPTS: &str = "userPrompt";
pub const RESPONSES: &str = "response";
pub const PROBLEM_STATE_INPUTS: &str = "problemStatePrompt";

/// Read-only access to the live form.
pub trait FieldReader {
    /// Current value of a single field. Missing fields read as an empty string.
    fn read(&self, id: &str) -> String;

    /// Current values of every element in a repeated group, in order.
    fn read_all(&self, group: &str) -> Vec<String>;

    fn read_checked(&self, id: &str) -> bool {
        matches!(
            self.read(id).trim().to_lowercase().as_str(),
            "true" | "on" | "checked" | "yes" | "1"
        )
    }

    /// Field value, or `fallback` when the field is missing or blank.
    fn read_or(&self, id: &str, fallback: &str) -> String {
        let value = self.read(id);
        if value.trim().is_empty() {
            fallback.to_string()
        } else {
            value
        }
    }
}

/// Write side of the page: the regions a flow renders into.
pub trait Page: FieldReader {
    fn set_field(&mut self, id: &str, value: &str);

    /// Replace the inline response/status text.
    fn set_response_text(&mut self, text: &str);

    /// Put `text` into the first element of `group` that is still blank.
    /// Returns false when every element is already filled.
    fn fill_first_empty(&mut self, group: &str, text: &str) -> bool;

    fn append_history_row(&mut self, row: HistoryRow);

    /// Replace the results region with `html` and make it visible.
    fn show_results(&mut self, html: String);

    fn hide_results(&mut self);
}

/// A page held entirely in memory. The CLI loads and saves it as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryPage {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub response_text: String,
    #[serde(default)]
    pub history: HistoryTable,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub results_visible: bool,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, id: &str, value: &str) -> Self {
        self.fields.insert(id.to_string(), value.to_string());
        self
    }

    pub fn with_group<S: AsRef<str>>(mut self, group: &str, values: &[S]) -> Self {
        self.groups.insert(
            group.to_string(),
            values.iter().map(|v| v.as_ref().to_string()).collect(),
        );
        self
    }

    pub fn push_to_group(&mut self, group: &str, value: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .push(value.to_string());
    }
}

impl FieldReader for MemoryPage {
    fn read(&self, id: &str) -> String {
        self.fields.get(id).cloned().unwrap_or_default()
    }

    fn read_all(&self, group: &str) -> Vec<String> {
        self.groups.get(group).cloned().unwrap_or_default()
    }
}

impl Page for MemoryPage {
    fn set_field(&mut self, id: &str, value: &str) {
        self.fields.insert(id.to_string(), value.to_string());
    }

    fn set_response_text(&mut self, text: &str) {
        self.response_text = text.to_string();
    }

    fn fill_first_empty(&mut self, group: &str, text: &str) -> bool {
        let slot = self
            .groups
            .get_mut(group)
            .and_then(|values| values.iter_mut().find(|v| v.trim().is_empty()));

        match slot {
            Some(slot) => {
                *slot = text.to_string();
                true
            }
            None => false,
        }
    }

    fn append_history_row(&mut self, row: HistoryRow) {
        self.history.append(row);
    }

    fn show_results(&mut self, html: String) {
        self.results = Some(html);
        self.results_visible = true;
    }

    fn hide_results(&mut self) {
        self.results_visible = false;
    }
}

/// Snapshot of the custom-prompt page
#[derive(Debug, Clone, PartialEq)]
pub struct CustomParams {
    pub model: String,
    pub prompt: String,
}

impl CustomParams {
    pub fn collect(reader: &impl FieldReader, default_model: &str) -> Self {
        Self {
            model: reader.read_or(MODEL_SELECT, default_model),
            prompt: reader.read(PROMPT_INPUT),
        }
    }
}

/// Snapshot of the socratic dialogue page
#[derive(Debug, Clone, PartialEq)]
pub struct SocraticParams {
    pub model: String,
    pub math_problem: String,
    pub math_problem_answer: String,
    pub correct_first_time: bool,
    pub recent_incorrect_guess: String,
    pub skills: String,
    pub misconceptions: String,
    /// Static prompt text overridden on the page, keyed by template slot
    pub static_text: BTreeMap<String, String>,
    pub user_prompts: Vec<String>,
    pub responses: Vec<String>,
}

impl SocraticParams {
    pub fn collect(reader: &impl FieldReader, default_model: &str) -> Self {
        let static_text = crate::prompt::socratic::STATIC_SLOTS
            .iter()
            .filter_map(|(slot, _)| {
                let value = reader.read(&format!("static-{}", slot.replace('_', "-")));
                (!value.is_empty()).then(|| (slot.to_string(), value))
            })
            .collect();

        Self {
            model: reader.read_or(MODEL_SELECT, default_model),
            math_problem: reader.read(MATH_PROBLEM),
            math_problem_answer: reader.read(MATH_PROBLEM_ANSWER),
            correct_first_time: reader.read(RECENT_GUESS) == "correct",
            recent_incorrect_guess: reader.read(RECENT_INCORRECT_GUESS),
            skills: reader.read(SKILLS),
            misconceptions: reader.read(MISCONCEPTIONS),
            static_text,
            user_prompts: reader.read_all(USER_PROMPTS),
            responses: reader.read_all(RESPONSES),
        }
    }
}

/// Snapshot of the decimal addition reflection page
#[derive(Debug, Clone, PartialEq)]
pub struct AddingParams {
    pub model: String,
    pub misconception: String,
    pub prompt_head: Option<String>,
    pub prompt_tail: Option<String>,
    pub problem_state: Vec<String>,
}

impl AddingParams {
    pub fn collect(reader: &impl FieldReader, default_model: &str) -> Self {
        let selected = reader.read(MISCONCEPTIONS);
        let misconception = match selected.as_str() {
            "" => crate::prompt::NO_MISCONCEPTION.to_string(),
            "Custom" => reader.read(CUSTOM_SAMPLE),
            _ => selected,
        };
        let non_empty = |id: &str| Some(reader.read(id)).filter(|v| !v.is_empty());

        Self {
            model: reader.read_or(MODEL_SELECT, default_model),
            misconception,
            prompt_head: non_empty("main-prompt-head"),
            prompt_tail: non_empty("main-prompt-tail"),
            problem_state: reader
                .read_all(PROBLEM_STATE_INPUTS)
                .into_iter()
                .map(|v| v.trim().to_string())
                .collect(),
        }
    }
}

/// Snapshot of the interface generation form
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceParams {
    pub description: String,
    pub model: String,
    pub use_rag: bool,
}

impl InterfaceParams {
    pub fn collect(reader: &impl FieldReader) -> Self {
        Self {
            description: reader.read(DESCRIPTION).trim().to_string(),
            model: reader.read(MODEL_SELECT),
            use_rag: reader.read_checked(USE_RAG),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.description.is_empty() && !self.model.is_empty()
    }
}
