//! Prompt construction: named-slot templates and the per-page builders.

pub mod adding;
pub mod socratic;

use std::collections::BTreeMap;

/// Dropdown value meaning the student has no misconception to address
pub const NO_MISCONCEPTION: &str = "No Misconception";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Slot(String),
}

/// A text template with `{slot}` placeholders.
///
/// Slot names are ASCII letters, digits and underscores. Any other brace is
/// kept as literal text, so JSON-looking prompt text passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<Part>,
}

/// Values for a template, keyed by slot name
pub type Slots = BTreeMap<String, String>;

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let slot_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());

            if slot_len > 0 && after[slot_len..].starts_with('}') {
                text.push_str(&rest[..open]);
                if !text.is_empty() {
                    parts.push(Part::Text(std::mem::take(&mut text)));
                }
                parts.push(Part::Slot(after[..slot_len].to_string()));
                rest = &after[slot_len + 1..];
            } else {
                text.push_str(&rest[..=open]);
                rest = after;
            }
        }

        text.push_str(rest);
        if !text.is_empty() {
            parts.push(Part::Text(text));
        }

        Self { parts }
    }

    /// Fill every slot. Slots without a value render as nothing.
    pub fn render(&self, values: &Slots) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => text.as_str(),
                Part::Slot(name) => values.get(name).map(String::as_str).unwrap_or(""),
            })
            .collect()
    }
}

/// Shift numbered list labels down by one after item `dropped` was removed.
///
/// Rewrites the first occurrence of each of the `count` labels that followed
/// the dropped item, lowest first: with `dropped = 3, count = 2`, `4)` becomes
/// `3)` and then `5)` becomes `4)`. Labels further down are left alone, as are
/// later repeats of the same label.
pub fn renumber_after_drop(text: &str, dropped: u32, count: u32) -> String {
    let mut out = text.to_string();
    for n in (dropped + 1)..=(dropped + count) {
        out = out.replacen(&format!("{})", n), &format!("{})", n - 1), 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, &str)]) -> Slots {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_template_fills_named_slots() {
        let template = Template::parse("Solve {problem} then explain {problem}.");
        let rendered = template.render(&slots(&[("problem", "0.4 + 0.8")]));
        assert_eq!(rendered, "Solve 0.4 + 0.8 then explain 0.4 + 0.8.");
    }

    #[test]
    fn test_template_missing_slot_is_empty() {
        let template = Template::parse("[{a}|{b}]");
        assert_eq!(template.render(&slots(&[("b", "x")])), "[|x]");
        assert_eq!(
            template,
            Template {
                parts: vec![
                    Part::Text("[".into()),
                    Part::Slot("a".into()),
                    Part::Text("|".into()),
                    Part::Slot("b".into()),
                    Part::Text("]".into()),
                ]
            }
        );
    }

    #[test]
    fn test_template_keeps_literal_braces() {
        let template = Template::parse("{number1: 2.54, carry: [{c}]} {} {");
        let rendered = template.render(&slots(&[("c", "0, 1")]));
        assert_eq!(rendered, "{number1: 2.54, carry: [0, 1]} {} {");
    }

    #[test]
    fn test_renumber_two_trailing_items() {
        let tail = "\n4) Asks a guiding question\n5) Never gives the answer";
        assert_eq!(
            renumber_after_drop(tail, 3, 2),
            "\n3) Asks a guiding question\n4) Never gives the answer"
        );
    }

    #[test]
    fn test_renumber_leaves_other_labels() {
        let tail = "4) one\n5) two\n6) three";
        assert_eq!(renumber_after_drop(tail, 3, 2), "3) one\n4) two\n6) three");
    }
}
