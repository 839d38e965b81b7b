//! UI-agnostic conversation types
//!
//! Messages are rebuilt from whatever the page currently shows on every send.
//! Nothing here is stored between requests.

use serde::{Deserialize, Serialize};

/// A chat message in the prompt sent to a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Interleave prior user inputs and rendered responses into dialogue order.
///
/// For each index the response (if any) comes before the input, matching how
/// the page lays out a tutor reply followed by the student's next answer.
/// Entries that are blank after trimming are skipped.
pub fn build_conversation<I, R>(inputs: &[I], responses: &[R]) -> Vec<ChatMessage>
where
    I: AsRef<str>,
    R: AsRef<str>,
{
    let max_len = inputs.len().max(responses.len());
    let mut conversation = Vec::new();

    for i in 0..max_len {
        if let Some(response) = responses.get(i).map(|r| r.as_ref().trim()) {
            if !response.is_empty() {
                conversation.push(ChatMessage::assistant(response));
            }
        }

        if let Some(input) = inputs.get(i).map(|u| u.as_ref().trim()) {
            if !input.is_empty() {
                conversation.push(ChatMessage::user(input));
            }
        }
    }

    conversation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_skips_blank_response_but_keeps_input() {
        let conversation = build_conversation(&["a", "b"], &["x", ""]);
        assert_eq!(
            conversation,
            vec![
                ChatMessage::assistant("x"),
                ChatMessage::user("a"),
                ChatMessage::user("b"),
            ]
        );
    }

    #[test]
    fn test_conversation_uneven_lengths() {
        let conversation = build_conversation(&["first"], &["r1", "r2", "r3"]);
        let roles: Vec<ChatRole> = conversation.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::Assistant,
            ]
        );
        assert_eq!(conversation[3].content, "r3");
    }

    #[test]
    fn test_conversation_trims_content() {
        let responses: [&str; 0] = [];
        let conversation = build_conversation(&["  0.5  \n"], &responses);
        assert_eq!(conversation, vec![ChatMessage::user("0.5")]);
    }

    #[test]
    fn test_conversation_empty() {
        let none: [&str; 0] = [];
        assert!(build_conversation(&none, &none).is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::system("hi")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"hi"}"#);
    }
}
