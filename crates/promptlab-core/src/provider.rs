#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Claude,
    Gemini,
}

impl Provider {
    /// Pick the provider that serves a model, going by its name prefix.
    pub fn for_model(model: &str) -> Option<Self> {
        let model = model.to_lowercase();
        if model.starts_with("gpt") {
            Some(Provider::OpenAI)
        } else if model.starts_with("claude") {
            Some(Provider::Claude)
        } else if model.starts_with("gemini") {
            Some(Provider::Gemini)
        } else {
            None
        }
    }

    pub fn all() -> Vec<Provider> {
        vec![Provider::OpenAI, Provider::Claude, Provider::Gemini]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "ChatGPT (OpenAI)",
            Provider::Claude => "Claude (Anthropic)",
            Provider::Gemini => "Gemini (Google)",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn key_env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Claude => "ANTHROPIC_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}
