#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Canned,
    Ollama,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Canned => "canned",
            Provider::Ollama => "ollama",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "canned" | "offline" => Some(Provider::Canned),
            "ollama" => Some(Provider::Ollama),
            _ => None,
        }
    }

    pub fn all() -> Vec<Provider> {
        vec![Provider::Canned, Provider::Ollama]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Canned => "Timeline Guide (Offline)",
            Provider::Ollama => "Ollama (Local)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for provider in Provider::all() {
            assert_eq!(Provider::from_str(provider.as_str()), Some(provider));
        }
        assert_eq!(Provider::from_str("Offline"), Some(Provider::Canned));
        assert_eq!(Provider::from_str("openai"), None);
    }
}
