use std::fmt;

/// Decides whether a token name looks like a scam.
pub trait KeywordScreen: fmt::Debug + Send + Sync {
    fn is_suspicious(&self, name: &str) -> bool;
}

/// Case-insensitive substring match against a fixed keyword list.
#[derive(Debug, Clone, Default)]
pub struct KeywordList {
    keywords: Vec<String>,
}

impl KeywordList {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }
}

impl KeywordScreen for KeywordList {
    fn is_suspicious(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| name_lower.contains(keyword.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match_ignores_case() {
        let screen = KeywordList::new(["scam", "Honeypot"]);
        assert!(screen.is_suspicious("Totally Not A SCAM"));
        assert!(screen.is_suspicious("honeypotinu"));
        assert!(!screen.is_suspicious("Samoyed Coin"));
    }

    #[test]
    fn test_blank_keywords_are_dropped() {
        let screen = KeywordList::new(["", "  "]);
        assert!(!screen.is_suspicious("anything"));
    }
}
