use std::collections::BTreeMap;

use mintwarden_core::config::Config;

/// Canonical system tokens that are always treated as officially verified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriticalRegistry {
    tokens: BTreeMap<String, String>,
}

impl CriticalRegistry {
    pub fn from_config(config: &Config) -> Self {
        let tokens = config
            .critical_tokens
            .iter()
            .map(|token| (token.mint.trim().to_string(), token.name.clone()))
            .collect();
        Self { tokens }
    }

    pub fn with_token(mut self, mint: impl Into<String>, name: impl Into<String>) -> Self {
        self.tokens.insert(mint.into(), name.into());
        self
    }

    /// Name of the registered token, matched on the exact mint address.
    pub fn lookup(&self, mint: &str) -> Option<&str> {
        self.tokens.get(mint.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contains_wrapped_sol() {
        let registry = CriticalRegistry::from_config(&Config::default_config());
        assert_eq!(
            registry.lookup("So11111111111111111111111111111111111111112"),
            Some("Wrapped SOL")
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = CriticalRegistry::default().with_token("AbC", "Example");
        assert_eq!(registry.lookup("AbC"), Some("Example"));
        assert_eq!(registry.lookup("abc"), None);
        assert!(CriticalRegistry::default().is_empty());
    }
}
