//! # Identity Resolution
//!
//! Turns an opaque bearer credential into a user id. Token issuance lives
//! outside the node; the static adapter maps tokens configured through
//! `LX_API_TOKENS`.

use shared_types::UserId;
use std::collections::HashMap;

/// Resolves a credential to a user, or `None` for unauthenticated callers.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<UserId>;
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; an empty token is rejected.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Fixed token table loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenResolver {
    pub fn new(tokens: HashMap<String, UserId>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityResolver for StaticTokenResolver {
    fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer   abc "), Some("abc"));
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("abc"), None);
    }

    #[test]
    fn test_static_resolver() {
        let resolver = StaticTokenResolver::new(HashMap::from([("t1".to_string(), 7)]));
        assert_eq!(resolver.resolve("t1"), Some(7));
        assert_eq!(resolver.resolve("t2"), None);
    }
}
