use tokio_util::sync::{CancellationToken, DropGuard};

/// Per-request cancellation scope.
///
/// Handlers create one at the top and pass `scope.token()` into every API
/// call. When the handler future is dropped (client went away) the guard
/// cancels the token, so any call still racing on it stops.
pub struct RequestScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestScope {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self { token, _guard: guard }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_scope_cancels_token() {
        let scope = RequestScope::new();
        let token = scope.token().clone();
        assert!(!token.is_cancelled());
        drop(scope);
        assert!(token.is_cancelled());
    }
}
