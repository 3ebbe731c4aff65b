use jobboard_core::UserId;

/// Name of the header that carries the acting user.
pub const USER_ID_HEADER: &str = "user-id";

/// Acting user for a request, taken from the `user-id` header.
///
/// Optional: anonymous callers see the unfiltered job list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    user_id: Option<UserId>,
}

impl UserContext {
    pub fn new(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Body value first, header as fallback; blank values count as missing.
    pub fn resolve(&self, from_body: Option<&str>) -> Option<UserId> {
        from_body
            .and_then(|raw| raw.parse().ok())
            .or_else(|| self.user_id.clone())
    }
}
