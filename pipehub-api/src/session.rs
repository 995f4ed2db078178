/// Name of the cookie the backend issues after login.
pub const SESSION_COOKIE: &str = "session";

/// Session credential attached to every backend request.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    value: Option<String>,
}

impl Session {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Session {
            value: (!value.is_empty()).then_some(value),
        }
    }

    pub fn anonymous() -> Self {
        Session { value: None }
    }

    pub fn is_anonymous(&self) -> bool {
        self.value.is_none()
    }

    /// Value for the `Cookie` request header, if any.
    pub fn cookie_header(&self) -> Option<String> {
        self.value
            .as_deref()
            .map(|v| format!("{SESSION_COOKIE}={v}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_carries_session_value() {
        let session = Session::new("abc123");
        assert_eq!(session.cookie_header().as_deref(), Some("session=abc123"));
        assert!(!session.is_anonymous());
    }

    #[test]
    fn empty_value_is_anonymous() {
        assert!(Session::new("").is_anonymous());
        assert_eq!(Session::anonymous().cookie_header(), None);
    }
}
