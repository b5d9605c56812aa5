use reqwest::RequestBuilder;
use std::fmt::{self, Debug};

pub trait AuthStrategy: Send + Sync {
    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder;
}

impl Debug for dyn AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthStrategy")
    }
}

/// HTTP Basic credentials sent with every Solar Manager request.
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        BasicAuth {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl AuthStrategy for BasicAuth {
    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }
}

impl Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
