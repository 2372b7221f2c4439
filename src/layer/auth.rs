//! Credentials for agents behind an authenticating proxy
//!
//! The agent protocol itself carries no authentication: a plain agent accepts any
//! `tasks/send`. When an agent is deployed behind a gateway that demands a token or key,
//! [`AuthLayer`] stamps the matching header on every request the client sends, including
//! the agent card fetch.

use std::task::{Context, Poll};

use base64::{engine::general_purpose, Engine as _};
use tower_layer::Layer;
use tower_service::Service;

use crate::service::A2ARequest;

/// What the proxy in front of an agent expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredentials {
    /// `Authorization: Bearer <token>`
    Bearer(String),

    /// A raw key in a custom header, e.g. `X-API-Key`
    ApiKey { header: String, key: String },

    /// `Authorization: Basic <base64(user:password)>`
    Basic { username: String, password: String },
}

impl AuthCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    pub fn api_key(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::ApiKey {
            header: header.into(),
            key: key.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Header name and value carrying these credentials
    pub fn header(&self) -> (&str, String) {
        match self {
            Self::Bearer(token) => ("Authorization", format!("Bearer {token}")),
            Self::ApiKey { header, key } => (header.as_str(), key.clone()),
            Self::Basic { username, password } => {
                let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
                ("Authorization", format!("Basic {encoded}"))
            }
        }
    }
}

/// Adds the credential header to each request's context
#[derive(Debug, Clone)]
pub struct AuthLayer {
    credentials: AuthCredentials,
}

impl AuthLayer {
    pub fn new(credentials: AuthCredentials) -> Self {
        Self { credentials }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            credentials: self.credentials.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthService<S> {
    inner: S,
    credentials: AuthCredentials,
}

impl<S> Service<A2ARequest> for AuthService<S>
where
    S: Service<A2ARequest>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: A2ARequest) -> Self::Future {
        let (name, value) = self.credentials.header();
        req.context.headers.insert(name.to_string(), value);
        self.inner.call(req)
    }
}
