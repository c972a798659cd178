//! HTTP client for the Kiki Todo service.
//!
//! Everything goes through [`TodoApi`] so the session and the task view can be
//! driven by an in-memory fake in tests. [`ApiClient`] is the real, blocking
//! implementation on top of `ureq`; the TUI calls it from worker threads.

#[cfg(test)]
pub mod fake;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::user::RegisterRequest;
use crate::model::{AuthResponse, CreateTodo, Todo, UpdateTodo, User};

/// Default service location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Remote operations of the todo service.
///
/// The token set with [`TodoApi::set_token`] is attached as a bearer header to
/// every following request; `None` removes it.
pub trait TodoApi: Clone + Send + 'static {
    fn set_token(&mut self, token: Option<String>);
    fn token(&self) -> Option<&str>;

    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
    fn register(&self, email: &str, password: &str, name: &str)
        -> Result<AuthResponse, ApiError>;
    fn me(&self) -> Result<User, ApiError>;

    fn list_todos(&self) -> Result<Vec<Todo>, ApiError>;
    fn create_todo(&self, todo: &CreateTodo) -> Result<Todo, ApiError>;
    fn update_todo(&self, id: &str, update: &UpdateTodo) -> Result<Todo, ApiError>;
    fn delete_todo(&self, id: &str) -> Result<(), ApiError>;
}

/// `ureq`-backed client
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

enum Body<'a, T: Serialize> {
    Empty,
    Json(&'a T),
    Form(&'a [(&'a str, &'a str)]),
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new()
            .user_agent(concat!("kiki-todo/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: Body<'_, T>,
    ) -> Result<ureq::Response, ApiError> {
        tracing::debug!(method, path, "api request");

        let mut request = self.agent.request(method, &self.url(path));
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let result = match body {
            Body::Empty => request.call(),
            Body::Json(data) => request.send_json(data),
            Body::Form(fields) => request.send_form(fields),
        };

        match result {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let err = ApiError::from_status(status, &body);
                tracing::debug!(method, path, status, error = %err, "api request rejected");
                Err(err)
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(method, path, error = %transport, "api transport failure");
                Err(ApiError::Transport(transport.to_string()))
            }
        }
    }

    fn json<R: DeserializeOwned, T: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: Body<'_, T>,
    ) -> Result<R, ApiError> {
        self.send(method, path, body)?
            .into_json::<R>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TodoApi for ApiClient {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let form = [("username", email), ("password", password)];
        self.json::<_, ()>("POST", "/auth/login", Body::Form(&form))
    }

    fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            email,
            password,
            name,
        };
        self.json("POST", "/auth/register", Body::Json(&body))
    }

    fn me(&self) -> Result<User, ApiError> {
        self.json::<_, ()>("GET", "/auth/me", Body::Empty)
    }

    fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.json::<_, ()>("GET", "/todos/", Body::Empty)
    }

    fn create_todo(&self, todo: &CreateTodo) -> Result<Todo, ApiError> {
        self.json("POST", "/todos/", Body::Json(todo))
    }

    fn update_todo(&self, id: &str, update: &UpdateTodo) -> Result<Todo, ApiError> {
        self.json("PUT", &format!("/todos/{}", id), Body::Json(update))
    }

    fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        self.send::<()>("DELETE", &format!("/todos/{}", id), Body::Empty)
            .map(|_| ())
    }
}
