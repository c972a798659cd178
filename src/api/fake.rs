//! In-memory `TodoApi` for tests: programmable failures and a request log.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::TodoApi;
use crate::error::ApiError;
use crate::model::{AuthResponse, CreateTodo, Todo, UpdateTodo, User};

/// One recorded call: operation name plus the token it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: &'static str,
    pub token: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub todos: Vec<Todo>,
    /// email -> (password, user)
    pub accounts: HashMap<String, (String, User)>,
    /// token -> email
    pub tokens: HashMap<String, String>,
    /// op name -> error returned by the next call of that op
    pub failures: HashMap<&'static str, ApiError>,
    pub calls: Vec<Call>,
    next_id: u32,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
    token: Option<String>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn with_account(self, email: &str, password: &str, name: &str) -> Self {
        let user = User {
            id: format!("user-{}", name.to_lowercase()),
            email: email.to_string(),
            name: name.to_string(),
        };
        self.state()
            .accounts
            .insert(email.to_string(), (password.to_string(), user));
        self
    }

    pub fn with_token(self, token: &str, email: &str) -> Self {
        self.state()
            .tokens
            .insert(token.to_string(), email.to_string());
        self
    }

    pub fn with_todos(self, todos: Vec<Todo>) -> Self {
        self.state().todos = todos;
        self
    }

    /// 下一次调用 `op` 时返回 `err`
    pub fn fail_next(&self, op: &'static str, err: ApiError) {
        self.state().failures.insert(op, err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    fn begin(&self, op: &'static str) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state();
        state.calls.push(Call {
            op,
            token: self.token.clone(),
        });
        match state.failures.remove(op) {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }

    fn authorized(&self, state: &FakeState) -> Result<User, ApiError> {
        let email = self
            .token
            .as_ref()
            .and_then(|t| state.tokens.get(t))
            .ok_or(ApiError::Unauthorized {
                status: 401,
                detail: Some("Could not validate credentials".to_string()),
            })?;
        state
            .accounts
            .get(email)
            .map(|(_, user)| user.clone())
            .ok_or(ApiError::Unauthorized {
                status: 401,
                detail: None,
            })
    }
}

pub fn todo(id: &str, title: &str) -> Todo {
    Todo {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        priority: Default::default(),
        completed: false,
        created_at: Utc::now(),
        updated_at: None,
    }
}

impl TodoApi for FakeApi {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let mut state = self.begin("login")?;
        let user = match state.accounts.get(email) {
            Some((pw, user)) if pw == password => user.clone(),
            _ => {
                return Err(ApiError::Unauthorized {
                    status: 401,
                    detail: Some("Incorrect email or password".to_string()),
                })
            }
        };
        let token = format!("tok-{}", state.tokens.len() + 1);
        state.tokens.insert(token.clone(), email.to_string());
        Ok(AuthResponse {
            access_token: token,
            user,
        })
    }

    fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        let mut state = self.begin("register")?;
        if state.accounts.contains_key(email) {
            return Err(ApiError::Validation {
                status: 400,
                detail: Some("Email already registered".to_string()),
            });
        }
        let user = User {
            id: format!("user-{}", state.accounts.len() + 1),
            email: email.to_string(),
            name: name.to_string(),
        };
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        let token = format!("tok-{}", state.tokens.len() + 1);
        state.tokens.insert(token.clone(), email.to_string());
        Ok(AuthResponse {
            access_token: token,
            user,
        })
    }

    fn me(&self) -> Result<User, ApiError> {
        let state = self.begin("me")?;
        self.authorized(&state)
    }

    fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let state = self.begin("list_todos")?;
        self.authorized(&state)?;
        Ok(state.todos.clone())
    }

    fn create_todo(&self, req: &CreateTodo) -> Result<Todo, ApiError> {
        let mut state = self.begin("create_todo")?;
        self.authorized(&state)?;
        state.next_id += 1;
        let todo = Todo {
            id: format!("new-{}", state.next_id),
            title: req.title.clone(),
            description: req.description.clone().unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.todos.insert(0, todo.clone());
        Ok(todo)
    }

    fn update_todo(&self, id: &str, update: &UpdateTodo) -> Result<Todo, ApiError> {
        let mut state = self.begin("update_todo")?;
        self.authorized(&state)?;
        let todo = state
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound {
                detail: Some("Todo not found".to_string()),
            })?;
        if let Some(title) = &update.title {
            todo.title = title.clone();
        }
        if let Some(description) = &update.description {
            todo.description = description.clone();
        }
        if let Some(priority) = update.priority {
            todo.priority = priority;
        }
        if let Some(completed) = update.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(Utc::now());
        Ok(todo.clone())
    }

    fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_todo")?;
        self.authorized(&state)?;
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        if state.todos.len() == before {
            return Err(ApiError::NotFound {
                detail: Some("Todo not found".to_string()),
            });
        }
        Ok(())
    }
}
