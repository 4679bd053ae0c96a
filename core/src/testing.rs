//! In-process transports for unit tests.

use std::cell::{Cell, RefCell};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{User, UserInput};

/// Answers requests the way the mock server does, without sockets.
#[derive(Debug, Default)]
pub(crate) struct InMemoryRemote {
    users: RefCell<Vec<User>>,
    next_id: Cell<u64>,
    requests: Cell<usize>,
    write_status: Cell<Option<u16>>,
}

impl InMemoryRemote {
    pub(crate) const BASE_URL: &'static str = "http://remote.test";

    pub(crate) fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub(crate) fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            users: RefCell::new(users),
            next_id: Cell::new(next_id),
            requests: Cell::new(0),
            write_status: Cell::new(None),
        }
    }

    /// From now on POST, PUT and DELETE answer `status` and change nothing.
    pub(crate) fn fail_writes_with(&self, status: u16) {
        self.write_status.set(Some(status));
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.get()
    }

    pub(crate) fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    fn route(&self, request: &HttpRequest) -> (u16, String) {
        let path = request
            .path
            .strip_prefix(Self::BASE_URL)
            .unwrap_or(&request.path);
        let id = path
            .strip_prefix("/users/")
            .and_then(|s| s.parse::<u64>().ok());
        let input = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str::<UserInput>(b).ok());

        if let Some(status) = self.write_status.get().filter(|_| request.method != HttpMethod::Get) {
            return (status, r#"{"error":"unavailable"}"#.to_string());
        }

        let mut users = self.users.borrow_mut();
        match (request.method, path, id, input) {
            (HttpMethod::Get, "/users", _, _) => (200, json(&*users)),
            (HttpMethod::Post, "/users", _, Some(input)) => {
                let user = User {
                    id: self.next_id.replace(self.next_id.get().saturating_add(1)),
                    name: input.name,
                    email: input.email,
                };
                users.push(user.clone());
                (201, json(&user))
            }
            (HttpMethod::Put, _, Some(id), Some(input)) => {
                match users.iter_mut().find(|u| u.id == id) {
                    Some(user) => {
                        user.name = input.name;
                        user.email = input.email;
                        (200, json(&*user))
                    }
                    None => (404, "{}".to_string()),
                }
            }
            (HttpMethod::Delete, _, Some(id), _) => {
                let before = users.len();
                users.retain(|u| u.id != id);
                if users.len() < before {
                    (200, "{}".to_string())
                } else {
                    (404, "{}".to_string())
                }
            }
            _ => (400, String::new()),
        }
    }
}

impl Transport for InMemoryRemote {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.set(self.requests.get() + 1);
        let (status, body) = self.route(&request);
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Every request fails before a response arrives.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingTransport;

impl Transport for FailingTransport {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }
}

fn json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap()
}
