//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UsersClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status counts as success: public mock APIs answer POST with 201
//! and DELETE with 200, real ones often with 204.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{User, UserInput};

const COLLECTION: &str = "users";

/// Synchronous, stateless client for the users API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{COLLECTION}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_user(&self, input: &UserInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/{COLLECTION}", self.base_url),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_user(&self, id: u64, input: &UserInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{COLLECTION}/{id}", self.base_url),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_delete_user(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{COLLECTION}/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        decode(response)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }

    /// The delete response body is ignored; only the status matters.
    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(response).map(drop)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(input: &UserInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map non-2xx status codes to `ApiError::Remote`.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Remote {
        status: response.status,
        body: response.body,
    })
}
