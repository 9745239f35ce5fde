//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Parsing goes through [`Envelope`]: a response succeeds only when the
//! status is 2xx and the envelope's `data` has the expected shape.

use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, RecordFields, Todo, TodoId, UpdateTodo};

/// Host of the public todo API the front-ends were written against.
pub const DEFAULT_BASE_URL: &str = "https://todoapitest.juansegaliz.com";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection(), None)
    }

    pub fn build_get_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Get, self.member(id), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, self.collection(), Some(body)))
    }

    pub fn build_update_todo(&self, id: TodoId, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, self.member(id), Some(body)))
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.member(id), None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        Envelope::parse(&response.body)
            .into_array()?
            .into_iter()
            .map(decode_record)
            .collect()
    }

    /// Returns the record exactly as the server sent it, for display.
    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        Envelope::parse(&response.body).into_truthy()
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode_record(Envelope::parse(&response.body).into_truthy()?)
    }

    /// Returns only the fields the server sent back, so the caller can merge
    /// them over its cached copy.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<RecordFields, ApiError> {
        check_status(&response)?;
        match Envelope::parse(&response.body).into_truthy()? {
            Value::Object(fields) => Ok(fields),
            other => Err(ApiError::Deserialization(format!(
                "expected a record object, got {other}"
            ))),
        }
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn member(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::with_capacity(2);
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        headers.push(("accept".to_string(), "text/plain".to_string()));
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

fn decode_record(value: Value) -> Result<Todo, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
