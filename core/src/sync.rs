//! The client sync loop: owns the cache and drives list/get/create/update/
//! delete through an injected [`Transport`].
//!
//! # Design
//! Every operation is one request/response exchange followed by exactly one
//! of: cache mutation + re-render, or an error report. The cache is only
//! written from server-returned data, and a failed operation leaves it
//! untouched. Confirmation and text-input dialogs come from a [`Prompter`]
//! supplied per call so tests can answer them.

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::cache::TodoCache;
use crate::client::TodoClient;
use crate::error::{ApiError, Operation, SyncError, ValidationError};
use crate::form::CreateForm;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::render::{self, ViewModel};
use crate::types::{TodoId, UpdateFields};

/// Blocking yes/no and text-input dialogs.
pub trait Prompter {
    fn confirm(&mut self, message: &str) -> bool;

    /// `None` means the user cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

/// Result of an operation that the user may call off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Declined,
}

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct SyncLoop<T, Tz: TimeZone> {
    client: TodoClient,
    transport: T,
    tz: Tz,
    clock: Clock,
    cache: TodoCache,
    view: ViewModel,
    form: CreateForm,
    lookup: Option<String>,
}

/// Parse the lookup box's text into an id. Zero, negatives and non-numbers
/// are rejected.
pub fn parse_id(input: &str) -> Result<TodoId, ValidationError> {
    match input.trim().parse::<TodoId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId),
    }
}

impl<T: Transport, Tz: TimeZone> SyncLoop<T, Tz> {
    pub fn new(client: TodoClient, transport: T, tz: Tz) -> Self {
        let now = Utc::now();
        Self {
            form: CreateForm::seeded(&now, &tz),
            client,
            transport,
            tz,
            clock: Box::new(Utc::now),
            cache: TodoCache::default(),
            view: ViewModel::loading(),
            lookup: None,
        }
    }

    /// Replace the wall clock; the form's due field is re-seeded from it.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self.form.reset(&(self.clock)(), &self.tz);
        self
    }

    /// Start from an existing cache instead of an empty one.
    pub fn with_cache(mut self, cache: TodoCache) -> Self {
        self.cache = cache;
        self.render();
        self
    }

    pub fn cache(&self) -> &TodoCache {
        &self.cache
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    /// Text of the lookup-by-id panel.
    pub fn lookup(&self) -> Option<&str> {
        self.lookup.as_deref()
    }

    pub fn clear_lookup(&mut self) {
        self.lookup = None;
    }

    /// Fetch the whole collection and replace the cache with it.
    pub fn list(&mut self) -> Result<(), SyncError> {
        self.view = ViewModel::loading();
        let request = self.client.build_list_todos();
        let result = self
            .dispatch(Operation::List, request)
            .and_then(|resp| self.client.parse_list_todos(resp));
        match result {
            Ok(todos) => {
                info!(count = todos.len(), "cache replaced from list");
                self.cache.replace_all(todos);
                self.render();
                Ok(())
            }
            Err(err) => {
                self.view = ViewModel::failed(Operation::List);
                Err(failed(Operation::List, err))
            }
        }
    }

    /// Look up the id typed into the lookup box.
    pub fn lookup_input(&mut self, input: &str) -> Result<String, SyncError> {
        let id = parse_id(input)?;
        self.get(id)
    }

    /// Fetch one record and return it as indented JSON. The cache is not
    /// touched; the lookup panel shows either the dump or the failure text.
    pub fn get(&mut self, id: TodoId) -> Result<String, SyncError> {
        if id <= 0 {
            return Err(ValidationError::InvalidId.into());
        }
        let request = self.client.build_get_todo(id);
        let result = self
            .dispatch(Operation::Get, request)
            .and_then(|resp| self.client.parse_get_todo(resp))
            .and_then(|record| {
                serde_json::to_string_pretty(&record).map_err(|e| ApiError::Serialization(e.to_string()))
            });
        match result {
            Ok(dump) => {
                self.lookup = Some(dump.clone());
                Ok(dump)
            }
            Err(err) => {
                self.lookup = Some(Operation::Get.failure_message().to_string());
                Err(failed(Operation::Get, err))
            }
        }
    }

    /// Submit the creation form. On success the new record is put first in
    /// the cache and the form is reset.
    pub fn create(&mut self) -> Result<TodoId, SyncError> {
        let payload = self.form.to_payload(&self.tz)?;
        let result = self
            .client
            .build_create_todo(&payload)
            .and_then(|request| self.dispatch(Operation::Create, request))
            .and_then(|resp| self.client.parse_create_todo(resp));
        let created = result.map_err(|err| failed(Operation::Create, err))?;

        let id = created.id;
        info!(id, "created");
        self.cache.prepend(created);
        self.form.reset(&(self.clock)(), &self.tz);
        self.render();
        Ok(id)
    }

    /// Send a full update for a cached record, filling absent fields from
    /// the cache, then merge the server's answer over the cached copy.
    pub fn update(&mut self, id: TodoId, fields: UpdateFields) -> Result<(), SyncError> {
        let current = self.cache.get(id).ok_or(ValidationError::UnknownId(id))?;
        if fields.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ValidationError::EmptyTitle.into());
        }
        let payload = fields.resolve(current);
        let result = self
            .client
            .build_update_todo(id, &payload)
            .and_then(|request| self.dispatch(Operation::Update, request))
            .and_then(|resp| self.client.parse_update_todo(resp));
        let returned = result.map_err(|err| failed(Operation::Update, err))?;

        self.cache
            .merge(id, returned)
            .map_err(|e| failed(Operation::Update, ApiError::Deserialization(e.to_string())))?;
        info!(id, "updated");
        self.render();
        Ok(())
    }

    /// Prompt for a new title and description, then update. A cancelled or
    /// blank title aborts without a request.
    pub fn edit(&mut self, id: TodoId, prompter: &mut dyn Prompter) -> Result<Outcome, SyncError> {
        let current = self.cache.get(id).ok_or(ValidationError::UnknownId(id))?;
        let title = match prompter.prompt("Title:", &current.title) {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => return Ok(Outcome::Declined),
        };
        let description = prompter
            .prompt("Description:", current.description.as_deref().unwrap_or_default())
            .unwrap_or_default();
        self.update(
            id,
            UpdateFields {
                title: Some(title),
                description: Some(description),
                ..UpdateFields::default()
            },
        )?;
        Ok(Outcome::Applied)
    }

    /// Delete a cached record after confirmation. Declining is a silent no-op.
    pub fn delete(&mut self, id: TodoId, prompter: &mut dyn Prompter) -> Result<Outcome, SyncError> {
        self.cache.get(id).ok_or(ValidationError::UnknownId(id))?;
        if !prompter.confirm(&format!("Delete task #{id}?")) {
            debug!(id, "delete declined");
            return Ok(Outcome::Declined);
        }
        let request = self.client.build_delete_todo(id);
        self.dispatch(Operation::Delete, request)
            .and_then(|resp| self.client.parse_delete_todo(resp))
            .map_err(|err| failed(Operation::Delete, err))?;

        let removed = self.cache.remove(id);
        info!(id, removed, "deleted");
        self.render();
        Ok(Outcome::Applied)
    }

    fn dispatch(&self, op: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(?op, method = request.method.as_str(), path = %request.path, "dispatching");
        self.transport.execute(request)
    }

    fn render(&mut self) {
        self.view = render::render(&self.cache, &self.tz);
    }
}

fn failed(op: Operation, err: ApiError) -> SyncError {
    warn!(?op, error = %err, "operation failed");
    SyncError::request(op, err)
}
