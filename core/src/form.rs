//! State of the creation form and its normalization into a payload.

use chrono::{DateTime, TimeZone, Utc};

use crate::due;
use crate::error::ValidationError;
use crate::types::{CreateTodo, Priority};

/// Field values as a user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Local `YYYY-MM-DDTHH:MM`, or blank for no due date.
    pub due: String,
}

impl CreateForm {
    /// A blank form whose due field is seeded to `now + 60 minutes`.
    pub fn seeded<Tz: TimeZone>(now: &DateTime<Utc>, tz: &Tz) -> Self {
        let mut form = Self::default();
        form.reset(now, tz);
        form
    }

    pub fn reset<Tz: TimeZone>(&mut self, now: &DateTime<Utc>, tz: &Tz) {
        *self = CreateForm {
            due: due::default_due_input(now, tz),
            ..CreateForm::default()
        };
    }

    /// Trim text fields and convert the due input. Fails without side
    /// effects when the title is blank.
    pub fn to_payload<Tz: TimeZone>(&self, tz: &Tz) -> Result<CreateTodo, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(CreateTodo {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            due_at: due::local_input_to_utc(&self.due, tz)?,
        })
    }
}
