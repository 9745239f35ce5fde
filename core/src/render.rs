//! Pure transformation from cache state to a displayable view model.
//!
//! # Design
//! `render` reads nothing but the cache and a time zone, so the same
//! `ViewModel` can be snapshot-tested and handed to any presentation layer
//! (terminal text, Bootstrap HTML, Tailwind HTML).

use chrono::TimeZone;

use crate::cache::TodoCache;
use crate::due;
use crate::error::Operation;
use crate::types::{Priority, Todo, TodoId};

pub const EMPTY_MESSAGE: &str = "No tasks.";
pub const LOADING_MESSAGE: &str = "Loading…";

/// One visual row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TodoId,
    pub title: String,
    /// Only set when the record has a non-empty description.
    pub description: Option<String>,
    pub priority: Priority,
    pub priority_label: &'static str,
    /// Formatted local due date, or the unset placeholder.
    pub due: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Failed(String),
    Empty(String),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub list: ListView,
    /// "N tasks" summary; blank while loading or after a failed load.
    pub count: String,
}

impl ViewModel {
    pub fn loading() -> Self {
        ViewModel {
            list: ListView::Loading,
            count: String::new(),
        }
    }

    pub fn failed(op: Operation) -> Self {
        ViewModel {
            list: ListView::Failed(op.failure_message().to_string()),
            count: String::new(),
        }
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::loading()
    }
}

pub fn render<Tz: TimeZone>(cache: &TodoCache, tz: &Tz) -> ViewModel {
    let count = count_label(cache.len());
    if cache.is_empty() {
        return ViewModel {
            list: ListView::Empty(EMPTY_MESSAGE.to_string()),
            count,
        };
    }
    let rows = cache.todos().iter().map(|t| row(t, tz)).collect();
    ViewModel {
        list: ListView::Rows(rows),
        count,
    }
}

pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 task".to_string()
    } else {
        format!("{n} tasks")
    }
}

fn row<Tz: TimeZone>(todo: &Todo, tz: &Tz) -> RowView {
    RowView {
        id: todo.id,
        title: todo.title.clone(),
        description: todo.description.clone().filter(|d| !d.is_empty()),
        priority: todo.priority,
        priority_label: todo.priority.label(),
        due: due::format_due(todo.due_at.as_ref(), tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    fn cache(values: Vec<serde_json::Value>) -> TodoCache {
        TodoCache::new(
            values
                .into_iter()
                .map(|v| serde_json::from_value(v).unwrap())
                .collect(),
        )
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count_label(0), "0 tasks");
        assert_eq!(count_label(1), "1 task");
        assert_eq!(count_label(2), "2 tasks");
    }

    #[test]
    fn empty_cache_renders_empty_state() {
        let view = render(&TodoCache::default(), &Utc);
        assert_eq!(view.list, ListView::Empty("No tasks.".to_string()));
        assert_eq!(view.count, "0 tasks");
    }

    #[test]
    fn rows_follow_cache_order_and_format_fields() {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let view = render(
            &cache(vec![
                json!({"id": 2, "title": "Second", "description": "", "priority": 2,
                       "dueAt": "2025-06-01T12:00:00Z"}),
                json!({"id": 1, "title": "First", "description": "notes"}),
            ]),
            &tz,
        );
        assert_eq!(view.count, "2 tasks");
        assert_eq!(
            view.list,
            ListView::Rows(vec![
                RowView {
                    id: 2,
                    title: "Second".to_string(),
                    description: None,
                    priority: Priority::High,
                    priority_label: "High",
                    due: "2025-06-01 09:00".to_string(),
                },
                RowView {
                    id: 1,
                    title: "First".to_string(),
                    description: Some("notes".to_string()),
                    priority: Priority::Low,
                    priority_label: "Low",
                    due: "—".to_string(),
                },
            ])
        );
    }

    #[test]
    fn count_matches_cache_length() {
        for n in 0..4 {
            let values = (0..n).map(|i| json!({"id": i + 1, "title": "t"})).collect();
            let view = render(&cache(values), &Utc);
            let expected = if n == 1 { "1 task".to_string() } else { format!("{n} tasks") };
            assert_eq!(view.count, expected);
        }
    }

    #[test]
    fn failed_view_has_blank_count() {
        let view = ViewModel::failed(Operation::List);
        assert_eq!(view.list, ListView::Failed("Could not load the list.".to_string()));
        assert!(view.count.is_empty());
    }
}
