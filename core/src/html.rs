//! HTML presentation of a [`ViewModel`] for the Bootstrap and Tailwind
//! front-ends.
//!
//! Output is a pair of fragments: the list container's inner HTML and the
//! count summary text. Every record string goes through [`escape_html`].

use std::fmt::Write as _;

use crate::render::{ListView, RowView, ViewModel};
use crate::types::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Bootstrap,
    Tailwind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlView {
    pub list: String,
    pub count: String,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render_html(view: &ViewModel, theme: Theme) -> HtmlView {
    let list = match (&view.list, theme) {
        (ListView::Loading, Theme::Bootstrap) => concat!(
            r#"<div class="list-group-item d-flex align-items-center gap-2">"#,
            r#"<div class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></div>"#,
            "<span>Loading…</span></div>"
        )
        .to_string(),
        (ListView::Loading, Theme::Tailwind) => {
            r#"<div class="text-muted p-4 text-center">Loading…</div>"#.to_string()
        }
        (ListView::Failed(msg), Theme::Bootstrap) => {
            format!(r#"<div class="list-group-item text-danger">{}</div>"#, escape_html(msg))
        }
        (ListView::Failed(msg), Theme::Tailwind) => {
            format!(r#"<div class="text-danger p-4 text-center">{}</div>"#, escape_html(msg))
        }
        (ListView::Empty(msg), Theme::Bootstrap) => format!(
            r#"<div class="list-group-item text-muted text-center py-3">{}</div>"#,
            escape_html(msg)
        ),
        (ListView::Empty(msg), Theme::Tailwind) => {
            format!(r#"<div class="text-muted p-4 text-center">{}</div>"#, escape_html(msg))
        }
        (ListView::Rows(rows), Theme::Bootstrap) => rows.iter().map(bootstrap_row).collect(),
        (ListView::Rows(rows), Theme::Tailwind) => rows.iter().map(tailwind_row).collect(),
    };
    HtmlView {
        list,
        count: view.count.clone(),
    }
}

fn badge_class(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "text-bg-success",
        Priority::Medium => "text-bg-warning",
        Priority::High => "text-bg-danger",
        Priority::Other(_) => "text-bg-secondary",
    }
}

fn bootstrap_row(row: &RowView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="list-group-item d-grid gap-3 align-items-center" data-id="{id}" style="grid-template-columns: 60px 1fr auto;">"#,
        id = row.id
    );
    let _ = write!(
        html,
        r#"<div class="fw-bold text-secondary text-center id-tag">#{}</div>"#,
        row.id
    );
    html.push_str(r#"<div class="min-w-0"><div class="d-flex flex-wrap align-items-center gap-2">"#);
    let _ = write!(
        html,
        r#"<strong class="text-break">{}</strong><span class="badge {}">{}</span></div>"#,
        escape_html(&row.title),
        badge_class(row.priority),
        row.priority_label
    );
    if let Some(desc) = &row.description {
        let _ = write!(
            html,
            r#"<div class="small text-muted desc mt-1 text-break">{}</div>"#,
            escape_html(desc)
        );
    }
    let _ = write!(html, r#"<div class="small text-muted mt-1">Due: {}</div></div>"#, row.due);
    html.push_str(concat!(
        r#"<div class="d-flex align-items-center justify-content-end gap-2 actions">"#,
        r#"<button class="btn btn-sm btn-outline-primary btn-edit">Edit</button>"#,
        r#"<button class="btn btn-sm btn-outline-danger btn-del">Delete</button>"#,
        "</div></div>"
    ));
    html
}

fn tailwind_row(row: &RowView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<article class="grid grid-cols-[60px_1fr_auto] gap-3 items-center p-3 border-t first:border-t-0 border-border" data-id="{id}"><div class="font-bold text-muted text-center">#{id}</div>"#,
        id = row.id
    );
    let _ = write!(html, r#"<div><strong class="block">{}</strong>"#, escape_html(&row.title));
    if let Some(desc) = &row.description {
        let _ = write!(html, r#"<div class="mt-1 text-muted">{}</div>"#, escape_html(desc));
    }
    let _ = write!(
        html,
        r#"<small class="text-muted">Priority: {} · Due: {}</small></div>"#,
        row.priority_label, row.due
    );
    html.push_str(concat!(
        r#"<div class="flex gap-2 justify-end">"#,
        r#"<button data-action="edit" class="px-3 py-2 rounded-md border border-border bg-transparent text-text font-semibold hover:bg-white/40">Edit</button>"#,
        r#"<button data-action="del" class="px-3 py-2 rounded-md border border-transparent bg-danger text-white font-semibold hover:opacity-90">Delete</button>"#,
        "</div></article>"
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, description: Option<&str>, priority: Priority) -> RowView {
        RowView {
            id: 7,
            title: title.to_string(),
            description: description.map(str::to_string),
            priority,
            priority_label: priority.label(),
            due: "—".to_string(),
        }
    }

    fn rows(rows: Vec<RowView>) -> ViewModel {
        ViewModel {
            count: crate::render::count_label(rows.len()),
            list: ListView::Rows(rows),
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn bootstrap_row_has_badge_and_escaped_title() {
        let html = render_html(&rows(vec![row("<x>", None, Priority::High)]), Theme::Bootstrap);
        assert!(html.list.contains(r#"data-id="7""#));
        assert!(html.list.contains("#7"));
        assert!(html.list.contains("&lt;x&gt;"));
        assert!(html.list.contains(r#"<span class="badge text-bg-danger">High</span>"#));
        assert!(!html.list.contains("desc mt-1"));
        assert_eq!(html.count, "1 task");
    }

    #[test]
    fn unknown_priority_uses_secondary_badge() {
        let html = render_html(&rows(vec![row("t", None, Priority::Other(7))]), Theme::Bootstrap);
        assert!(html.list.contains("text-bg-secondary"));
        assert!(html.list.contains("Unknown"));
    }

    #[test]
    fn tailwind_row_shows_priority_and_due_line() {
        let html = render_html(&rows(vec![row("t", Some("d & e"), Priority::Medium)]), Theme::Tailwind);
        assert!(html.list.starts_with("<article"));
        assert!(html.list.contains(r#"<div class="mt-1 text-muted">d &amp; e</div>"#));
        assert!(html.list.contains("Priority: Medium · Due: —"));
    }

    #[test]
    fn empty_and_failed_states_have_no_rows() {
        let empty = ViewModel {
            list: ListView::Empty("No tasks.".to_string()),
            count: "0 tasks".to_string(),
        };
        for theme in [Theme::Bootstrap, Theme::Tailwind] {
            let html = render_html(&empty, theme);
            assert!(html.list.contains("No tasks."));
            assert!(!html.list.contains("data-id"));
            assert_eq!(html.count, "0 tasks");
        }
        let failed = render_html(&ViewModel::failed(crate::error::Operation::List), Theme::Bootstrap);
        assert!(failed.list.contains("text-danger"));
        assert!(failed.count.is_empty());
    }
}
