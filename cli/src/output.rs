//! Writes a view model to the terminal as text or HTML.

use std::io::{self, Write};

use clap::ValueEnum;
use todo_core::{render_html, ListView, Theme, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Bootstrap,
    Tailwind,
}

pub fn write_view<W: Write>(out: &mut W, view: &ViewModel, format: Format) -> io::Result<()> {
    match format {
        Format::Text => write_text(out, view),
        Format::Bootstrap => write_html(out, view, Theme::Bootstrap),
        Format::Tailwind => write_html(out, view, Theme::Tailwind),
    }
}

fn write_text<W: Write>(out: &mut W, view: &ViewModel) -> io::Result<()> {
    match &view.list {
        ListView::Loading => writeln!(out, "Loading…")?,
        ListView::Failed(msg) | ListView::Empty(msg) => writeln!(out, "{msg}")?,
        ListView::Rows(rows) => {
            for row in rows {
                writeln!(
                    out,
                    "#{:<4} {}  [{}]  due {}",
                    row.id, row.title, row.priority_label, row.due
                )?;
                if let Some(desc) = &row.description {
                    writeln!(out, "      {desc}")?;
                }
            }
        }
    }
    if !view.count.is_empty() {
        writeln!(out, "{}", view.count)?;
    }
    Ok(())
}

fn write_html<W: Write>(out: &mut W, view: &ViewModel, theme: Theme) -> io::Result<()> {
    let html = render_html(view, theme);
    writeln!(out, r#"<div id="list">{}</div>"#, html.list)?;
    writeln!(out, r#"<span id="count">{}</span>"#, html.count)
}
