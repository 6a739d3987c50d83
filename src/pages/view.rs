//! Renderers turn one page of entries into a display-ready view.

use std::fmt::Display;

/// Fully composed content for one page.
///
/// The gateway decides how to materialise this: title/description/fields/
/// footer become an embed, `content` becomes plain message text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<(String, String)>,
    pub footer: Option<String>,
    pub content: Option<String>,
}

/// Page metadata handed to a renderer alongside the entry slice.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// 1-indexed page being rendered.
    pub page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
    /// Absolute 0-based index of the first entry on this page.
    pub start_index: usize,
    pub show_entry_count: bool,
    pub paginating: bool,
    /// True only for the very first render of a session.
    pub first: bool,
}

/// Converts a page slice plus metadata into a `PageView`. Pure.
pub trait Renderer<T>: Send + Sync {
    fn render(&self, entries: &[T], ctx: &RenderContext) -> PageView;
}

fn page_footer(ctx: &RenderContext) -> Option<String> {
    if ctx.total_pages <= 1 {
        return None;
    }

    if ctx.show_entry_count {
        Some(format!(
            "Page {}/{} ({} entries)",
            ctx.page, ctx.total_pages, ctx.total_entries
        ))
    } else {
        Some(format!("Page {}/{}", ctx.page, ctx.total_pages))
    }
}

/// Default renderer: entries become one numbered list in the embed body.
#[derive(Debug, Clone, Default)]
pub struct ListRenderer {
    title: Option<String>,
}

impl ListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

impl<T: Display> Renderer<T> for ListRenderer {
    fn render(&self, entries: &[T], ctx: &RenderContext) -> PageView {
        let mut lines: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(offset, entry)| format!("{}. {}", ctx.start_index + offset + 1, entry))
            .collect();

        if ctx.paginating && ctx.first {
            lines.push(String::new());
            lines.push("Confused? React with ℹ️ for more info.".to_owned());
        }

        PageView {
            title: self.title.clone(),
            description: Some(lines.join("\n")),
            footer: page_footer(ctx),
            ..Default::default()
        }
    }
}

/// Renders `(name, value)` entries as embed fields instead of a body list.
#[derive(Debug, Clone, Default)]
pub struct FieldRenderer {
    title: Option<String>,
}

impl FieldRenderer {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

impl Renderer<(String, String)> for FieldRenderer {
    fn render(&self, entries: &[(String, String)], ctx: &RenderContext) -> PageView {
        PageView {
            title: self.title.clone(),
            fields: entries.to_vec(),
            footer: page_footer(ctx),
            ..Default::default()
        }
    }
}

/// Renders pre-chunked raw text as plain message content, one chunk per page.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl Renderer<String> for TextRenderer {
    fn render(&self, entries: &[String], ctx: &RenderContext) -> PageView {
        let body = entries.first().cloned().unwrap_or_default();
        let content = if ctx.total_pages > 1 {
            format!("{body}\nPage {}/{}", ctx.page, ctx.total_pages)
        } else {
            body
        };

        PageView {
            content: Some(content),
            ..Default::default()
        }
    }
}

/// Split raw text into chunks that fit `max_size` once wrapped in
/// `prefix`/`suffix` (e.g. code fences). Splits on line boundaries where
/// possible; a single oversized line is cut at the nearest char boundary.
pub fn chunk_text(text: &str, prefix: &str, suffix: &str, max_size: usize) -> Vec<String> {
    let overhead = prefix.len() + suffix.len() + 2;
    let budget = max_size.saturating_sub(overhead).max(1);

    // First split any line too long to ever fit on a page by itself.
    let mut pieces: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let mut rest = line;
        while rest.len() > budget {
            // back up to a valid UTF-8 boundary
            let mut cut = budget;
            while cut > 0 && !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            let (head, tail) = rest.split_at(cut);
            pieces.push(head.to_owned());
            rest = tail;
        }
        pieces.push(rest.to_owned());
    }

    let wrap = |lines: &[String]| -> String {
        let mut out = String::new();
        if !prefix.is_empty() {
            out.push_str(prefix);
            out.push('\n');
        }
        out.push_str(&lines.join("\n"));
        if !suffix.is_empty() {
            out.push('\n');
            out.push_str(suffix);
        }
        out
    };

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut used = 0usize;

    for piece in pieces {
        let cost = piece.len() + 1;
        if used + cost > budget && !current.is_empty() {
            chunks.push(wrap(&current));
            current.clear();
            used = 0;
        }
        used += cost;
        current.push(piece);
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(wrap(&current));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(page: usize, total_pages: usize, total_entries: usize, per_page: usize) -> RenderContext {
        RenderContext {
            page,
            total_pages,
            total_entries,
            start_index: (page - 1) * per_page,
            show_entry_count: true,
            paginating: total_pages > 1,
            first: false,
        }
    }

    fn entries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("entry-{i}")).collect()
    }

    #[test]
    fn list_renderer_numbers_entries_absolutely() {
        let all = entries(25);
        let view = ListRenderer::new().render(&all[12..24], &ctx(2, 3, 25, 12));

        let description = view.description.unwrap();
        assert!(description.starts_with("13. entry-12"));
        assert!(description.ends_with("24. entry-23"));
        assert_eq!(view.footer.as_deref(), Some("Page 2/3 (25 entries)"));
    }

    #[test]
    fn list_renderer_first_page_scenario() {
        let all = entries(25);
        let mut context = ctx(1, 3, 25, 12);
        context.first = true;

        let view = ListRenderer::new().render(&all[..12], &context);

        let description = view.description.unwrap();
        assert!(description.starts_with("1. entry-0"));
        assert!(description.contains("Confused? React with ℹ️ for more info."));
        assert_eq!(view.footer.as_deref(), Some("Page 1/3 (25 entries)"));
    }

    #[test]
    fn single_page_has_no_footer_and_no_hint() {
        let all = entries(3);
        let mut context = ctx(1, 1, 3, 12);
        context.first = true;

        let view = ListRenderer::new().render(&all, &context);
        assert_eq!(view.footer, None);
        assert!(!view.description.unwrap().contains("Confused?"));
    }

    #[test]
    fn footer_omits_entry_count_when_disabled() {
        let all = entries(25);
        let mut context = ctx(3, 3, 25, 12);
        context.show_entry_count = false;

        let view = ListRenderer::new().render(&all[24..], &context);
        assert_eq!(view.footer.as_deref(), Some("Page 3/3"));
    }

    #[test]
    fn field_renderer_emits_fields_not_body() {
        let pairs = vec![
            ("noun".to_owned(), "a thing".to_owned()),
            ("verb".to_owned(), "to thing".to_owned()),
        ];
        let view = FieldRenderer::titled("Definition").render(&pairs, &ctx(1, 2, 8, 2));

        assert_eq!(view.title.as_deref(), Some("Definition"));
        assert_eq!(view.description, None);
        assert_eq!(view.fields.len(), 2);
        assert_eq!(view.footer.as_deref(), Some("Page 1/2 (8 entries)"));
    }

    #[test]
    fn text_renderer_appends_inline_page_marker() {
        let chunks = vec!["```\nhello\n```".to_owned()];
        let view = TextRenderer.render(&chunks[..], &ctx(1, 2, 2, 1));
        assert_eq!(view.content.as_deref(), Some("```\nhello\n```\nPage 1/2"));

        let view = TextRenderer.render(&chunks[..], &ctx(1, 1, 1, 1));
        assert_eq!(view.content.as_deref(), Some("```\nhello\n```"));
    }

    #[test]
    fn chunk_text_respects_max_size_and_wrapping() {
        let text = (0..40).map(|i| format!("line number {i}")).collect::<Vec<_>>().join("\n");
        let chunks = chunk_text(&text, "```", "```", 120);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 120, "chunk too long: {}", chunk.len());
            assert!(chunk.starts_with("```\n"));
            assert!(chunk.ends_with("\n```"));
        }
        assert!(chunks[0].contains("line number 0"));
        assert!(chunks.last().unwrap().contains("line number 39"));
    }

    #[test]
    fn chunk_text_splits_oversized_lines() {
        let text = "x".repeat(500);
        let chunks = chunk_text(&text, "```", "```", 120);
        assert!(chunks.len() >= 4);
        for chunk in &chunks {
            assert!(chunk.len() <= 120);
        }
    }

    #[test]
    fn chunk_text_empty_input_yields_one_page() {
        let chunks = chunk_text("", "```", "```", 2000);
        assert_eq!(chunks.len(), 1);
    }
}
