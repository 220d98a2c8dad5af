//! Title and paragraph extraction from chapter markup.
//!
//! Elements are located with regular expressions and their inner markup is
//! flattened to plain text with `html2text`, so entities are decoded and inline
//! tags disappear without any decoration characters being added.

use html2text::render::text_renderer::TrivialDecorator;
use regex::Regex;
use std::borrow::Cow;

/// Wide enough that html2text never hard-wraps a paragraph.
const RENDER_WIDTH: usize = 10_000;

pub struct MarkupSplitter {
    hidden: Regex,
    heading: Regex,
    title: Regex,
    paragraph: Regex,
}

impl Default for MarkupSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupSplitter {
    pub fn new() -> Self {
        Self {
            hidden: Regex::new(
                r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
            )
            .unwrap(),
            heading: Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").unwrap(),
            title: Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap(),
            paragraph: Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").unwrap(),
        }
    }

    /// Split one document into its title and its speakable paragraphs.
    pub fn split(&self, markup: &str) -> (Option<String>, Vec<String>) {
        (self.extract_title(markup), self.extract_paragraphs(markup))
    }

    /// First non-empty `<h1>`, else `<title>`, else the first `<p>`.
    pub fn extract_title(&self, markup: &str) -> Option<String> {
        let markup = self.visible(markup);
        [&self.heading, &self.title, &self.paragraph]
            .into_iter()
            .find_map(|pattern| {
                pattern
                    .captures_iter(&markup)
                    .filter_map(|caps| caps.get(1))
                    .map(|inner| element_text(inner.as_str()))
                    .find(|text| !text.is_empty())
            })
    }

    /// Text of every `<p>` in document order, trimmed, empties dropped.
    pub fn extract_paragraphs(&self, markup: &str) -> Vec<String> {
        let markup = self.visible(markup);
        self.paragraph
            .captures_iter(&markup)
            .filter_map(|caps| caps.get(1))
            .map(|inner| element_text(inner.as_str()))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Markup with comments, scripts and stylesheets removed.
    fn visible<'a>(&self, markup: &'a str) -> Cow<'a, str> {
        self.hidden.replace_all(markup, "")
    }
}

fn element_text(inner_html: &str) -> String {
    html2text::from_read_with_decorator(inner_html.as_bytes(), RENDER_WIDTH, TrivialDecorator::new())
        .trim()
        .to_string()
}
