//! Turning assistant Markdown into safe display text
//!
//! Only assistant replies pass through a formatter. User text is always
//! displayed as plain text.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

pub trait Formatter {
    fn format(&self, markdown: &str) -> String;
}

/// Markdown to HTML for web front ends, paired with [`View::to_html`].
/// Raw HTML in the source is escaped and script-like link targets are
/// neutralized.
///
/// [`View::to_html`]: super::View::to_html
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormatter;

fn is_unsafe_url(url: &str) -> bool {
    let scheme = url.trim_start().to_ascii_lowercase();
    ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|s| scheme.starts_with(s))
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
    if is_unsafe_url(&url) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let events = Parser::new_ext(markdown, options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: neutralize(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: neutralize(dest_url),
                title,
                id,
            }),
            other => other,
        });

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

/// Markdown to plain lines for a terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalFormatter;

fn push_clean(out: &mut String, text: &str) {
    out.extend(text.chars().filter(|c| !c.is_control() || *c == '\n' || *c == '\t'));
}

fn ensure_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn block_break(out: &mut String) {
    if out.is_empty() {
        return;
    }
    ensure_line(out);
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
}

impl Formatter for TerminalFormatter {
    fn format(&self, markdown: &str) -> String {
        let mut out = String::new();
        let mut lists: Vec<Option<u64>> = Vec::new();
        let mut in_code = false;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::List(start)) => {
                    ensure_line(&mut out);
                    lists.push(start);
                }
                Event::End(TagEnd::List(_)) => {
                    lists.pop();
                    if lists.is_empty() {
                        block_break(&mut out);
                    }
                }
                Event::Start(Tag::Item) => {
                    ensure_line(&mut out);
                    out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                    match lists.last_mut() {
                        Some(Some(n)) => {
                            out.push_str(&format!("{}. ", n));
                            *n += 1;
                        }
                        _ => out.push_str("• "),
                    }
                }
                Event::End(TagEnd::Item) => ensure_line(&mut out),
                Event::Start(Tag::CodeBlock(_)) => {
                    ensure_line(&mut out);
                    in_code = true;
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code = false;
                    block_break(&mut out);
                }
                Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Heading(_)) => {
                    if lists.is_empty() {
                        block_break(&mut out);
                    } else {
                        ensure_line(&mut out);
                    }
                }
                Event::Text(text) if in_code => {
                    for line in text.lines() {
                        out.push_str("    ");
                        push_clean(&mut out, line);
                        out.push('\n');
                    }
                }
                Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                    push_clean(&mut out, &text)
                }
                Event::Code(code) => {
                    out.push('`');
                    push_clean(&mut out, &code);
                    out.push('`');
                }
                Event::SoftBreak => out.push(' '),
                Event::HardBreak => out.push('\n'),
                Event::Rule => {
                    ensure_line(&mut out);
                    out.push_str("────────");
                    block_break(&mut out);
                }
                _ => {}
            }
        }

        out.trim_end().to_string()
    }
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
