//! Pure view description of a conversation

use chrono::Local;
use serde::Serialize;

use super::format::{escape_html, Formatter};
use super::suggestions::{Suggestion, WELCOME_CHIPS};
use super::{ConversationManager, Sender};

pub const WELCOME_TITLE: &str = "Welcome to EduBot Pro";
pub const WELCOME_SUBTITLE: &str = "Your intelligent educational assistant. Ask me anything about learning, get help with homework, or explore new topics!";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// Present only while the history is empty
    pub welcome: Option<Welcome>,
    pub entries: Vec<ViewEntry>,
    pub typing_indicator: bool,
    pub draft: String,
    pub send_enabled: bool,
    /// Entry the view should be scrolled to
    pub scroll_to: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Welcome {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub suggestions: &'static [Suggestion],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEntry {
    pub sender: Sender,
    pub label: &'static str,
    /// Local time as `HH:MM`
    pub time: String,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Body {
    /// Must be displayed as text, never interpreted as markup
    Plain(String),
    /// Formatter output, safe to display as-is
    Formatted(String),
}

pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Assistant => "EduBot",
    }
}

/// Describe what the chat window should show.
pub fn render(manager: &ConversationManager, formatter: &dyn Formatter) -> View {
    let entries: Vec<ViewEntry> = manager
        .history()
        .iter()
        .map(|message| ViewEntry {
            sender: message.sender(),
            label: sender_label(message.sender()),
            time: message
                .timestamp()
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string(),
            body: match message.sender() {
                Sender::User => Body::Plain(message.content().to_string()),
                Sender::Assistant => Body::Formatted(formatter.format(message.content())),
            },
        })
        .collect();

    View {
        welcome: entries.is_empty().then_some(Welcome {
            title: WELCOME_TITLE,
            subtitle: WELCOME_SUBTITLE,
            suggestions: WELCOME_CHIPS,
        }),
        scroll_to: entries.len().checked_sub(1),
        entries,
        typing_indicator: manager.is_in_flight(),
        draft: manager.draft().to_string(),
        send_enabled: !manager.is_in_flight(),
    }
}

impl View {
    /// Message list as HTML, for a web front end embedding the client.
    /// Assumes the view was rendered with an HTML-producing formatter.
    pub fn to_html(&self) -> String {
        let mut out = String::new();

        if let Some(welcome) = &self.welcome {
            out.push_str(&format!(
                "<div class=\"welcome-screen\"><h1>{}</h1><p>{}</p><div class=\"suggestion-chips\">",
                escape_html(welcome.title),
                escape_html(welcome.subtitle)
            ));
            for chip in welcome.suggestions {
                out.push_str(&format!(
                    "<button class=\"suggestion-chip\" data-prompt=\"{}\">{}</button>",
                    escape_html(chip.prompt),
                    escape_html(chip.label)
                ));
            }
            out.push_str("</div></div>");
        }

        for entry in &self.entries {
            let (class, content) = match &entry.body {
                Body::Plain(text) => ("user", escape_html(text)),
                Body::Formatted(html) => ("assistant", html.clone()),
            };
            out.push_str(&format!(
                "<div class=\"message {}\"><div class=\"message-header\"><span class=\"message-sender\">{}</span><span class=\"message-time\">{}</span></div><div class=\"message-content\">{}</div></div>",
                class, entry.label, entry.time, content
            ));
        }

        if self.typing_indicator {
            out.push_str("<div class=\"message assistant typing-indicator\"><span class=\"message-sender\">EduBot</span><div class=\"typing-dots\"></div></div>");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{HtmlFormatter, TerminalFormatter};

    #[test]
    fn test_initial_view_shows_welcome() {
        let manager = ConversationManager::new();
        let view = render(&manager, &HtmlFormatter);

        let welcome = view.welcome.as_ref().unwrap();
        assert_eq!(welcome.title, WELCOME_TITLE);
        assert_eq!(welcome.suggestions.len(), 4);
        assert!(view.entries.is_empty());
        assert!(view.send_enabled);
        assert!(!view.typing_indicator);
        assert_eq!(view.scroll_to, None);
    }

    #[test]
    fn test_pending_view() {
        let mut manager = ConversationManager::new();
        manager.submit("What is **bold**?").unwrap();
        let view = render(&manager, &HtmlFormatter);

        assert!(view.welcome.is_none());
        assert!(view.typing_indicator);
        assert!(!view.send_enabled);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].label, "You");
        assert_eq!(view.entries[0].body, Body::Plain("What is **bold**?".into()));
        assert_eq!(view.entries[0].time.len(), 5);
    }

    #[test]
    fn test_assistant_reply_is_formatted() {
        let mut manager = ConversationManager::new();
        let request = manager.submit("What is an atom?").unwrap();
        manager.on_relay_success(request.ticket, "An **atom** is tiny.");

        let view = render(&manager, &TerminalFormatter);
        assert_eq!(view.entries[1].label, "EduBot");
        assert_eq!(view.entries[1].body, Body::Formatted("An atom is tiny.".into()));
        assert_eq!(view.scroll_to, Some(1));
        assert!(!view.typing_indicator);
    }

    #[test]
    fn test_html_escapes_user_text_only() {
        let mut manager = ConversationManager::new();
        let request = manager.submit("<script>alert('x')</script>").unwrap();
        manager.on_relay_success(request.ticket, "Use *emphasis*.");

        let html = render(&manager, &HtmlFormatter).to_html();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_reset_restores_welcome() {
        let mut manager = ConversationManager::new();
        manager.submit("What is an atom?").unwrap();
        manager.reset();

        let view = render(&manager, &HtmlFormatter);
        assert!(view.welcome.is_some());
        assert!(view.send_enabled);
        assert!(view.to_html().contains("suggestion-chip"));
    }
}
