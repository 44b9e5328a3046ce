//! Terminal chat client for the EduBot relay
//!
//! Type a question and press Enter. Commands:
//! - `/new` starts a new chat
//! - `/topic <name>` puts a suggested question in the draft
//! - `/more <text>` appends to the draft
//! - `/draft` shows the draft. An empty line sends it.
//! - `/quit` exits

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edubot::client::render::{render, Body, View};
use edubot::client::suggestions::{topic_prompt, QUICK_TOPICS};
use edubot::client::{ConversationManager, HttpRelayClient, RelayClient, TerminalFormatter};

fn print_view(view: &View, from: usize) {
    if let Some(welcome) = &view.welcome {
        println!("{}\n{}\n", welcome.title, welcome.subtitle);
        for chip in welcome.suggestions {
            println!("  • {}", chip.prompt);
        }
        let topics: Vec<&str> = QUICK_TOPICS.iter().map(|(name, _)| *name).collect();
        println!("\nQuick topics: {}\n", topics.join(", "));
    }

    for entry in view.entries.iter().skip(from) {
        let text = match &entry.body {
            Body::Plain(text) | Body::Formatted(text) => text,
        };
        println!("[{}] {}:\n{}\n", entry.time, entry.label, text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edubot=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EDUBOT_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
    let relay = HttpRelayClient::new(base_url)?;
    tracing::info!("Using relay at {}", relay.base_url());

    let formatter = TerminalFormatter;
    let mut manager = ConversationManager::new();
    let mut shown = 0;
    print_view(&render(&manager, &formatter), shown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        let request = match input.split_once(' ').unwrap_or((input, "")) {
            ("/quit", _) => break,
            ("/new", _) => {
                manager.reset();
                shown = 0;
                print_view(&render(&manager, &formatter), shown);
                continue;
            }
            ("/topic", topic) => {
                manager.insert_suggestion(&topic_prompt(topic));
                println!("Draft: {}", manager.draft());
                continue;
            }
            ("/more", fragment) => {
                manager.append_suggestion_fragment(fragment);
                println!("Draft: {}", manager.draft());
                continue;
            }
            ("/draft", _) => {
                println!("Draft: {}", manager.draft());
                continue;
            }
            ("", _) => manager.submit_draft(),
            _ => manager.submit(input),
        };

        let Some(request) = request else {
            continue;
        };

        let view = render(&manager, &formatter);
        print_view(&view, shown);
        shown = view.entries.len();
        if view.typing_indicator {
            println!("EduBot is typing...");
        }

        let outcome = relay.send(&request).await;
        manager.complete(request.ticket, outcome);

        let view = render(&manager, &formatter);
        print_view(&view, shown);
        shown = view.entries.len();
    }

    Ok(())
}
