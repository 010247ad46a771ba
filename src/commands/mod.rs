pub mod dashboard;
pub mod detail;
pub mod help;
pub mod list;
pub mod settings;
pub mod write;

use std::sync::Arc;

use tracing::debug;

use crate::api::admin::AdminTransport;
use crate::resources::{self, ResourceConfig};
use crate::services::list_service::ListView;

/// Console state: the backend and the list view currently open
pub struct Session {
    pub source: Arc<dyn AdminTransport>,
    pub page_size: usize,
    pub view: Option<ListView>,
}

impl Session {
    pub fn new(source: Arc<dyn AdminTransport>, page_size: usize) -> Self {
        Self {
            source,
            page_size,
            view: None,
        }
    }
}

/// Look up a resource by name or alias, with a hint listing the valid names
pub fn find_resource(name: &str) -> Result<&'static ResourceConfig, String> {
    resources::find(name).ok_or_else(|| {
        let names: Vec<&str> = resources::all().iter().map(|r| r.name).collect();
        format!("Unknown resource '{}'. Try one of: {}", name, names.join(", "))
    })
}

/// Run one input line. Returns `None` when the operator asked to quit.
pub async fn handle_line(session: &mut Session, line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Some(String::new());
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "quit" | "exit" | "q" => return None,
        "help" | "?" => help::execute(),
        "resources" | "ls" => list::list_resources(),
        "open" => list::open(session, args).await,
        "refresh" | "reload" => list::refresh(session).await,
        "search" | "s" => list::search(session, args).await,
        "filter" | "f" => list::filter(session, args).await,
        "unfilter" => list::unfilter(session, args).await,
        "page" | "p" => list::page(session, args).await,
        "next" | "n" => list::next(session).await,
        "prev" | "previous" => list::prev(session).await,
        "user" => detail::user(session, args).await,
        "wallet" => detail::wallet(session, args).await,
        "dashboard" | "stats" => dashboard::execute(session).await,
        "settings" => settings::execute(session, args).await,
        "create" => write::create(session, args, line).await,
        "update" => write::update(session, args, line).await,
        "delete" | "rm" => write::delete(session, args).await,
        _ => Err(format!("Unknown command '{}'. Type `help` for a list of commands", parts[0])),
    };

    Some(match result {
        Ok(output) => output,
        Err(e) => {
            debug!("Command {} failed: {}", command, e);
            user_message(e)
        }
    })
}

/// Banner lines from API errors pass through; anything else gets the error marker
fn user_message(error: String) -> String {
    let error = error.trim().to_string();
    if error.is_empty() {
        "❌ An error occurred while executing the command.".to_string()
    } else if error.starts_with(['❌', '⚠', '🔒']) {
        error
    } else {
        format!("❌ {}", error)
    }
}
