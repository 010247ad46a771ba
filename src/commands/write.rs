use serde_json::Value;

use crate::commands::list::render_view;
use crate::commands::{find_resource, Session};
use crate::models::Record;
use crate::resources::ResourceConfig;
use crate::services::{list_service, write_service};
use crate::utils::banner;

/// JSON object at the end of the raw input line
fn json_argument(line: &str, usage: &str) -> Result<Value, String> {
    let start = line.find('{').ok_or_else(|| usage.to_string())?;
    serde_json::from_str(&line[start..]).map_err(|e| format!("Invalid JSON: {}", e))
}

/// Records of the open view when it shows `resource`
fn loaded_records(session: &Session, resource: &ResourceConfig) -> Option<Vec<Record>> {
    session
        .view
        .as_ref()
        .filter(|view| view.resource.name == resource.name && view.has_data())
        .map(|view| view.records().to_vec())
}

/// Refetch the open view after a write to `resource`, and render it under `summary`
async fn refetch_after_write(session: &mut Session, resource: &ResourceConfig, summary: String) -> String {
    let source = session.source.clone();
    match session.view.as_mut() {
        Some(view) if view.resource.name == resource.name => {
            let query = view.refresh();
            list_service::load(view, source.as_ref(), query).await;
            format!("{}\n{}", summary, render_view(view))
        }
        _ => summary,
    }
}

/// `create <resource> <json>`
pub async fn create(session: &mut Session, args: &[&str], line: &str) -> Result<String, String> {
    const USAGE: &str = "Usage: create <resource> {\"field\": \"value\", ...}";
    let name = args.first().ok_or(USAGE)?;
    let resource = find_resource(name)?;
    let body = json_argument(line, USAGE)?;

    let loaded = loaded_records(session, resource);
    write_service::create(session.source.as_ref(), resource, body, loaded.as_deref())
        .await
        .map_err(|e| banner(&e))?;

    let summary = format!("✅ Created {} record", resource.name);
    Ok(refetch_after_write(session, resource, summary).await)
}

/// `update <resource> <id> <json>`
pub async fn update(session: &mut Session, args: &[&str], line: &str) -> Result<String, String> {
    const USAGE: &str = "Usage: update <resource> <id> {\"field\": \"value\", ...}";
    let (name, id) = match args {
        [name, id, ..] if !id.starts_with('{') => (*name, *id),
        _ => return Err(USAGE.to_string()),
    };
    let resource = find_resource(name)?;
    let body = json_argument(line, USAGE)?;

    let loaded = loaded_records(session, resource);
    write_service::update(session.source.as_ref(), resource, id, body, loaded.as_deref())
        .await
        .map_err(|e| banner(&e))?;

    let summary = format!("✅ Updated {} record {}", resource.name, id);
    Ok(refetch_after_write(session, resource, summary).await)
}

/// `delete <resource> <id>`
pub async fn delete(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let (name, id) = match args {
        [name, id] => (*name, *id),
        _ => return Err("Usage: delete <resource> <id>".to_string()),
    };
    let resource = find_resource(name)?;

    write_service::delete(session.source.as_ref(), resource, id)
        .await
        .map_err(|e| banner(&e))?;

    let summary = format!("✅ Deleted {} record {}", resource.name, id);
    Ok(refetch_after_write(session, resource, summary).await)
}
