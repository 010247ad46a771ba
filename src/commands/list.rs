use crate::commands::{find_resource, Session};
use crate::models::Query;
use crate::resources;
use crate::services::list_service::{self, ListView, LoadState, Navigation};
use crate::utils::Table;

const NO_LIST_OPEN: &str = "No list is open. Use `open <resource>` first";

/// `resources` - every list view and its aliases
pub fn list_resources() -> Result<String, String> {
    let mut table = Table::new(vec!["Resource", "Aliases", "Paging", "Filters"]);
    for resource in resources::all() {
        let filters: Vec<&str> = resource.filter_fields.iter().map(|f| f.key).collect();
        table.add_row(vec![
            resource.name.to_string(),
            resource.aliases.join(", "),
            format!("{:?}", resource.primary.style).to_lowercase(),
            filters.join(", "),
        ]);
    }
    Ok(format!("📚 Resources\n{}", table.render()))
}

/// `open <resource>`
pub async fn open(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let name = args.first().ok_or("Usage: open <resource>")?;
    let resource = find_resource(name)?;

    let source = session.source.clone();
    let view = session
        .view
        .insert(ListView::new(resource, session.page_size));
    list_service::load(view, source.as_ref(), Query::new()).await;

    Ok(render_view(view))
}

/// `refresh`
pub async fn refresh(session: &mut Session) -> Result<String, String> {
    let source = session.source.clone();
    let view = session.view.as_mut().ok_or(NO_LIST_OPEN)?;
    let query = view.refresh();
    list_service::load(view, source.as_ref(), query).await;
    Ok(render_view(view))
}

/// `search [term...]`; no term clears the search
pub async fn search(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let term = args.join(" ");
    navigate_with(session, |view| view.set_search(&term)).await
}

/// `filter <key> <value...>`, `filter clear`, or `filter` to list the filter fields
pub async fn filter(session: &mut Session, args: &[&str]) -> Result<String, String> {
    match args {
        [] => {
            let view = session.view.as_ref().ok_or(NO_LIST_OPEN)?;
            Ok(describe_filters(view))
        }
        ["clear"] => navigate_with(session, |view| view.clear_filters()).await,
        [key, value @ ..] if !value.is_empty() => {
            let value = value.join(" ");
            navigate_with(session, |view| view.set_filter(key, &value)).await
        }
        _ => Err("Usage: filter <key> <value> | filter clear".to_string()),
    }
}

/// `unfilter <key>`
pub async fn unfilter(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let key = args.first().ok_or("Usage: unfilter <key>")?;
    navigate_with(session, |view| view.clear_filter(key)).await
}

/// `page <n>`
pub async fn page(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let page = args
        .first()
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or("Usage: page <number>")?;
    navigate_with(session, |view| view.goto_page(page)).await
}

pub async fn next(session: &mut Session) -> Result<String, String> {
    navigate_with(session, |view| view.next()).await
}

pub async fn prev(session: &mut Session) -> Result<String, String> {
    navigate_with(session, |view| view.prev()).await
}

async fn navigate_with<F>(session: &mut Session, step: F) -> Result<String, String>
where
    F: FnOnce(&mut ListView) -> Navigation,
{
    let source = session.source.clone();
    let view = session.view.as_mut().ok_or(NO_LIST_OPEN)?;
    let navigation = step(view);
    list_service::navigate(view, source.as_ref(), navigation).await?;
    Ok(render_view(view))
}

fn describe_filters(view: &ListView) -> String {
    let resource = view.resource;
    if resource.filter_fields.is_empty() {
        return format!("{} has no filter fields", resource.title);
    }

    let mut table = Table::new(vec!["Filter", "Values", "Active"]);
    for field in &resource.filter_fields {
        table.add_row(vec![
            field.key.to_string(),
            if field.choices.is_empty() {
                "any".to_string()
            } else {
                field.choices.join(" | ")
            },
            view.query().filters.get(field.key).cloned().unwrap_or_default(),
        ]);
    }
    format!("🔎 {} filters\n{}", resource.title, table.render())
}

/// Title, error banner, table and pagination footer of a list view
pub fn render_view(view: &ListView) -> String {
    let resource = view.resource;
    let mut output = format!("📋 {}", resource.title);

    let query = view.query();
    let mut criteria: Vec<String> = Vec::new();
    if let Some(term) = query.search_term() {
        criteria.push(format!("search \"{}\"", term));
    }
    criteria.extend(query.active_filters().map(|(k, v)| format!("{}={}", k, v)));
    if !criteria.is_empty() {
        output.push_str(&format!(" ({})", criteria.join(", ")));
    }
    if let Some(endpoint) = view.endpoint().filter(|e| *e != resource.primary.path) {
        output.push_str(&format!(" [via {}]", endpoint));
    }
    output.push('\n');

    if let LoadState::Error(message) = view.state() {
        output.push_str(message);
        output.push('\n');
        if !view.has_data() {
            return output;
        }
    }

    let rows = view.visible();
    if rows.is_empty() {
        output.push_str(&format!("No {} found.\n", resource.name.replace('-', " ")));
    } else {
        let mut headers = vec!["#"];
        headers.extend(resource.columns.iter().map(|c| c.header));
        let mut table = Table::new(headers);

        for (i, record) in rows.iter().enumerate() {
            let mut row = vec![(view.row_offset() + i + 1).to_string()];
            row.extend(resource.columns.iter().map(|c| c.cell.render(record)));
            table.add_row(row);
        }
        output.push_str(&table.render());
    }

    if let Some(controls) = view.controls() {
        output.push_str(&controls.render());
        output.push('\n');
    }

    output
}
