use crate::api::admin::GeneralSettings;
use crate::commands::Session;
use crate::services::detail_service;
use crate::utils::{banner, Table};

/// `settings` or `settings set <key> <value...>`
pub async fn execute(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let source = session.source.as_ref();
    match args {
        [] => {
            let settings = detail_service::get_general_settings(source)
                .await
                .map_err(|e| banner(&e))?;
            Ok(render_settings(&settings))
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let settings = detail_service::update_general_settings(source, key, &value.join(" "))
                .await
                .map_err(|e| banner(&e))?;
            Ok(format!("✅ Settings saved\n{}", render_settings(&settings)))
        }
        _ => Err("Usage: settings | settings set <min_order_value|support_contact> <value>".to_string()),
    }
}

fn render_settings(settings: &GeneralSettings) -> String {
    let mut table = Table::new(vec!["Setting", "Value"]);
    table.add_row(vec!["min_order_value".to_string(), settings.min_order_value.clone()]);
    table.add_row(vec!["support_contact".to_string(), settings.support_contact.clone()]);
    format!("⚙️ General Settings\n{}", table.render())
}
