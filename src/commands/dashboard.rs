use crate::api::admin::DashboardStats;
use crate::commands::Session;
use crate::services::detail_service;
use crate::utils::{banner, Table};

/// `dashboard` - headline totals
pub async fn execute(session: &mut Session) -> Result<String, String> {
    let stats = detail_service::get_dashboard_stats(session.source.as_ref())
        .await
        .map_err(|e| format!("Failed to load dashboard stats. {}", banner(&e)))?;
    Ok(render_stats(&stats))
}

fn render_stats(stats: &DashboardStats) -> String {
    let mut table = Table::new(vec!["Metric", "Total"]);
    for (label, value) in [
        ("Total Users", stats.total_users),
        ("Total Coupons", stats.total_coupons),
        ("Wallet Orders", stats.total_orders),
        ("Internal Users", stats.total_internal_users),
    ] {
        table.add_row(vec![label.to_string(), value.to_string()]);
    }
    format!("📊 Dashboard\n{}", table.render())
}
