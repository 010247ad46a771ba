const SECTIONS: [(&str, &str); 5] = [
    (
        "📋 Lists",
        "`resources` - List every resource\n\
         `open <resource>` - Load a list (orders, users, coins-history, coupons, ...)\n\
         `refresh` - Reload the current page",
    ),
    (
        "🔎 Search & Filters",
        "`search [term]` - Search the open list (no term clears it)\n\
         `filter` - Show filter fields\n\
         `filter <key> <value>` - Add a filter, e.g. `filter financial_status paid`\n\
         `unfilter <key>` / `filter clear` - Remove filters",
    ),
    (
        "📄 Pages",
        "`page <n>` - Jump to a page (offset lists)\n\
         `next` / `prev` - Move one page (works for cursor lists too)",
    ),
    (
        "👤 Details & Settings",
        "`user <id>` - User details and coin history\n\
         `wallet <order id>` - Wallet record of an order\n\
         `dashboard` - Totals\n\
         `settings` / `settings set <key> <value>` - General settings",
    ),
    (
        "✏️ Writes",
        "`create <resource> <json>` - e.g. `create coupons {\"name\": ...}`\n\
         `update <resource> <id> <json>` - Only the given fields change\n\
         `delete <resource> <id>`\n\
         `quit` - Leave the console",
    ),
];

pub fn execute() -> Result<String, String> {
    let mut output = String::from("📖 Loyalty Admin Console\n");
    for (title, body) in SECTIONS {
        output.push('\n');
        output.push_str(title);
        output.push('\n');
        for line in body.lines() {
            output.push_str("  ");
            output.push_str(line.trim());
            output.push('\n');
        }
    }
    Ok(output)
}
