use crate::format::{date_or_missing, money, text_or_missing};
use analytics::{PlayerTotals, ReportTotals};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};

const HEADERS: [&str; 9] = [
    "User_ID",
    "User_Name",
    "Network_ID",
    "Total_Bet",
    "Total_Win",
    "Total_Rake",
    "Hands",
    "Start_Date",
    "End_Date",
];

/// Columns holding numbers, right-aligned.
const NUMERIC_COLUMNS: [usize; 4] = [3, 4, 5, 6];

/// Renders the ranked players as a console table, with a trailing `TOTALS` row.
pub fn render_table(players: &[PlayerTotals], totals: &ReportTotals) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(HEADERS);

    for player in players {
        table.add_row(vec![
            player.player_id.to_string(),
            text_or_missing(player.name.as_deref()),
            text_or_missing(player.network_id.as_deref()),
            money(player.total_bet),
            money(player.total_win),
            money(player.total_rake),
            player.hand_count.to_string(),
            date_or_missing(player.earliest_start),
            date_or_missing(player.latest_end),
        ]);
    }

    table.add_row(vec![
        "TOTALS".to_string(),
        String::new(),
        String::new(),
        money(totals.total_bet),
        money(totals.total_win),
        money(totals.total_rake),
        totals.total_hands.to_string(),
        String::new(),
        String::new(),
    ]);

    for index in NUMERIC_COLUMNS {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// The summary block printed under the table.
pub fn render_summary(totals: &ReportTotals) -> String {
    [
        "Summary:".to_string(),
        format!("- Total Users: {}", totals.users),
        format!("- Total Bet Amount: ${}", money(totals.total_bet)),
        format!("- Total Win Amount: ${}", money(totals.total_win)),
        format!("- Total Rake: ${}", money(totals.total_rake)),
        format!("- Total Hands: {}", totals.total_hands),
        format!("- Net Result: ${}", money(totals.net())),
    ]
    .join("\n")
}

/// Title, table and summary, ready to print.
pub fn render_report(title: &str, players: &[PlayerTotals], totals: &ReportTotals) -> String {
    format!(
        "=== {} ===\n{}\n\n{}",
        title,
        render_table(players, totals),
        render_summary(totals)
    )
}
