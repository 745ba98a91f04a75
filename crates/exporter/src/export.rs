use crate::error::ExportError;
use crate::format::{date_or_missing, exact, text_or_missing};
use analytics::PlayerTotals;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 9] = [
    "User_ID",
    "User_Name",
    "Network_ID",
    "Total_Bet_Amount",
    "Total_Win_Amount",
    "Total_Rake",
    "Total_Hands",
    "Start_Date",
    "End_Date",
];

/// `<dir>/<prefix>_<YYYY-MM-DD>.csv`
pub fn default_csv_path(dir: &Path, prefix: &str, today: NaiveDate) -> PathBuf {
    dir.join(format!("{}_{}.csv", prefix, today.format("%Y-%m-%d")))
}

/// Writes one CSV line per player, in the given order, after the header.
pub fn write_csv<W: Write>(writer: W, players: &[PlayerTotals]) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for player in players {
        out.write_record([
            player.player_id.to_string(),
            text_or_missing(player.name.as_deref()),
            text_or_missing(player.network_id.as_deref()),
            exact(player.total_bet),
            exact(player.total_win),
            exact(player.total_rake),
            player.hand_count.to_string(),
            date_or_missing(player.earliest_start),
            date_or_missing(player.latest_end),
        ])?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report to it.
pub fn export_csv(path: &Path, players: &[PlayerTotals]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, players)?;
    tracing::info!(path = %path.display(), rows = players.len(), "Exported report to CSV.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::PlayerId;
    use rust_decimal_macros::dec;

    fn players() -> Vec<PlayerTotals> {
        vec![
            PlayerTotals {
                player_id: PlayerId(5904209),
                name: Some("bob, the second".to_string()),
                network_id: Some("12".to_string()),
                total_bet: dec!(65.50),
                total_win: dec!(0),
                total_rake: dec!(10),
                hand_count: 3,
                earliest_start: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()),
                latest_end: Some(Utc.with_ymd_and_hms(2025, 6, 30, 23, 0, 0).unwrap()),
            },
            PlayerTotals {
                player_id: PlayerId(4815318),
                name: None,
                network_id: None,
                total_bet: dec!(80),
                total_win: dec!(120),
                total_rake: dec!(3),
                hand_count: 1,
                earliest_start: None,
                latest_end: None,
            },
        ]
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &players()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "User_ID,User_Name,Network_ID,Total_Bet_Amount,Total_Win_Amount,Total_Rake,Total_Hands,Start_Date,End_Date"
        );
        assert_eq!(
            lines[1],
            "5904209,\"bob, the second\",12,65.5,0,10,3,2025-06-01,2025-06-30"
        );
        assert_eq!(lines[2], "4815318,N/A,N/A,80,120,3,1,N/A,N/A");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn exports_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let path = default_csv_path(dir.path(), "user_stats", today);
        assert!(path.ends_with("user_stats_2025-07-01.csv"));

        export_csv(&path, &players()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("User_ID,"));
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let result = export_csv(&path, &players());
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
