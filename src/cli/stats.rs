use tabled::Table;

use crate::{
    Res, config::Settings, info, ledger::SqliteLedger, types::LedgerTableRow, warning,
};

pub async fn stats() -> Res<()> {
    let settings = Settings::from_env()?;
    if !settings.ledger_path.is_file() {
        warning!(
            "No ledger at {}. Run genrelists build first.",
            settings.ledger_path.display()
        );
        return Ok(());
    }

    let ledger = SqliteLedger::open(&settings.ledger_path)?;
    let rows: Vec<LedgerTableRow> = ledger
        .playlist_track_counts()?
        .into_iter()
        .map(|(playlist, tracks)| LedgerTableRow { playlist, tracks })
        .collect();

    if rows.is_empty() {
        info!("No tracks recorded yet.");
    } else {
        println!("{}", Table::new(rows));
    }

    info!("{} tracks without genre", ledger.genreless_count()?);
    Ok(())
}
