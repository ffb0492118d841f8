use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use lottomax_db::rusqlite::Connection;
use std::path::Path;

use lottomax_db::db::insert_draw;
use lottomax_db::models::{validate_draw, Draw, LotteryConfig};

/// Vérifie la date ISO et en dérive l'année. C'est l'unique endroit où une
/// date est interprétée : le moteur statistique reçoit l'année déjà calculée.
pub fn parse_iso_date(s: &str) -> Result<(String, i32)> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Date invalide : '{}'", s))?;
    Ok((date.format("%Y-%m-%d").to_string(), date.year()))
}

/// Format CSV : en-tête puis `date,year,number_1,...,number_7`.
pub(crate) fn parse_record(record: &csv::StringRecord, config: &LotteryConfig) -> Result<Draw> {
    let get = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .map(|s| s.trim())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let (date, year) = parse_iso_date(get(0)?)?;

    let year_col: i32 = get(1)?
        .parse()
        .with_context(|| format!("Année invalide : '{}'", get(1).unwrap_or_default()))?;
    if year_col != year {
        bail!("Tirage du {} : année {} incohérente avec la date", date, year_col);
    }

    let numbers: Vec<u8> = (0..config.draw_size)
        .map(|i| {
            let s = get(2 + i)?;
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser '{}' (index {})", s, 2 + i))
        })
        .collect::<Result<_>>()?;

    let draw = Draw { date, year, numbers };
    validate_draw(&draw, config)?;
    Ok(draw)
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path, config: &LotteryConfig) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record, config) {
                Ok(draw) => match insert_draw(&tx, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        eprintln!("Erreur insertion tirage {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    eprintln!("Erreur parsing ligne {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
