use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    date      TEXT PRIMARY KEY,
    year      INTEGER NOT NULL,
    number_1  INTEGER NOT NULL,
    number_2  INTEGER NOT NULL,
    number_3  INTEGER NOT NULL,
    number_4  INTEGER NOT NULL,
    number_5  INTEGER NOT NULL,
    number_6  INTEGER NOT NULL,
    number_7  INTEGER NOT NULL
);
";

/// Nombre de colonnes de numéros du schéma. Le stockage est figé au format
/// Lotto Max (7 numéros) ; d'autres configurations passent par leur propre
/// import.
const STORED_DRAW_SIZE: usize = 7;

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lottomax.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("Échec de la migration")?;
    Ok(())
}

/// Insère un tirage ; retourne `false` si la date existait déjà (doublon).
pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    if draw.numbers.len() != STORED_DRAW_SIZE {
        bail!(
            "Tirage du {} : {} numéros, le stockage en attend {}",
            draw.date,
            draw.numbers.len(),
            STORED_DRAW_SIZE
        );
    }
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO draws (date, year, number_1, number_2, number_3, number_4, number_5, number_6, number_7)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                draw.date,
                draw.year,
                draw.numbers[0],
                draw.numbers[1],
                draw.numbers[2],
                draw.numbers[3],
                draw.numbers[4],
                draw.numbers[5],
                draw.numbers[6],
            ],
        )
        .context("Échec de l'insertion")?;
    Ok(changed > 0)
}

fn row_to_draw(row: &rusqlite::Row<'_>) -> rusqlite::Result<Draw> {
    Ok(Draw {
        date: row.get(0)?,
        year: row.get(1)?,
        numbers: vec![
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
            row.get::<_, u8>(7)?,
            row.get::<_, u8>(8)?,
        ],
    })
}

/// Historique complet en ordre chronologique croissant.
pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT date, year, number_1, number_2, number_3, number_4, number_5, number_6, number_7
         FROM draws ORDER BY date ASC",
    )?;
    let draws = stmt
        .query_map([], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

/// Les `limit` tirages les plus récents, du plus récent au plus ancien.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT date, year, number_1, number_2, number_3, number_4, number_5, number_6, number_7
         FROM draws ORDER BY date DESC LIMIT ?1",
    )?;
    let draws = stmt
        .query_map([limit], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
