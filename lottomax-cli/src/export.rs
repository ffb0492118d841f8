use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use lottomax_db::models::Draw;
use lottomax_stats::distribution::DistributionStats;
use lottomax_stats::gaps::NumberGaps;
use lottomax_stats::hot_cold::HotColdReport;

/// Rapport complet, sérialisable en JSON. Les combinaisons sont tronquées
/// aux `top` premières par taille, le reste serait illisible.
#[derive(Debug, Serialize)]
pub struct FullReport {
    pub draw_count: usize,
    pub frequencies: Vec<(u8, u32)>,
    /// Par taille de combinaison : les combinaisons les plus fréquentes,
    /// clé rendue sous la forme "3-7-21".
    pub combinations: BTreeMap<usize, Vec<(String, u32)>>,
    pub yearly: BTreeMap<i32, Vec<(u8, u32)>>,
    pub distribution: Option<DistributionStats>,
    pub hot_cold: HotColdReport,
    pub gaps: Vec<NumberGaps>,
}

pub fn combo_key(combo: &[u8]) -> String {
    combo
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn write_report_json(report: &FullReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Échec de la sérialisation")?;
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

/// Exporte l'historique brut : en-tête puis `date,year,number_1,...,number_7`,
/// le format que l'import relit.
pub fn export_draws_csv(draws: &[Draw], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Impossible d'écrire {:?}", path))?;

    let draw_size = draws.iter().map(|d| d.numbers.len()).max().unwrap_or(7);
    let mut header = vec!["date".to_string(), "year".to_string()];
    for i in 1..=draw_size {
        header.push(format!("number_{}", i));
    }
    writer.write_record(&header)?;

    for draw in draws {
        let mut record = vec![draw.date.clone(), draw.year.to_string()];
        record.extend(draw.numbers.iter().map(|n| n.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush().context("Échec de l'écriture CSV")?;
    Ok(())
}
