mod display;
mod export;
mod import;

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use lottomax_db::db::{
    count_draws, db_path, fetch_all_draws, fetch_last_draws, insert_draw, migrate, open_db,
};
use lottomax_db::models::{validate_draw, validate_draws, Draw, LotteryConfig};
use lottomax_db::rusqlite::Connection;
use lottomax_stats::combinations::{combination_frequencies, ranked_combinations};
use lottomax_stats::distribution::distribution_stats;
use lottomax_stats::frequency::{number_frequencies, ranked_frequencies};
use lottomax_stats::gaps::gap_patterns;
use lottomax_stats::hot_cold::hot_cold_report;
use lottomax_stats::yearly::frequencies_by_year;

use crate::display::{
    display_combinations, display_distribution, display_draws, display_frequencies,
    display_gaps, display_hot_cold, display_import_summary, display_yearly,
};
use crate::export::{combo_key, export_draws_csv, write_report_json, FullReport};
use crate::import::{import_csv, parse_iso_date};

#[derive(Parser)]
#[command(name = "lottomax", about = "Analyseur statistique des tirages Lotto Max")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV (date,year,number_1..7)
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/lotto_max_draws.csv")]
        file: PathBuf,
    },

    /// Ajouter un tirage manuellement
    Add,

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Fréquence d'apparition de chaque numéro
    Freq {
        /// Nombre de numéros à afficher
        #[arg(short, long, default_value = "50")]
        top: usize,
    },

    /// Combinaisons de numéros les plus fréquentes
    Combos {
        /// Taille des combinaisons (1-7)
        #[arg(short, long, default_value = "2")]
        size: usize,

        /// Nombre de combinaisons à afficher
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// Fréquences par année
    Yearly {
        /// Nombre de numéros à afficher par année
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Statistiques distributionnelles (sommes, impairs, hauts, étendues)
    Stats,

    /// Numéros chauds et froids par rapport à l'espérance uniforme
    HotCold,

    /// Écarts entre apparitions successives de chaque numéro
    Gaps,

    /// Exporter l'historique brut en CSV
    ExportCsv {
        /// Fichier de sortie
        #[arg(short, long, default_value = "lotto_max_draws.csv")]
        file: PathBuf,
    },

    /// Lancer toutes les analyses et écrire un rapport JSON
    Report {
        /// Fichier de sortie
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Nombre de combinaisons conservées par taille
        #[arg(short, long, default_value = "20")]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = LotteryConfig::default();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file, &config),
        Command::Add => cmd_add(&conn, &config),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Freq { top } => cmd_freq(&conn, &config, top),
        Command::Combos { size, top } => cmd_combos(&conn, &config, size, top),
        Command::Yearly { top } => cmd_yearly(&conn, &config, top),
        Command::Stats => cmd_stats(&conn, &config),
        Command::HotCold => cmd_hot_cold(&conn, &config),
        Command::Gaps => cmd_gaps(&conn, &config),
        Command::ExportCsv { file } => cmd_export_csv(&conn, &config, &file),
        Command::Report { output, top } => cmd_report(&conn, &config, &output, top),
    }
}

/// Charge l'historique complet et le valide une seule fois, avant toute
/// analyse. Retourne `None` si la base est vide.
fn load_draws(conn: &Connection, config: &LotteryConfig) -> Result<Option<Vec<Draw>>> {
    if count_draws(conn)? == 0 {
        println!("Base vide. Lancez d'abord : lottomax import");
        return Ok(None);
    }
    let draws = fetch_all_draws(conn)?;
    validate_draws(&draws, config)?;
    Ok(Some(draws))
}

fn cmd_import(conn: &Connection, file: &PathBuf, config: &LotteryConfig) -> Result<()> {
    let result = import_csv(conn, file, config)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    if count_draws(conn)? == 0 {
        println!("Base vide. Lancez d'abord : lottomax import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_freq(conn: &Connection, config: &LotteryConfig, top: usize) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    let freq = number_frequencies(&draws);
    let mut ranked = ranked_frequencies(&freq);
    ranked.truncate(top);
    display_frequencies(&ranked, draws.len());
    Ok(())
}

fn cmd_combos(conn: &Connection, config: &LotteryConfig, size: usize, top: usize) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    let combos = combination_frequencies(&draws, size, config)?;
    let ranked = ranked_combinations(&combos);
    display_combinations(size, &ranked, top);
    Ok(())
}

fn cmd_yearly(conn: &Connection, config: &LotteryConfig, top: usize) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    for (year, freq) in frequencies_by_year(&draws) {
        display_yearly(year, &ranked_frequencies(&freq), top);
    }
    Ok(())
}

fn cmd_stats(conn: &Connection, config: &LotteryConfig) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    match distribution_stats(&draws, config) {
        Some(stats) => display_distribution(&stats),
        None => println!("Aucune donnée."),
    }
    Ok(())
}

fn cmd_hot_cold(conn: &Connection, config: &LotteryConfig) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    let freq = number_frequencies(&draws);
    let report = hot_cold_report(&freq, draws.len(), config)?;
    display_hot_cold(&report);
    Ok(())
}

fn cmd_gaps(conn: &Connection, config: &LotteryConfig) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    let patterns = gap_patterns(&draws, config);
    display_gaps(&patterns);
    Ok(())
}

fn cmd_export_csv(conn: &Connection, config: &LotteryConfig, file: &PathBuf) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };
    export_draws_csv(&draws, file)?;
    println!("{} tirages exportés vers {}", draws.len(), file.display());
    Ok(())
}

fn cmd_report(conn: &Connection, config: &LotteryConfig, output: &PathBuf, top: usize) -> Result<()> {
    let Some(draws) = load_draws(conn, config)? else {
        return Ok(());
    };

    let freq = number_frequencies(&draws);

    // Les passes par taille de combinaison sont indépendantes : une tâche
    // par taille.
    let sizes: Vec<usize> = (2..=config.draw_size).collect();
    let pb = ProgressBar::new(sizes.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let combinations: BTreeMap<usize, Vec<(String, u32)>> = sizes
        .par_iter()
        .map(|&size| {
            let combos = combination_frequencies(&draws, size, config)?;
            let ranked: Vec<(String, u32)> = ranked_combinations(&combos)
                .into_iter()
                .take(top)
                .map(|(combo, count)| (combo_key(&combo), count))
                .collect();
            pb.inc(1);
            Ok((size, ranked))
        })
        .collect::<Result<_>>()?;
    pb.finish_and_clear();

    let yearly: BTreeMap<i32, Vec<(u8, u32)>> = frequencies_by_year(&draws)
        .into_iter()
        .map(|(year, table)| (year, ranked_frequencies(&table)))
        .collect();

    let report = FullReport {
        draw_count: draws.len(),
        frequencies: ranked_frequencies(&freq),
        combinations,
        yearly,
        distribution: distribution_stats(&draws, config),
        hot_cold: hot_cold_report(&freq, draws.len(), config)?,
        gaps: gap_patterns(&draws, config),
    };

    write_report_json(&report, output)?;
    println!("Rapport écrit dans {}", output.display());
    Ok(())
}

fn cmd_add(conn: &Connection, config: &LotteryConfig) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let raw_date = prompt("Date (AAAA-MM-JJ) : ")?;
    let (date, year) = parse_iso_date(&raw_date)?;

    let numbers = prompt_numbers(config)?;

    let draw = Draw {
        date,
        year,
        numbers,
    };
    validate_draw(&draw, config)?;

    println!("\nTirage à insérer :");
    display_draws(&[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Un tirage existe déjà à cette date (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers(config: &LotteryConfig) -> Result<Vec<u8>> {
    let msg = format!(
        "{} numéros (séparés par des espaces, 1-{}) : ",
        config.draw_size, config.pool_size
    );
    loop {
        let input = prompt(&msg)?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == config.draw_size => {
                let draw = Draw {
                    date: "0000-00-00".to_string(),
                    year: 0,
                    numbers: v.clone(),
                };
                if validate_draw(&draw, config).is_ok() {
                    return Ok(v);
                }
                println!(
                    "Numéros invalides (1-{}, pas de doublons). Réessayez.",
                    config.pool_size
                );
            }
            _ => println!("Entrez exactement {} numéros. Réessayez.", config.draw_size),
        }
    }
}
