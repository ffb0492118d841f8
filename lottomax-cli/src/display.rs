use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::export::combo_key;
use crate::import::ImportResult;
use lottomax_db::models::Draw;
use lottomax_stats::distribution::DistributionStats;
use lottomax_stats::gaps::NumberGaps;
use lottomax_stats::hot_cold::HotColdReport;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Date", "Année", "Numéros"]);
    for draw in draws {
        let mut sorted = draw.numbers.clone();
        sorted.sort_unstable();
        let numbers_str = sorted
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![&draw.date, &draw.year.to_string(), &numbers_str]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_frequencies(ranked: &[(u8, u32)], total_draws: usize) {
    println!("\n📊 Fréquences sur {} tirages\n", total_draws);

    let mut table = new_table(vec!["Numéro", "Fréquence"]);
    for &(number, count) in ranked {
        table.add_row(vec![&format!("{:2}", number), &count.to_string()]);
    }
    println!("{table}");
}

pub fn display_combinations(size: usize, ranked: &[(Vec<u8>, u32)], top: usize) {
    println!("\n🔗 Combinaisons de {} numéros (top {})\n", size, top);

    let mut table = new_table(vec!["Combinaison", "Fréquence"]);
    for (combo, count) in ranked.iter().take(top) {
        table.add_row(vec![&combo_key(combo), &count.to_string()]);
    }
    println!("{table}");
}

pub fn display_yearly(year: i32, ranked: &[(u8, u32)], top: usize) {
    println!("\n── {} ──", year);

    let mut table = new_table(vec!["Numéro", "Fréquence"]);
    for &(number, count) in ranked.iter().take(top) {
        table.add_row(vec![&format!("{:2}", number), &count.to_string()]);
    }
    println!("{table}");
}

pub fn display_distribution(stats: &DistributionStats) {
    println!("\n📈 Statistiques sur {} tirages\n", stats.draw_count);

    let mut table = new_table(vec!["Indicateur", "Moyenne", "Min", "Max"]);
    table.add_row(vec![
        "Somme".to_string(),
        format!("{:.1}", stats.average_sum),
        stats.min_sum.to_string(),
        stats.max_sum.to_string(),
    ]);
    table.add_row(vec![
        "Étendue".to_string(),
        format!("{:.1}", stats.average_range),
        stats.min_range.to_string(),
        stats.max_range.to_string(),
    ]);
    table.add_row(vec![
        "Impairs".to_string(),
        format!("{:.2}", stats.average_odd),
        "—".to_string(),
        "—".to_string(),
    ]);
    table.add_row(vec![
        "Hauts".to_string(),
        format!("{:.2}", stats.average_high),
        "—".to_string(),
        "—".to_string(),
    ]);
    table.add_row(vec![
        "Paires consécutives".to_string(),
        format!("{:.2}", stats.average_consecutive_pairs),
        "—".to_string(),
        "—".to_string(),
    ]);
    println!("{table}");

    for (title, dist) in [
        ("Répartition impairs/pairs", &stats.odd_even_distribution),
        ("Répartition hauts/bas", &stats.high_low_distribution),
        ("Paires consécutives", &stats.consecutive_distribution),
    ] {
        println!("\n── {} ──", title);
        let mut table = new_table(vec!["Classe", "Tirages"]);
        for (label, count) in dist {
            table.add_row(vec![label, &count.to_string()]);
        }
        println!("{table}");
    }
}

pub fn display_hot_cold(report: &HotColdReport) {
    println!(
        "\n🌡️  Numéros chauds / froids (espérance {:.1} apparitions)\n",
        report.expected
    );

    for (title, entries, color) in [
        ("Chauds", &report.hot, Color::Green),
        ("Froids", &report.cold, Color::Red),
    ] {
        println!("── {} ──", title);
        let mut table = new_table(vec!["Numéro", "Fréquence", "Déviation"]);
        for entry in entries.iter() {
            table.add_row(vec![
                Cell::new(format!("{:2}", entry.number)),
                Cell::new(entry.frequency.to_string()),
                Cell::new(format!("{:+.1} %", entry.deviation)).fg(color),
            ]);
        }
        println!("{table}");
    }
}

pub fn display_gaps(patterns: &[NumberGaps]) {
    if patterns.is_empty() {
        println!("Aucun écart observé (pas assez d'apparitions).");
        return;
    }

    println!("\n⏳ Écarts entre apparitions\n");
    let mut table = new_table(vec!["Numéro", "Écart moyen", "Écart max", "Écart actuel"]);
    for entry in patterns {
        table.add_row(vec![
            &format!("{:2}", entry.number),
            &format!("{:.1}", entry.avg_gap),
            &entry.max_gap.to_string(),
            &entry.current_gap.to_string(),
        ]);
    }
    println!("{table}");
}
