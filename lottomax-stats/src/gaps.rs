use serde::Serialize;

use lottomax_db::models::{Draw, LotteryConfig};

/// Écarts entre apparitions successives d'un numéro, en nombre de tirages
/// sur l'historique trié par date.
#[derive(Debug, Clone, Serialize)]
pub struct NumberGaps {
    pub number: u8,
    pub gaps: Vec<u32>,
    pub avg_gap: f64,
    pub max_gap: u32,
    /// Distance entre la dernière apparition et la fin de l'historique.
    pub current_gap: u32,
}

/// Calcule les écarts d'apparition de chaque numéro du pool. Le tri par date
/// est stable : deux tirages datés du même jour conservent leur ordre
/// d'arrivée. Seuls les numéros avec au moins un écart observé (donc au
/// moins deux apparitions) figurent dans le résultat, par numéro croissant ;
/// les numéros jamais ou une seule fois tirés en sont absents.
pub fn gap_patterns(draws: &[Draw], config: &LotteryConfig) -> Vec<NumberGaps> {
    let mut ordered: Vec<&Draw> = draws.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut result = Vec::new();
    for number in 1..=config.pool_size {
        let mut gaps: Vec<u32> = Vec::new();
        let mut last_seen: Option<usize> = None;

        for (i, draw) in ordered.iter().enumerate() {
            if draw.numbers.contains(&number) {
                if let Some(prev) = last_seen {
                    gaps.push((i - prev) as u32);
                }
                last_seen = Some(i);
            }
        }

        let last = match last_seen {
            Some(i) => i,
            None => continue,
        };
        if gaps.is_empty() {
            continue;
        }

        result.push(NumberGaps {
            number,
            avg_gap: gaps.iter().sum::<u32>() as f64 / gaps.len() as f64,
            max_gap: gaps.iter().copied().max().unwrap_or(0),
            current_gap: (ordered.len() - last) as u32,
            gaps,
        });
    }
    result
}
