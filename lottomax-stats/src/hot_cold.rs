use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Serialize;

use lottomax_db::models::LotteryConfig;

/// Écart d'un numéro entre sa fréquence observée et l'espérance uniforme.
#[derive(Debug, Clone, Serialize)]
pub struct NumberDeviation {
    pub number: u8,
    pub frequency: u32,
    pub expected: f64,
    /// Déviation en pourcentage : (observé − attendu) / attendu × 100.
    pub deviation: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HotColdReport {
    pub expected: f64,
    pub hot: Vec<NumberDeviation>,
    pub cold: Vec<NumberDeviation>,
}

/// Compare les fréquences observées à l'espérance uniforme et classe les
/// `hot_cold_top_n` numéros les plus chauds et les plus froids. Tout le pool
/// est évalué : un numéro absent de la table compte pour une fréquence de 0.
/// La table reçue n'est jamais modifiée.
///
/// Un historique vide donne un rapport vide (l'espérance y est nulle, la
/// déviation n'est pas définie). Un `hot_cold_top_n` hors de [1, pool_size]
/// est une erreur d'utilisation.
pub fn hot_cold_report(
    freq: &HashMap<u8, u32>,
    total_draws: usize,
    config: &LotteryConfig,
) -> Result<HotColdReport> {
    if config.hot_cold_top_n == 0 || config.hot_cold_top_n > config.pool_size as usize {
        bail!(
            "top_n invalide : {} (pool de {})",
            config.hot_cold_top_n,
            config.pool_size
        );
    }
    if total_draws == 0 {
        return Ok(HotColdReport {
            expected: 0.0,
            hot: Vec::new(),
            cold: Vec::new(),
        });
    }

    let expected = config.expected_frequency(total_draws);
    let mut deviations: Vec<NumberDeviation> = (1..=config.pool_size)
        .map(|number| {
            let observed = freq.get(&number).copied().unwrap_or(0);
            NumberDeviation {
                number,
                frequency: observed,
                expected,
                deviation: (observed as f64 - expected) / expected * 100.0,
            }
        })
        .collect();

    // Égalités départagées par numéro croissant pour un classement
    // reproductible.
    deviations.sort_by(|a, b| {
        b.deviation
            .partial_cmp(&a.deviation)
            .unwrap_or(Ordering::Equal)
            .then(a.number.cmp(&b.number))
    });
    let hot = deviations[..config.hot_cold_top_n].to_vec();

    deviations.sort_by(|a, b| {
        a.deviation
            .partial_cmp(&b.deviation)
            .unwrap_or(Ordering::Equal)
            .then(a.number.cmp(&b.number))
    });
    let cold = deviations[..config.hot_cold_top_n].to_vec();

    Ok(HotColdReport {
        expected,
        hot,
        cold,
    })
}
