use std::collections::BTreeMap;

use serde::Serialize;

use lottomax_db::models::{Draw, LotteryConfig};

/// Statistiques distributionnelles agrégées sur l'historique.
///
/// Les trois distributions associent un libellé de classe (entièrement
/// déterminé par `draw_size`) au nombre de tirages dans la classe, en ordre
/// croissant de la valeur sous-jacente.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionStats {
    pub draw_count: usize,
    pub average_sum: f64,
    pub min_sum: u32,
    pub max_sum: u32,
    pub average_odd: f64,
    pub average_high: f64,
    pub average_consecutive_pairs: f64,
    pub average_range: f64,
    pub min_range: u8,
    pub max_range: u8,
    pub odd_even_distribution: Vec<(String, u32)>,
    pub high_low_distribution: Vec<(String, u32)>,
    pub consecutive_distribution: Vec<(String, u32)>,
}

struct DrawProfile {
    sum: u32,
    odd_count: usize,
    high_count: usize,
    consecutive_pairs: usize,
    range: u8,
}

fn profile_draw(draw: &Draw, config: &LotteryConfig) -> DrawProfile {
    let mut sorted = draw.numbers.clone();
    sorted.sort_unstable();

    let range = match (sorted.first(), sorted.last()) {
        (Some(&min), Some(&max)) => max - min,
        _ => 0,
    };

    DrawProfile {
        sum: sorted.iter().map(|&n| n as u32).sum(),
        odd_count: sorted.iter().filter(|&&n| n % 2 == 1).count(),
        high_count: sorted
            .iter()
            .filter(|&&n| n > config.high_low_midpoint)
            .count(),
        // Paires adjacentes d'écart 1 : une suite de 3 numéros consécutifs
        // compte pour 2 paires, pas pour une série de longueur 3.
        consecutive_pairs: sorted.windows(2).filter(|w| w[1] - w[0] == 1).count(),
        range,
    }
}

fn bucket_counts<F>(values: impl Iterator<Item = usize>, label: F) -> Vec<(String, u32)>
where
    F: Fn(usize) -> String,
{
    let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(v, count)| (label(v), count))
        .collect()
}

/// Calcule les statistiques distributionnelles de l'historique.
/// Retourne `None` pour un historique vide : aucune moyenne n'y est définie.
pub fn distribution_stats(draws: &[Draw], config: &LotteryConfig) -> Option<DistributionStats> {
    if draws.is_empty() {
        return None;
    }

    let profiles: Vec<DrawProfile> = draws.iter().map(|d| profile_draw(d, config)).collect();
    let n = profiles.len() as f64;
    let draw_size = config.draw_size;

    Some(DistributionStats {
        draw_count: profiles.len(),
        average_sum: profiles.iter().map(|p| p.sum as f64).sum::<f64>() / n,
        min_sum: profiles.iter().map(|p| p.sum).min().unwrap_or(0),
        max_sum: profiles.iter().map(|p| p.sum).max().unwrap_or(0),
        average_odd: profiles.iter().map(|p| p.odd_count as f64).sum::<f64>() / n,
        average_high: profiles.iter().map(|p| p.high_count as f64).sum::<f64>() / n,
        average_consecutive_pairs: profiles
            .iter()
            .map(|p| p.consecutive_pairs as f64)
            .sum::<f64>()
            / n,
        average_range: profiles.iter().map(|p| p.range as f64).sum::<f64>() / n,
        min_range: profiles.iter().map(|p| p.range).min().unwrap_or(0),
        max_range: profiles.iter().map(|p| p.range).max().unwrap_or(0),
        odd_even_distribution: bucket_counts(profiles.iter().map(|p| p.odd_count), |odd| {
            format!("{} impairs, {} pairs", odd, draw_size.saturating_sub(odd))
        }),
        high_low_distribution: bucket_counts(profiles.iter().map(|p| p.high_count), |high| {
            format!("{} hauts, {} bas", high, draw_size.saturating_sub(high))
        }),
        consecutive_distribution: bucket_counts(
            profiles.iter().map(|p| p.consecutive_pairs),
            |pairs| format!("{} paires consécutives", pairs),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottomax_db::models::{make_test_draws, Draw};

    fn draw(numbers: Vec<u8>) -> Draw {
        Draw {
            date: "2024-01-01".to_string(),
            year: 2024,
            numbers,
        }
    }

    #[test]
    fn test_single_draw_profile() {
        let config = LotteryConfig::default();
        let draws = vec![draw(vec![1, 2, 3, 10, 20, 30, 40])];
        let stats = distribution_stats(&draws, &config).unwrap();

        assert_eq!(stats.draw_count, 1);
        // 1+2+3+10+20+30+40 = 106
        assert!((stats.average_sum - 106.0).abs() < 1e-10);
        assert_eq!(stats.min_sum, 106);
        assert_eq!(stats.max_sum, 106);
        // impairs : 1 et 3
        assert!((stats.average_odd - 2.0).abs() < 1e-10);
        // hauts (> 25) : 30 et 40
        assert!((stats.average_high - 2.0).abs() < 1e-10);
        // paires consécutives : 1-2 et 2-3
        assert!((stats.average_consecutive_pairs - 2.0).abs() < 1e-10);
        // 40 - 1 = 39
        assert!((stats.average_range - 39.0).abs() < 1e-10);
        assert_eq!(stats.min_range, 39);
        assert_eq!(stats.max_range, 39);
    }

    #[test]
    fn test_bucket_labels() {
        let config = LotteryConfig::default();
        let draws = vec![draw(vec![1, 2, 3, 10, 20, 30, 40])];
        let stats = distribution_stats(&draws, &config).unwrap();

        assert_eq!(
            stats.odd_even_distribution,
            vec![("2 impairs, 5 pairs".to_string(), 1)]
        );
        assert_eq!(
            stats.high_low_distribution,
            vec![("2 hauts, 5 bas".to_string(), 1)]
        );
        assert_eq!(
            stats.consecutive_distribution,
            vec![("2 paires consécutives".to_string(), 1)]
        );
    }

    #[test]
    fn test_consecutive_run_counts_pairs() {
        let config = LotteryConfig::default();
        // 4-5-6-7 : trois paires adjacentes, pas « une série de 4 »
        let draws = vec![draw(vec![4, 5, 6, 7, 20, 30, 40])];
        let stats = distribution_stats(&draws, &config).unwrap();
        assert!((stats.average_consecutive_pairs - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_distributions_sum_to_draw_count() {
        let config = LotteryConfig::default();
        let draws = make_test_draws(60);
        let stats = distribution_stats(&draws, &config).unwrap();

        for dist in [
            &stats.odd_even_distribution,
            &stats.high_low_distribution,
            &stats.consecutive_distribution,
        ] {
            let total: u32 = dist.iter().map(|&(_, c)| c).sum();
            assert_eq!(total as usize, draws.len());
        }
    }

    #[test]
    fn test_empty_history_is_no_data() {
        let config = LotteryConfig::default();
        assert!(distribution_stats(&[], &config).is_none());
    }

    #[test]
    fn test_midpoint_configurable() {
        let config = LotteryConfig {
            high_low_midpoint: 10,
            ..LotteryConfig::default()
        };
        let draws = vec![draw(vec![1, 2, 3, 10, 20, 30, 40])];
        let stats = distribution_stats(&draws, &config).unwrap();
        // > 10 : 20, 30, 40
        assert!((stats.average_high - 3.0).abs() < 1e-10);
    }
}
