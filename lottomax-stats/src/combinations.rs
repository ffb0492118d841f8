use std::collections::HashMap;

use anyhow::{bail, Result};
use lottomax_db::models::{Draw, LotteryConfig};

/// Compte, pour chaque sous-ensemble de `size` numéros, le nombre de tirages
/// où tous ses éléments sont sortis ensemble. Les clés sont triées par ordre
/// croissant : {3,7} et {7,3} désignent le même sous-ensemble.
///
/// `size` hors de [1, draw_size] est une erreur d'utilisation, jamais
/// ramenée silencieusement dans l'intervalle.
pub fn combination_frequencies(
    draws: &[Draw],
    size: usize,
    config: &LotteryConfig,
) -> Result<HashMap<Vec<u8>, u32>> {
    if size < 1 || size > config.draw_size {
        bail!(
            "Taille de combinaison invalide : {} (attendu 1-{})",
            size,
            config.draw_size
        );
    }

    let mut combos: HashMap<Vec<u8>, u32> = HashMap::new();
    for draw in draws {
        let mut sorted = draw.numbers.clone();
        sorted.sort_unstable();
        for combo in k_subsets(&sorted, size) {
            *combos.entry(combo).or_insert(0) += 1;
        }
    }
    Ok(combos)
}

/// Classement déterministe : fréquence décroissante, puis ordre
/// lexicographique des sous-ensembles.
pub fn ranked_combinations(combos: &HashMap<Vec<u8>, u32>) -> Vec<(Vec<u8>, u32)> {
    let mut entries: Vec<(Vec<u8>, u32)> =
        combos.iter().map(|(k, &c)| (k.clone(), c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Énumère les sous-ensembles de taille `k` d'une tranche triée, en ordre
/// lexicographique des indices.
fn k_subsets(sorted: &[u8], k: usize) -> Vec<Vec<u8>> {
    let n = sorted.len();
    let mut result = Vec::new();
    if k == 0 || k > n {
        return result;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.iter().map(|&i| sorted[i]).collect());

        // Avance l'indice le plus à droite qui n'est pas en butée.
        let mut i = k;
        while i > 0 && indices[i - 1] == i - 1 + n - k {
            i -= 1;
        }
        if i == 0 {
            return result;
        }
        indices[i - 1] += 1;
        for j in i..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottomax_db::models::make_test_draws;

    fn binomial(n: u64, k: u64) -> u64 {
        if k > n {
            return 0;
        }
        (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
    }

    #[test]
    fn test_k_subsets_enumeration() {
        let subsets = k_subsets(&[1, 3, 7], 2);
        assert_eq!(subsets, vec![vec![1, 3], vec![1, 7], vec![3, 7]]);
        assert_eq!(k_subsets(&[1, 2, 3], 3), vec![vec![1, 2, 3]]);
        assert!(k_subsets(&[1, 2, 3], 0).is_empty());
        assert!(k_subsets(&[1, 2, 3], 4).is_empty());
    }

    #[test]
    fn test_total_counts_per_size() {
        let config = LotteryConfig::default();
        let draws = make_test_draws(25);
        for size in 1..=7 {
            let combos = combination_frequencies(&draws, size, &config).unwrap();
            let total: u32 = combos.values().sum();
            let expected = 25 * binomial(7, size as u64) as u32;
            assert_eq!(total, expected, "taille {}", size);
        }
    }

    #[test]
    fn test_invalid_size_rejected() {
        let config = LotteryConfig::default();
        let draws = make_test_draws(5);
        assert!(combination_frequencies(&draws, 0, &config).is_err());
        assert!(combination_frequencies(&draws, 8, &config).is_err());
    }

    #[test]
    fn test_keys_canonical_ascending() {
        let config = LotteryConfig::default();
        let draws = vec![Draw {
            date: "2024-01-01".to_string(),
            year: 2024,
            numbers: vec![7, 3, 1, 50, 20, 10, 30],
        }];
        let combos = combination_frequencies(&draws, 2, &config).unwrap();
        assert_eq!(combos[&vec![3, 7]], 1);
        assert!(!combos.contains_key(&vec![7, 3]));
        for key in combos.keys() {
            assert!(key.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_idempotent() {
        let config = LotteryConfig::default();
        let draws = make_test_draws(15);
        let first = combination_frequencies(&draws, 3, &config).unwrap();
        let second = combination_frequencies(&draws, 3, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_history() {
        let config = LotteryConfig::default();
        let combos = combination_frequencies(&[], 2, &config).unwrap();
        assert!(combos.is_empty());
    }

    #[test]
    fn test_ranked_deterministic() {
        let config = LotteryConfig::default();
        let draws = make_test_draws(15);
        let combos = combination_frequencies(&draws, 2, &config).unwrap();
        let ranked = ranked_combinations(&combos);
        for pair in ranked.windows(2) {
            assert!(
                pair[0].1 > pair[1].1 || (pair[0].1 == pair[1].1 && pair[0].0 < pair[1].0)
            );
        }
    }
}
