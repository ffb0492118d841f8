use std::collections::{BTreeMap, HashMap};

use lottomax_db::models::Draw;

use crate::frequency::number_frequencies;

/// Regroupe les tirages par année puis calcule les fréquences indépendamment
/// par groupe. La clé de partition est l'attribut `year` du tirage, jamais
/// recalculée depuis la date. Les années sans tirage sont simplement
/// absentes du résultat.
pub fn frequencies_by_year(draws: &[Draw]) -> BTreeMap<i32, HashMap<u8, u32>> {
    let mut groups: BTreeMap<i32, Vec<Draw>> = BTreeMap::new();
    for draw in draws {
        groups.entry(draw.year).or_default().push(draw.clone());
    }

    groups
        .into_iter()
        .map(|(year, group)| (year, number_frequencies(&group)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottomax_db::models::make_test_draws;

    #[test]
    fn test_partition_completeness() {
        // make_test_draws répartit 120 tirages sur trois années
        let draws = make_test_draws(120);
        let yearly = frequencies_by_year(&draws);
        assert_eq!(yearly.len(), 3);

        let overall: u32 = number_frequencies(&draws).values().sum();
        let by_year: u32 = yearly
            .values()
            .map(|freq| freq.values().sum::<u32>())
            .sum();
        assert_eq!(by_year, overall);
    }

    #[test]
    fn test_partition_key_is_year_attribute() {
        let mut draws = make_test_draws(10);
        // année incohérente avec la date : c'est l'attribut qui fait foi
        draws[0].year = 1999;
        let yearly = frequencies_by_year(&draws);
        assert!(yearly.contains_key(&1999));
        assert_eq!(yearly[&1999].values().sum::<u32>(), 7);
    }

    #[test]
    fn test_empty_history() {
        let yearly = frequencies_by_year(&[]);
        assert!(yearly.is_empty());
    }
}
