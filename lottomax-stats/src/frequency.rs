use std::collections::HashMap;

use lottomax_db::models::Draw;

/// Compte les apparitions de chaque numéro sur l'ensemble des tirages.
/// Seuls les numéros apparus au moins une fois figurent dans la table ;
/// un historique vide produit une table vide.
pub fn number_frequencies(draws: &[Draw]) -> HashMap<u8, u32> {
    let mut freq: HashMap<u8, u32> = HashMap::new();
    for draw in draws {
        for &n in &draw.numbers {
            *freq.entry(n).or_insert(0) += 1;
        }
    }
    freq
}

/// Classement déterministe : fréquence décroissante, puis numéro croissant
/// en cas d'égalité. L'ordre ne dépend jamais de l'ordre d'itération de la
/// table.
pub fn ranked_frequencies(freq: &HashMap<u8, u32>) -> Vec<(u8, u32)> {
    let mut entries: Vec<(u8, u32)> = freq.iter().map(|(&n, &c)| (n, c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
}
