use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Configuration d'une loterie. Par défaut : Lotto Max, 7 numéros parmi 50.
///
/// Les constantes sont portées par une structure (et non des globales) pour
/// que plusieurs configurations puissent coexister dans un même processus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotteryConfig {
    /// Nombre de numéros tirés par événement.
    pub draw_size: usize,
    /// Taille du domaine des numéros (1..=pool_size).
    pub pool_size: u8,
    /// Seuil haut/bas : un numéro strictement supérieur est compté « haut ».
    pub high_low_midpoint: u8,
    /// Taille des classements chaud/froid.
    pub hot_cold_top_n: usize,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            draw_size: 7,
            pool_size: 50,
            high_low_midpoint: 25,
            hot_cold_top_n: 10,
        }
    }
}

impl LotteryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            bail!("Pool vide");
        }
        if self.draw_size == 0 || self.draw_size > self.pool_size as usize {
            bail!(
                "Taille de tirage invalide : {} (pool de {})",
                self.draw_size,
                self.pool_size
            );
        }
        if self.high_low_midpoint == 0 || self.high_low_midpoint >= self.pool_size {
            bail!(
                "Seuil haut/bas invalide : {} (pool de {})",
                self.high_low_midpoint,
                self.pool_size
            );
        }
        if self.hot_cold_top_n == 0 || self.hot_cold_top_n > self.pool_size as usize {
            bail!(
                "top_n invalide : {} (pool de {})",
                self.hot_cold_top_n,
                self.pool_size
            );
        }
        Ok(())
    }

    /// Espérance uniforme du nombre d'apparitions d'un numéro sur
    /// `total_draws` tirages.
    pub fn expected_frequency(&self, total_draws: usize) -> f64 {
        total_draws as f64 * self.draw_size as f64 / self.pool_size as f64
    }
}

/// Un tirage historique normalisé. La date (ISO-8601) ne sert qu'à l'ordre
/// chronologique ; l'année est dérivée à l'import et jamais recalculée.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draw {
    pub date: String,
    pub year: i32,
    pub numbers: Vec<u8>,
}

pub fn validate_draw(draw: &Draw, config: &LotteryConfig) -> Result<()> {
    if draw.numbers.len() != config.draw_size {
        bail!(
            "Tirage du {} : {} numéros au lieu de {}",
            draw.date,
            draw.numbers.len(),
            config.draw_size
        );
    }
    for &n in &draw.numbers {
        if n < 1 || n > config.pool_size {
            bail!(
                "Tirage du {} : numéro {} hors limites (1-{})",
                draw.date,
                n,
                config.pool_size
            );
        }
    }
    for i in 0..draw.numbers.len() {
        for j in (i + 1)..draw.numbers.len() {
            if draw.numbers[i] == draw.numbers[j] {
                bail!(
                    "Tirage du {} : numéro en double : {}",
                    draw.date,
                    draw.numbers[i]
                );
            }
        }
    }
    Ok(())
}

/// Validation centrale de l'historique, à exécuter une seule fois avant
/// toute analyse. Les analyseurs supposent ensuite des tirages bien formés.
pub fn validate_draws(draws: &[Draw], config: &LotteryConfig) -> Result<()> {
    config.validate()?;
    for draw in draws {
        validate_draw(draw, config)?;
    }
    Ok(())
}

/// Historique synthétique pour les tests (7 numéros distincts par tirage).
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = (i % 10) as u8;
            let year = 2020 + (i / 50) as i32;
            Draw {
                date: format!("{}-{:02}-{:02}", year, (i % 12) + 1, (i % 28) + 1),
                year,
                numbers: (1..=7).map(|j| base * 4 + j).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(numbers: Vec<u8>) -> Draw {
        Draw {
            date: "2024-01-05".to_string(),
            year: 2024,
            numbers,
        }
    }

    #[test]
    fn test_validate_draw_ok() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&draw(vec![1, 2, 3, 4, 5, 6, 7]), &config).is_ok());
        assert!(validate_draw(&draw(vec![44, 45, 46, 47, 48, 49, 50]), &config).is_ok());
    }

    #[test]
    fn test_validate_draw_out_of_range() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&draw(vec![0, 2, 3, 4, 5, 6, 7]), &config).is_err());
        assert!(validate_draw(&draw(vec![1, 2, 3, 4, 5, 6, 51]), &config).is_err());
    }

    #[test]
    fn test_validate_draw_wrong_size() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&draw(vec![1, 2, 3]), &config).is_err());
        assert!(validate_draw(&draw(vec![1, 2, 3, 4, 5, 6, 7, 8]), &config).is_err());
    }

    #[test]
    fn test_validate_draw_duplicate() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&draw(vec![1, 1, 3, 4, 5, 6, 7]), &config).is_err());
    }

    #[test]
    fn test_validate_draws_central() {
        let config = LotteryConfig::default();
        let mut draws = make_test_draws(20);
        assert!(validate_draws(&draws, &config).is_ok());
        draws[10].numbers[0] = 0;
        assert!(validate_draws(&draws, &config).is_err());
    }

    #[test]
    fn test_config_validate() {
        assert!(LotteryConfig::default().validate().is_ok());

        let bad = LotteryConfig {
            draw_size: 0,
            ..LotteryConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = LotteryConfig {
            hot_cold_top_n: 51,
            ..LotteryConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = LotteryConfig {
            high_low_midpoint: 50,
            ..LotteryConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_expected_frequency() {
        let config = LotteryConfig::default();
        // 100 tirages de 7 numéros parmi 50 : espérance 14 par numéro
        assert!((config.expected_frequency(100) - 14.0).abs() < 1e-10);
        assert_eq!(config.expected_frequency(0), 0.0);
    }

    #[test]
    fn test_make_test_draws_well_formed() {
        let config = LotteryConfig::default();
        let draws = make_test_draws(100);
        assert_eq!(draws.len(), 100);
        assert!(validate_draws(&draws, &config).is_ok());
    }
}
