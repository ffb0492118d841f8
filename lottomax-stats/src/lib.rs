//! Moteur statistique pur sur l'historique des tirages.
//!
//! Chaque analyseur est une fonction pure de `&[Draw]` vers une structure de
//! résultat : aucun état partagé entre appels, aucune entrée/sortie. Les
//! appels indépendants (une taille de combinaison par tâche, une année par
//! tâche) peuvent donc être parallélisés librement par l'appelant.

pub mod combinations;
pub mod distribution;
pub mod frequency;
pub mod gaps;
pub mod hot_cold;
pub mod yearly;
