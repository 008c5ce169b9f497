//! Noyau de la calculatrice à pavé
//!
//! Organisation interne :
//! - saisie.rs   : machine de saisie (touches -> expression -> "=")
//! - eval.rs     : port d’évaluation + évaluateur rationnel (pipeline complet)
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + évaluation exacte de la RPN
//! - format.rs   : arrondi 10 chiffres significatifs + écriture du résultat

pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod saisie;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{ErreurEval, Evaluateur, EvaluateurRationnel};
pub use saisie::{Calcul, ErreurCalcul, Evenement, Operateur, Saisie};
