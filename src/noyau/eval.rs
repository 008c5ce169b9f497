//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> valeur exacte (rationnel) -> f64
//!
//! La machine de saisie ne connaît que le trait [`Evaluateur`] :
//! l’implémentation rationnelle ci-dessous est celle de l’application,
//! les tests peuvent en brancher une autre.

use num_traits::ToPrimitive;
use thiserror::Error;

use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};

/// Échec d’évaluation côté évaluateur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurEval {
    /// Entrée vide ou composée uniquement d’espaces.
    #[error("Entrée vide")]
    Vide,

    /// Expression mal formée (opérateur final, parenthèses, caractère inconnu…).
    #[error("{0}")]
    Syntaxe(String),

    #[error("division par zéro")]
    DivisionParZero,
}

/// Port d’évaluation : expression texte -> nombre.
///
/// Contrat : une erreur de syntaxe est TOUJOURS une erreur, jamais un résultat partiel.
/// Le résultat peut être non fini (la machine de saisie le refuse).
pub trait Evaluateur {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurEval>;
}

/// Évaluateur exact : arithmétique rationnelle, conversion f64 en toute fin.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluateurRationnel;

impl Evaluateur for EvaluateurRationnel {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurEval> {
        let s = expression.trim();
        if s.is_empty() {
            return Err(ErreurEval::Vide);
        }

        // 1) Jetons
        let jetons = tokenize(s)?;

        // 2) RPN
        let rpn = to_rpn(&jetons)?;
        tracing::trace!(rpn = %format_tokens(&rpn), "expression convertie");

        // 3) Valeur exacte
        let exact = eval_rpn(&rpn)?;

        // 4) f64 (hors plage => infini, refusé plus haut)
        Ok(exact.to_f64().unwrap_or(f64::NAN))
    }
}
