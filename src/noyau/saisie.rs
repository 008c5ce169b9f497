//! src/noyau/saisie.rs
//!
//! Machine de saisie : transforme une suite d’événements clavier/pavé
//! en expression bien formée, et la soumet à l’évaluateur sur "=".
//!
//! États logiques :
//! - Saisie          : accumulation normale (opérande en cours + préfixe validé)
//! - Attente         : juste après un résultat (`attente_nouvelle_saisie`)
//! - Erreur          : après un échec (`erreur`), toute entrée repart de zéro
//!
//! Contrats :
//! - `operande` contient au plus un '.'
//! - `expression` ne se termine jamais par deux opérateurs
//! - aucun effet de bord : l’historique est alimenté par l’appelant (via le `Calcul` renvoyé)
//!
//! Mono-thread : chaque événement est traité jusqu’au bout avant le suivant.
//! Partager une `Saisie` entre threads impose un seul verrou autour de toute la structure.

use thiserror::Error;

use super::eval::{ErreurEval, Evaluateur};
use super::format::formater_resultat;

/// Texte affiché à la place de l’opérande après un échec.
pub const SENTINELLE_ERREUR: &str = "Error";

/* ------------------------ Événements ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Modulo => '%',
        }
    }

    pub fn depuis_symbole(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '%' => Some(Operateur::Modulo),
            _ => None,
        }
    }
}

/// Un appui (bouton du pavé ou touche clavier).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evenement {
    /// '0'..='9' ou '.'
    Chiffre(char),
    Operateur(Operateur),
    Egal,
    /// DEL / Backspace
    Effacer,
    /// AC / Escape
    ToutEffacer,
}

impl Evenement {
    /// Caractère tapé -> événement (Enter/Backspace/Escape sont des touches, pas du texte).
    pub fn depuis_caractere(c: char) -> Option<Self> {
        if c.is_ascii_digit() || c == '.' {
            return Some(Evenement::Chiffre(c));
        }
        if c == '=' {
            return Some(Evenement::Egal);
        }
        Operateur::depuis_symbole(c).map(Evenement::Operateur)
    }
}

/* ------------------------ État + erreurs ------------------------ */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EtatSaisie {
    /// Préfixe validé (opérandes + opérateurs déjà figés).
    pub expression: String,
    /// Opérande en cours de frappe, ou résultat affiché.
    pub operande: String,
    /// Vrai juste après un "=" réussi.
    pub attente_nouvelle_saisie: bool,
    /// Vrai après un "=" raté : `operande` vaut alors la sentinelle.
    pub erreur: bool,
}

/// Échec d’un "=", tel que vu par l’utilisateur (même affichage dans les deux cas).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("expression mal formée : {0}")]
    ExpressionMalformee(String),

    #[error("résultat non fini")]
    ResultatNonFini,
}

impl From<ErreurEval> for ErreurCalcul {
    fn from(e: ErreurEval) -> Self {
        match e {
            ErreurEval::DivisionParZero => ErreurCalcul::ResultatNonFini,
            autre => ErreurCalcul::ExpressionMalformee(autre.to_string()),
        }
    }
}

/// Calcul réussi, à confier à l’historique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calcul {
    pub expression: String,
    pub resultat: String,
}

/* ------------------------ Machine ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct Saisie {
    etat: EtatSaisie,
}

impl Saisie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn etat(&self) -> &EtatSaisie {
        &self.etat
    }

    /// Ligne de contexte (préfixe validé, ou calcul effectué après "=").
    pub fn expression(&self) -> &str {
        &self.etat.expression
    }

    /// Ligne principale : opérande, résultat ou sentinelle ; "0" si rien.
    pub fn affichage(&self) -> &str {
        if self.etat.operande.is_empty() {
            "0"
        } else {
            &self.etat.operande
        }
    }

    pub fn en_erreur(&self) -> bool {
        self.etat.erreur
    }

    /// Point d’entrée unique.
    ///
    /// - `Ok(Some(calcul))` : "=" a réussi, le calcul est à historiser
    /// - `Ok(None)`         : rien à historiser
    /// - `Err(e)`           : "=" a échoué, la machine est passée en état d’erreur
    pub fn traiter(
        &mut self,
        ev: Evenement,
        evaluateur: &dyn Evaluateur,
    ) -> Result<Option<Calcul>, ErreurCalcul> {
        match ev {
            Evenement::Chiffre(c) => self.saisir_chiffre(c),
            Evenement::Operateur(op) => self.saisir_operateur(op),
            Evenement::Egal => return self.egal(evaluateur),
            Evenement::Effacer => self.effacer(),
            Evenement::ToutEffacer => self.tout_effacer(),
        }
        Ok(None)
    }

    /// Chiffre ou point décimal.
    pub fn saisir_chiffre(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        self.sortir_erreur();

        let e = &mut self.etat;
        if e.attente_nouvelle_saisie {
            // nouveau calcul
            e.expression.clear();
            e.operande = c.to_string();
            e.attente_nouvelle_saisie = false;
            return;
        }

        if c == '.' && e.operande.contains('.') {
            return;
        }
        e.operande.push(c);
    }

    pub fn saisir_operateur(&mut self, op: Operateur) {
        self.sortir_erreur();

        let e = &mut self.etat;

        // Enchaînement depuis le résultat affiché (l’opérande reste visible)
        if e.attente_nouvelle_saisie {
            e.expression = format!("{}{}", e.operande, op.symbole());
            e.attente_nouvelle_saisie = false;
            return;
        }

        let sans_operande = e.operande.is_empty() || e.operande == "-";
        if sans_operande {
            if op == Operateur::Moins {
                // moins unaire : début d’un opérande négatif (expression intacte)
                if e.operande.is_empty() {
                    e.operande.push('-');
                }
                return;
            }
            // "5*" puis "+" : pas deux opérateurs de suite
            e.operande.clear();
            remplacer_operateur_final(&mut e.expression, op);
            return;
        }

        e.expression.push_str(&e.operande);
        e.expression.push(op.symbole());
        e.operande.clear();
    }

    /// "=" : évalue `expression + operande`.
    pub fn egal(&mut self, evaluateur: &dyn Evaluateur) -> Result<Option<Calcul>, ErreurCalcul> {
        let e = &self.etat;
        // la sentinelle n’est pas un opérande
        if e.erreur {
            return Ok(None);
        }
        if e.expression.is_empty() && e.operande.is_empty() {
            return Ok(None);
        }

        let complete = format!("{}{}", e.expression, e.operande);

        match evaluer_et_formater(evaluateur, &complete) {
            Ok(resultat) => {
                tracing::debug!(expression = %complete, resultat = %resultat, "calcul réussi");
                self.etat = EtatSaisie {
                    expression: complete.clone(),
                    operande: resultat.clone(),
                    attente_nouvelle_saisie: true,
                    erreur: false,
                };
                Ok(Some(Calcul {
                    expression: complete,
                    resultat,
                }))
            }
            Err(err) => {
                tracing::debug!(expression = %complete, erreur = %err, "calcul refusé");
                self.etat = EtatSaisie {
                    expression: String::new(),
                    operande: SENTINELLE_ERREUR.to_string(),
                    attente_nouvelle_saisie: false,
                    erreur: true,
                };
                Err(err)
            }
        }
    }

    /// DEL : retire le dernier caractère de l’opérande.
    pub fn effacer(&mut self) {
        if self.etat.attente_nouvelle_saisie || self.etat.erreur {
            self.tout_effacer();
            return;
        }
        self.etat.operande.pop();
    }

    /// AC : retour à l’état initial.
    pub fn tout_effacer(&mut self) {
        self.etat = EtatSaisie::default();
    }

    fn sortir_erreur(&mut self) {
        if self.etat.erreur {
            self.tout_effacer();
        }
    }
}

fn est_operateur(c: char) -> bool {
    Operateur::depuis_symbole(c).is_some()
}

/// Remplace l’opérateur final de `expression` (sans effet si elle n’en a pas).
fn remplacer_operateur_final(expression: &mut String, op: Operateur) {
    if expression.chars().last().is_some_and(est_operateur) {
        expression.pop();
        expression.push(op.symbole());
    }
}

fn evaluer_et_formater(evaluateur: &dyn Evaluateur, expression: &str) -> Result<String, ErreurCalcul> {
    let v = evaluateur.evaluer(expression)?;
    formater_resultat(v).ok_or(ErreurCalcul::ResultatNonFini)
}
