//! Historique des calculs (port + backends)
//!
//! - mod.rs        : trait `Historique`, enregistrement, politique de capacité, ouverture
//! - memoire.rs    : liste en mémoire (base de tous les backends)
//! - fichier.rs    : fichier JSON local (natif)
//! - navigateur.rs : localStorage (wasm32)
//!
//! Contrats :
//! - `lister()` renvoie le plus récent en premier
//! - au plus `CAPACITE` enregistrements : l’ajout évince le plus ancien
//! - un enregistrement n’est jamais modifié ni supprimé seul (seulement `vider()`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{BackendHistorique, ConfigHistorique};
use crate::noyau::Calcul;

pub mod memoire;

#[cfg(not(target_arch = "wasm32"))]
pub mod fichier;

#[cfg(target_arch = "wasm32")]
pub mod navigateur;

pub use memoire::HistoriqueMemoire;

/// Nombre maximal d’enregistrements conservés.
pub const CAPACITE: usize = 50;

/// Un calcul terminé, tel que stocké.
///
/// Format persistant : `{ "id", "expression", "result", "createdAt" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enregistrement {
    pub id: String,
    pub expression: String,
    #[serde(rename = "result")]
    pub resultat: String,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cree_le: Option<DateTime<Utc>>,
}

impl Enregistrement {
    /// Nouvel enregistrement : identifiant unique + horodatage courant.
    pub fn nouveau(calcul: Calcul) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            expression: calcul.expression,
            resultat: calcul.resultat,
            cree_le: Some(Utc::now()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ErreurHistorique {
    #[error("E/S historique : {0}")]
    Io(#[from] std::io::Error),

    #[error("historique illisible : {0}")]
    Json(#[from] serde_json::Error),

    #[error("stockage navigateur : {0}")]
    Stockage(String),

    #[error("aucun emplacement disponible pour l’historique")]
    Indisponible,
}

/// Port d’historique.
pub trait Historique {
    /// Ajoute un calcul réussi, renvoie l’enregistrement créé.
    fn ajouter(&mut self, calcul: Calcul) -> Result<Enregistrement, ErreurHistorique>;

    /// Enregistrements, du plus récent au plus ancien (≤ `CAPACITE`).
    fn lister(&self) -> Result<Vec<Enregistrement>, ErreurHistorique>;

    /// Efface tout.
    fn vider(&mut self) -> Result<(), ErreurHistorique>;
}

/// Ouvre le backend configuré ; en cas d’échec, repli sur la mémoire (journalisé).
pub fn ouvrir(config: &ConfigHistorique) -> Box<dyn Historique> {
    match ouvrir_backend(config) {
        Ok(h) => {
            tracing::info!(backend = ?config.backend, "historique ouvert");
            h
        }
        Err(e) => {
            tracing::warn!(
                backend = ?config.backend,
                erreur = %e,
                "historique indisponible, repli en mémoire"
            );
            Box::new(HistoriqueMemoire::new())
        }
    }
}

fn ouvrir_backend(config: &ConfigHistorique) -> Result<Box<dyn Historique>, ErreurHistorique> {
    match config.backend {
        BackendHistorique::Memoire => Ok(Box::new(HistoriqueMemoire::new())),

        #[cfg(not(target_arch = "wasm32"))]
        BackendHistorique::Fichier => {
            let chemin = match &config.fichier {
                Some(p) => p.clone(),
                None => fichier::chemin_par_defaut().ok_or(ErreurHistorique::Indisponible)?,
            };
            Ok(Box::new(fichier::HistoriqueFichier::ouvrir(chemin)?))
        }

        #[cfg(target_arch = "wasm32")]
        BackendHistorique::Navigateur => Ok(Box::new(navigateur::HistoriqueNavigateur::ouvrir()?)),

        // backend propre à l’autre cible (ex: "navigateur" en natif)
        #[allow(unreachable_patterns)]
        _ => Err(ErreurHistorique::Indisponible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_persistant() {
        let e = Enregistrement {
            id: "1".into(),
            expression: "2+2".into(),
            resultat: "4".into(),
            cree_le: None,
        };
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"id":"1","expression":"2+2","result":"4"}"#);

        let relu: Enregistrement = serde_json::from_str(
            r#"{"id":"7","expression":"1/4","result":"0.25","createdAt":"2026-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(relu.resultat, "0.25");
        assert!(relu.cree_le.is_some());
    }

    #[test]
    fn identifiants_uniques() {
        let c = Calcul {
            expression: "1+1".into(),
            resultat: "2".into(),
        };
        let a = Enregistrement::nouveau(c.clone());
        let b = Enregistrement::nouveau(c);
        assert_ne!(a.id, b.id);
        assert!(a.cree_le.is_some());
    }

    #[test]
    fn backend_etranger_replie_en_memoire() {
        #[cfg(not(target_arch = "wasm32"))]
        let backend = BackendHistorique::Navigateur;
        #[cfg(target_arch = "wasm32")]
        let backend = BackendHistorique::Fichier;

        let config = ConfigHistorique {
            backend,
            fichier: None,
        };
        let mut h = ouvrir(&config);
        h.ajouter(Calcul {
            expression: "1+1".into(),
            resultat: "2".into(),
        })
        .unwrap();
        assert_eq!(h.lister().unwrap().len(), 1);
    }
}
