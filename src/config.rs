//! src/config.rs
//!
//! Configuration (natif : fichier TOML optionnel + options de ligne de commande).
//!
//! ```toml
//! [historique]
//! backend = "fichier"   # "memoire" | "fichier" | "navigateur"
//! fichier = "/chemin/vers/historique.json"
//! ```
//!
//! Fichier absent => valeurs par défaut. En wasm32 : valeurs par défaut seulement.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendHistorique {
    Memoire,
    Fichier,
    Navigateur,
}

impl Default for BackendHistorique {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            BackendHistorique::Navigateur
        } else {
            BackendHistorique::Fichier
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigHistorique {
    pub backend: BackendHistorique,
    /// Remplace l’emplacement par défaut du backend "fichier".
    pub fichier: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub historique: ConfigHistorique,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(thiserror::Error, Debug)]
pub enum ErreurConfig {
    #[error("lecture de la configuration : {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration invalide : {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// `<config utilisateur>/calculatrice-pave/config.toml`
    pub fn chemin_par_defaut() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("calculatrice-pave").join("config.toml"))
    }

    pub fn depuis_toml(texte: &str) -> Result<Self, ErreurConfig> {
        Ok(toml::from_str(texte)?)
    }

    /// Charge `chemin` (ou l’emplacement par défaut). Fichier absent => défauts.
    pub fn charger(chemin: Option<PathBuf>) -> Result<Self, ErreurConfig> {
        let Some(chemin) = chemin.or_else(Self::chemin_par_defaut) else {
            return Ok(Self::default());
        };
        if !chemin.exists() {
            tracing::debug!(chemin = %chemin.display(), "pas de configuration, valeurs par défaut");
            return Ok(Self::default());
        }
        let texte = std::fs::read_to_string(&chemin)?;
        Self::depuis_toml(&texte)
    }

    /// Variante tolérante : toute erreur est journalisée, les défauts prennent le relais.
    pub fn charger_ou_defaut(chemin: Option<PathBuf>) -> Self {
        Self::charger(chemin).unwrap_or_else(|e| {
            tracing::warn!(erreur = %e, "configuration ignorée");
            Self::default()
        })
    }
}
