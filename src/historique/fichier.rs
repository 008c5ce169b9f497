// src/historique/fichier.rs
//
// Historique persistant (natif) : tableau JSON dans un fichier.
// - chargé à l’ouverture (absent => vide, illisible => erreur)
// - réécrit en entier après chaque modification (fichier temporaire + rename)

use std::fs;
use std::path::PathBuf;

use super::{Enregistrement, ErreurHistorique, Historique, HistoriqueMemoire};
use crate::noyau::Calcul;

/// `<données utilisateur>/calculatrice-pave/historique.json`
pub fn chemin_par_defaut() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("calculatrice-pave").join("historique.json"))
}

#[derive(Debug)]
pub struct HistoriqueFichier {
    chemin: PathBuf,
    memoire: HistoriqueMemoire,
}

impl HistoriqueFichier {
    pub fn ouvrir(chemin: PathBuf) -> Result<Self, ErreurHistorique> {
        let memoire = if chemin.exists() {
            let texte = fs::read_to_string(&chemin)?;
            if texte.trim().is_empty() {
                HistoriqueMemoire::new()
            } else {
                let entrees: Vec<Enregistrement> = serde_json::from_str(&texte)?;
                HistoriqueMemoire::depuis(entrees)
            }
        } else {
            HistoriqueMemoire::new()
        };

        tracing::debug!(chemin = %chemin.display(), entrees = memoire.len(), "historique chargé");
        Ok(Self { chemin, memoire })
    }

    /// Écrit `memoire` sur disque ; l’état en mémoire n’est remplacé qu’après succès.
    fn valider(&mut self, memoire: HistoriqueMemoire) -> Result<(), ErreurHistorique> {
        self.ecrire(&memoire)?;
        self.memoire = memoire;
        Ok(())
    }

    fn ecrire(&self, memoire: &HistoriqueMemoire) -> Result<(), ErreurHistorique> {
        if let Some(parent) = self.chemin.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&memoire.entrees())?;
        let tmp = self.chemin.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.chemin)?;
        Ok(())
    }
}

impl Historique for HistoriqueFichier {
    fn ajouter(&mut self, calcul: Calcul) -> Result<Enregistrement, ErreurHistorique> {
        let mut suivante = self.memoire.clone();
        let e = suivante.ajouter(calcul)?;
        self.valider(suivante)?;
        Ok(e)
    }

    fn lister(&self) -> Result<Vec<Enregistrement>, ErreurHistorique> {
        self.memoire.lister()
    }

    fn vider(&mut self) -> Result<(), ErreurHistorique> {
        self.valider(HistoriqueMemoire::new())
    }
}
