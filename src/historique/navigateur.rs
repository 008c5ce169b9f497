// src/historique/navigateur.rs
//
// Historique persistant (wasm32) : tableau JSON dans window.localStorage,
// sous une clé fixe. Même politique que le fichier : charger, déléguer, réécrire.

use web_sys::{window, Storage};

use super::{Enregistrement, ErreurHistorique, Historique, HistoriqueMemoire};
use crate::noyau::Calcul;

/// Clé localStorage.
pub const CLE_STOCKAGE: &str = "calculatrice-pave.historique";

pub struct HistoriqueNavigateur {
    stockage: Storage,
    memoire: HistoriqueMemoire,
}

fn js_err(e: wasm_bindgen::JsValue) -> ErreurHistorique {
    ErreurHistorique::Stockage(format!("{e:?}"))
}

impl HistoriqueNavigateur {
    pub fn ouvrir() -> Result<Self, ErreurHistorique> {
        let w = window().ok_or(ErreurHistorique::Indisponible)?;
        let stockage = w
            .local_storage()
            .map_err(js_err)?
            .ok_or(ErreurHistorique::Indisponible)?;

        let memoire = match stockage.get_item(CLE_STOCKAGE).map_err(js_err)? {
            Some(texte) if !texte.trim().is_empty() => {
                let entrees: Vec<Enregistrement> = serde_json::from_str(&texte)?;
                HistoriqueMemoire::depuis(entrees)
            }
            _ => HistoriqueMemoire::new(),
        };

        Ok(Self { stockage, memoire })
    }

    fn ecrire(&self, memoire: &HistoriqueMemoire) -> Result<(), ErreurHistorique> {
        let json = serde_json::to_string(&memoire.entrees())?;
        self.stockage
            .set_item(CLE_STOCKAGE, &json)
            .map_err(js_err)
    }
}

impl Historique for HistoriqueNavigateur {
    fn ajouter(&mut self, calcul: Calcul) -> Result<Enregistrement, ErreurHistorique> {
        // stockage d’abord : un refus (quota) ne laisse rien en mémoire
        let mut suivante = self.memoire.clone();
        let e = suivante.ajouter(calcul)?;
        self.ecrire(&suivante)?;
        self.memoire = suivante;
        Ok(e)
    }

    fn lister(&self) -> Result<Vec<Enregistrement>, ErreurHistorique> {
        self.memoire.lister()
    }

    fn vider(&mut self) -> Result<(), ErreurHistorique> {
        self.stockage.remove_item(CLE_STOCKAGE).map_err(js_err)?;
        self.memoire.vider()
    }
}
