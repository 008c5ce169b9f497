// src/historique/memoire.rs

use std::collections::VecDeque;

use super::{Enregistrement, ErreurHistorique, Historique, CAPACITE};
use crate::noyau::Calcul;

/// Historique en mémoire (le plus récent en tête).
///
/// Sert aussi de tampon aux backends persistants : ils chargent, délèguent, puis réécrivent.
#[derive(Clone, Debug, Default)]
pub struct HistoriqueMemoire {
    entrees: VecDeque<Enregistrement>,
}

impl HistoriqueMemoire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reprend une liste déjà ordonnée (plus récent en premier), bornée à `CAPACITE`.
    pub fn depuis(entrees: Vec<Enregistrement>) -> Self {
        let mut entrees: VecDeque<Enregistrement> = entrees.into();
        entrees.truncate(CAPACITE);
        Self { entrees }
    }

    /// Insère en tête, évince le plus ancien au-delà de la capacité.
    pub fn inserer(&mut self, e: Enregistrement) {
        self.entrees.push_front(e);
        self.entrees.truncate(CAPACITE);
    }

    pub fn entrees(&self) -> Vec<Enregistrement> {
        self.entrees.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }
}

impl Historique for HistoriqueMemoire {
    fn ajouter(&mut self, calcul: Calcul) -> Result<Enregistrement, ErreurHistorique> {
        let e = Enregistrement::nouveau(calcul);
        self.inserer(e.clone());
        Ok(e)
    }

    fn lister(&self) -> Result<Vec<Enregistrement>, ErreurHistorique> {
        Ok(self.entrees())
    }

    fn vider(&mut self) -> Result<(), ErreurHistorique> {
        self.entrees.clear();
        Ok(())
    }
}
