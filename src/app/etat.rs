//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : relier la machine de saisie (noyau) aux deux ports
//! (évaluateur + historique), et garder la liste d’historique à afficher.
//!
//! Contrats :
//! - Aucune logique d’affichage ici.
//! - Un échec d’historique n’est JAMAIS une erreur de calcul : journalisé, puis on continue.
//! - Un seul propriétaire de l’état de saisie (pas de cellules d’état dispersées).

use crate::historique::{Enregistrement, Historique, HistoriqueMemoire};
use crate::noyau::{Calcul, Evaluateur, EvaluateurRationnel, Evenement, Saisie};

pub struct AppCalc {
    // --- saisie + ports ---
    pub saisie: Saisie,
    evaluateur: Box<dyn Evaluateur>,
    historique: Box<dyn Historique>,

    // --- historique affiché (plus récent en premier) ---
    pub enregistrements: Vec<Enregistrement>,

    // --- UX ---
    pub historique_visible: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Box::new(HistoriqueMemoire::new()))
    }
}

impl AppCalc {
    pub fn new(historique: Box<dyn Historique>) -> Self {
        Self::avec_evaluateur(Box::new(EvaluateurRationnel), historique)
    }

    pub fn avec_evaluateur(evaluateur: Box<dyn Evaluateur>, historique: Box<dyn Historique>) -> Self {
        let mut app = Self {
            saisie: Saisie::new(),
            evaluateur,
            historique,
            enregistrements: Vec::new(),
            historique_visible: true,
        };
        app.rafraichir_historique();
        app
    }

    /* ------------------------ Actions ------------------------ */

    /// Une touche (pavé ou clavier).
    pub fn traiter(&mut self, ev: Evenement) {
        // Err : déjà visible (sentinelle) et journalisé par la saisie
        if let Ok(Some(calcul)) = self.saisie.traiter(ev, self.evaluateur.as_ref()) {
            self.historiser(calcul);
        }
        tracing::trace!(?ev, etat = ?self.saisie.etat(), "touche traitée");
    }

    /// Efface tout l’historique (bouton du panneau).
    pub fn vider_historique(&mut self) {
        if let Err(e) = self.historique.vider() {
            tracing::warn!(erreur = %e, "impossible de vider l’historique");
        }
        self.rafraichir_historique();
    }

    pub fn basculer_historique(&mut self) {
        self.historique_visible = !self.historique_visible;
    }

    /* ------------------------ Utilitaires ------------------------ */

    fn historiser(&mut self, calcul: Calcul) {
        match self.historique.ajouter(calcul) {
            Ok(e) => tracing::trace!(id = %e.id, "calcul historisé"),
            Err(e) => {
                tracing::warn!(erreur = %e, "calcul non historisé");
                return;
            }
        }
        self.rafraichir_historique();
    }

    fn rafraichir_historique(&mut self) {
        match self.historique.lister() {
            Ok(l) => self.enregistrements = l,
            Err(e) => tracing::warn!(erreur = %e, "lecture de l’historique impossible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::historique::ErreurHistorique;
    use crate::noyau::saisie::SENTINELLE_ERREUR;

    fn taper(app: &mut AppCalc, touches: &str) {
        for c in touches.chars() {
            if let Some(ev) = Evenement::depuis_caractere(c) {
                app.traiter(ev);
            }
        }
    }

    /// Historique qui refuse toute écriture.
    struct HistoriqueEnPanne;
    impl Historique for HistoriqueEnPanne {
        fn ajouter(&mut self, _: Calcul) -> Result<Enregistrement, ErreurHistorique> {
            Err(ErreurHistorique::Stockage("disque plein".into()))
        }
        fn lister(&self) -> Result<Vec<Enregistrement>, ErreurHistorique> {
            Ok(Vec::new())
        }
        fn vider(&mut self) -> Result<(), ErreurHistorique> {
            Err(ErreurHistorique::Stockage("disque plein".into()))
        }
    }

    #[test]
    fn calcul_reussi_historise() {
        let mut app = AppCalc::default();
        taper(&mut app, "2+2=");
        assert_eq!(app.saisie.affichage(), "4");
        assert_eq!(app.enregistrements.len(), 1);
        assert_eq!(app.enregistrements[0].expression, "2+2");
        assert_eq!(app.enregistrements[0].resultat, "4");
    }

    #[test]
    fn calcul_rate_non_historise() {
        let mut app = AppCalc::default();
        taper(&mut app, "5/0=");
        assert!(app.saisie.en_erreur());
        assert_eq!(app.saisie.affichage(), SENTINELLE_ERREUR);
        assert!(app.enregistrements.is_empty());
    }

    #[test]
    fn panne_d_historique_sans_effet_sur_le_resultat() {
        let mut app = AppCalc::new(Box::new(HistoriqueEnPanne));
        taper(&mut app, "6*7=");
        assert_eq!(app.saisie.affichage(), "42");
        assert!(!app.saisie.en_erreur());
        assert!(app.enregistrements.is_empty());

        app.vider_historique();
        assert_eq!(app.saisie.affichage(), "42");
    }

    #[test]
    fn historique_plus_recent_en_tete_et_vidable() {
        let mut app = AppCalc::default();
        taper(&mut app, "1+1=");
        taper(&mut app, "3*3=");
        assert_eq!(app.enregistrements[0].resultat, "9");
        assert_eq!(app.enregistrements[1].resultat, "2");

        app.vider_historique();
        assert!(app.enregistrements.is_empty());
    }

    #[test]
    fn historique_existant_charge_au_demarrage() {
        let mut h = HistoriqueMemoire::new();
        h.ajouter(Calcul {
            expression: "8/2".into(),
            resultat: "4".into(),
        })
        .unwrap();
        let app = AppCalc::new(Box::new(h));
        assert_eq!(app.enregistrements.len(), 1);
    }

    #[test]
    fn bascule_du_panneau() {
        let mut app = AppCalc::default();
        assert!(app.historique_visible);
        app.basculer_historique();
        assert!(!app.historique_visible);
    }
}
