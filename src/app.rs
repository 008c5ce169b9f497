// src/app.rs
//
// Calculatrice à pavé — module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Le clavier physique est lu ICI, une fois par frame, et traduit en Evenement.
// - La vue ne fait que dessiner et relayer les clics de boutons.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Evenement;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Clavier global (natif + web) :
        // 0-9 . + - * / % = (texte), Enter = "=", Backspace = DEL, Escape = AC
        let evenements = ctx.input(|i| evenements_clavier(&i.events));
        for ev in evenements {
            self.traiter(ev);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}

/// Traduit les événements clavier d’une frame en événements de saisie (ordre conservé).
pub fn evenements_clavier(events: &[egui::Event]) -> Vec<Evenement> {
    let mut out = Vec::new();
    for e in events {
        match e {
            egui::Event::Text(t) => out.extend(t.chars().filter_map(Evenement::depuis_caractere)),
            egui::Event::Key {
                key, pressed: true, ..
            } => {
                let ev = match key {
                    egui::Key::Enter => Some(Evenement::Egal),
                    egui::Key::Backspace => Some(Evenement::Effacer),
                    egui::Key::Escape => Some(Evenement::ToutEffacer),
                    _ => None,
                };
                out.extend(ev);
            }
            _ => {}
        }
    }
    out
}
