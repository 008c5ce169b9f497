// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Afficheur deux lignes : expression (contexte) + opérande/résultat ("0" si vide)
// - Pavé tactile : gros boutons, chaque bouton = un Evenement du noyau
// - Panneau d’historique : plus récent en haut, heure HH:MM, bouton "Vider"
//
// Le clavier physique est traité dans app.rs (un seul point d’entrée par frame).

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{Evenement, Operateur};

const TAILLE_BOUTON: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_afficheur(ui);

                ui.add_space(8.0);

                self.ui_pave_numerique(ui);

                if self.historique_visible {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);

                    self.ui_historique(ui);
                }
            });
    }

    fn ui_afficheur(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    // ligne de contexte (hauteur stable même vide)
                    let contexte = self.saisie.expression();
                    ui.label(
                        egui::RichText::new(if contexte.is_empty() { " " } else { contexte })
                            .monospace()
                            .weak(),
                    );

                    let principal = egui::RichText::new(self.saisie.affichage())
                        .monospace()
                        .size(34.0);
                    if self.saisie.en_erreur() {
                        ui.label(principal.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(principal.strong());
                    }
                });
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        use Evenement::{Chiffre, Effacer, Egal, ToutEffacer};
        use Operateur::{Divise, Fois, Modulo, Moins, Plus};

        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "AC", ToutEffacer);
                self.bouton(ui, "DEL", Effacer);
                self.bouton(ui, "%", Evenement::Operateur(Modulo));
                self.bouton(ui, "/", Evenement::Operateur(Divise));
                ui.end_row();

                self.bouton(ui, "7", Chiffre('7'));
                self.bouton(ui, "8", Chiffre('8'));
                self.bouton(ui, "9", Chiffre('9'));
                self.bouton(ui, "*", Evenement::Operateur(Fois));
                ui.end_row();

                self.bouton(ui, "4", Chiffre('4'));
                self.bouton(ui, "5", Chiffre('5'));
                self.bouton(ui, "6", Chiffre('6'));
                self.bouton(ui, "-", Evenement::Operateur(Moins));
                ui.end_row();

                self.bouton(ui, "1", Chiffre('1'));
                self.bouton(ui, "2", Chiffre('2'));
                self.bouton(ui, "3", Chiffre('3'));
                self.bouton(ui, "+", Evenement::Operateur(Plus));
                ui.end_row();

                self.bouton(ui, "0", Chiffre('0'));
                self.bouton(ui, ".", Chiffre('.'));
                self.bouton(ui, "=", Egal);
                let tip = if self.historique_visible {
                    "Masquer l’historique"
                } else {
                    "Afficher l’historique"
                };
                let resp = ui
                    .add_sized(TAILLE_BOUTON, egui::Button::new("Hist."))
                    .on_hover_text(tip);
                if resp.clicked() {
                    self.basculer_historique();
                }
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Historique").strong());
            if !self.enregistrements.is_empty() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Vider").clicked() {
                        self.vider_historique();
                    }
                });
            }
        });

        ui.add_space(4.0);

        if self.enregistrements.is_empty() {
            ui.weak("Aucun calcul récent");
            return;
        }

        for e in &self.enregistrements {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.monospace(e.expression.as_str());
                    if let Some(t) = e.cree_le {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let heure = t.with_timezone(&chrono::Local).format("%H:%M");
                            ui.weak(heure.to_string());
                        });
                    }
                });
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(egui::RichText::new(format!("= {}", e.resultat)).strong());
                });
            });
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, ev: Evenement) {
        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(label));
        if resp.clicked() {
            self.traiter(ev);
        }
    }
}
