// src/main.rs
//
// Calculatrice à pavé : deux points d’entrée
// - natif : journal tracing, config TOML + options CLI, puis eframe::run_native
// - wasm32 : WebRunner sur le canvas "the_canvas_id", historique en localStorage

mod app;
mod config;
mod historique;
mod noyau;

use app::AppCalc;

/// Fenêtre native et onglet du navigateur.
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Natif ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::path::PathBuf;

    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    use crate::config::{BackendHistorique, Config};

    /// Calculatrice à pavé avec historique des calculs.
    #[derive(Parser, Debug)]
    #[command(version, about)]
    pub struct Args {
        /// Fichier de configuration TOML (défaut : <config>/calculatrice-pave/config.toml)
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Backend d’historique (remplace la configuration)
        #[arg(long, value_enum)]
        pub historique: Option<BackendHistorique>,

        /// Fichier d’historique JSON (backend "fichier")
        #[arg(long)]
        pub fichier_historique: Option<PathBuf>,
    }

    pub fn init_journal() {
        let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filtre).init();
    }

    /// Configuration effective : fichier (ou défauts) puis options CLI par-dessus.
    pub fn config_effective(args: Args) -> Config {
        let mut config = Config::charger_ou_defaut(args.config);
        if let Some(b) = args.historique {
            config.historique.backend = b;
        }
        if let Some(f) = args.fichier_historique {
            config.historique.fichier = Some(f);
        }
        config
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;

    natif::init_journal();

    let config = natif::config_effective(natif::Args::parse());
    tracing::debug!(?config, "configuration");

    let fenetre = eframe::egui::ViewportBuilder::default()
        .with_inner_size([360.0, 680.0])
        .with_min_inner_size([320.0, 520.0])
        .with_title(TITRE_APP);
    let options = eframe::NativeOptions {
        viewport: fenetre,
        ..eframe::NativeOptions::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| {
            let historique = historique::ouvrir(&config.historique);
            Ok(Box::new(AppCalc::new(historique)))
        }),
    )
}

/* ------------------------ Web ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // wasm32 : tout part de `web::demarrer` (wasm_bindgen start).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::HtmlCanvasElement;

    use super::{historique, AppCalc, TITRE_APP};
    use crate::config::Config;

    /// `<canvas>` hôte, à déclarer dans index.html.
    const ID_CANVAS: &str = "the_canvas_id";

    /// Lancé au chargement du module : titre d’onglet, canvas, historique localStorage.
    #[wasm_bindgen(start)]
    pub async fn demarrer() -> Result<(), JsValue> {
        let canvas = canvas_hote()?;
        let config = Config::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| {
                    let historique = historique::ouvrir(&config.historique);
                    Ok(Box::new(AppCalc::new(historique)))
                }),
            )
            .await
    }

    fn canvas_hote() -> Result<HtmlCanvasElement, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("pas de document (hors navigateur ?)"))?;
        document.set_title(TITRE_APP);

        document
            .get_element_by_id(ID_CANVAS)
            .ok_or_else(|| JsValue::from_str("canvas hôte absent de la page"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("l’élément hôte n’est pas un <canvas>"))
    }
}
