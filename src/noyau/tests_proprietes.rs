//! Tests de propriétés (campagne) : saisie fidèle + affichage relisible.
//!
//! - toute suite de chiffres avec au plus un '.' est conservée à l’identique
//! - un '.' de trop ne change rien
//! - relire le résultat affiché redonne la même valeur (affichage idempotent)

use proptest::prelude::*;

use super::eval::{Evaluateur, EvaluateurRationnel};
use super::format::{arrondir_significatif, formater_resultat, CHIFFRES_SIGNIFICATIFS};
use super::saisie::{Evenement, Saisie};

/// Suite de chiffres, avec éventuellement un seul '.' inséré quelque part.
fn operande_valide() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::char::range('0', '9'), 1..16),
        prop::option::of(any::<prop::sample::Index>()),
    )
        .prop_map(|(chiffres, point)| {
            let mut s: String = chiffres.into_iter().collect();
            if let Some(idx) = point {
                let pos = idx.index(s.len() + 1);
                s.insert(pos, '.');
            }
            s
        })
}

fn taper(s: &mut Saisie, texte: &str) {
    for c in texte.chars() {
        if let Some(ev) = Evenement::depuis_caractere(c) {
            let _ = s.traiter(ev, &EvaluateurRationnel);
        }
    }
}

proptest! {
    #[test]
    fn prop_chiffres_conserves(texte in operande_valide()) {
        let mut s = Saisie::new();
        taper(&mut s, &texte);
        prop_assert_eq!(s.etat().operande.as_str(), texte.as_str());
        prop_assert_eq!(s.expression(), "");
    }

    #[test]
    fn prop_second_point_sans_effet(texte in operande_valide()) {
        prop_assume!(texte.contains('.'));
        let mut s = Saisie::new();
        taper(&mut s, &texte);
        let avant = s.etat().clone();
        s.saisir_chiffre('.');
        prop_assert_eq!(s.etat(), &avant);
    }

    #[test]
    fn prop_affichage_relisible(
        v in prop::num::f64::POSITIVE
            | prop::num::f64::NEGATIVE
            | prop::num::f64::NORMAL
            | prop::num::f64::ZERO
    ) {
        // au voisinage de f64::MAX l’arrondi déborde : rien à afficher
        let Some(affiche) = formater_resultat(v) else { return Ok(()) };
        let relu = EvaluateurRationnel.evaluer(&affiche)
            .unwrap_or_else(|e| panic!("{affiche:?} illisible: {e}"));
        prop_assert_eq!(relu, arrondir_significatif(v, CHIFFRES_SIGNIFICATIFS));
        // idempotence : reformater la valeur relue ne change rien
        prop_assert_eq!(formater_resultat(relu), Some(affiche));
    }

    #[test]
    fn prop_calcul_saisi_puis_relu(a in 0u32..100_000, b in 1u32..1_000) {
        // "a/b=" puis relecture du résultat comme simple littéral
        let mut s = Saisie::new();
        taper(&mut s, &format!("{a}/{b}"));
        let calcul = s.traiter(Evenement::Egal, &EvaluateurRationnel)
            .expect("a/b valide")
            .expect("calcul réussi");
        let relu = EvaluateurRationnel.evaluer(&calcul.resultat).expect("littéral");
        prop_assert_eq!(formater_resultat(relu), Some(calcul.resultat));
    }
}
