//! Tests fuzz safe : robustesse + invariants de la machine de saisie.
//!
//! But : marteler la saisie avec des suites de touches arbitraires.
//! - génération bornée (proptest, longueur ≤ 60 touches)
//! - invariants vérifiés APRÈS CHAQUE touche :
//!   - au plus un '.' dans l’opérande (hors sentinelle)
//!   - jamais deux opérateurs consécutifs à la fin de l’expression
//!   - erreur => opérande = sentinelle ET expression vide
//!   - aucune panique, quel que soit l’ordre des touches

use proptest::prelude::*;

use super::eval::EvaluateurRationnel;
use super::saisie::{Evenement, Operateur, Saisie, SENTINELLE_ERREUR};

/* ------------------------ Génération de touches ------------------------ */

fn touche() -> impl Strategy<Value = Evenement> {
    prop_oneof![
        // chiffres majoritaires (sinon les expressions restent triviales)
        6 => prop::sample::select(vec!['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'])
            .prop_map(Evenement::Chiffre),
        1 => Just(Evenement::Chiffre('.')),
        3 => prop::sample::select(vec![
            Operateur::Plus,
            Operateur::Moins,
            Operateur::Fois,
            Operateur::Divise,
            Operateur::Modulo,
        ])
        .prop_map(Evenement::Operateur),
        1 => Just(Evenement::Egal),
        1 => Just(Evenement::Effacer),
        1 => Just(Evenement::ToutEffacer),
    ]
}

/* ------------------------ Invariants ------------------------ */

fn est_op(c: char) -> bool {
    Operateur::depuis_symbole(c).is_some()
}

fn check_invariants(s: &Saisie) -> Result<(), TestCaseError> {
    let e = s.etat();

    if e.erreur {
        prop_assert_eq!(e.operande.as_str(), SENTINELLE_ERREUR);
        prop_assert!(e.expression.is_empty());
        return Ok(());
    }

    prop_assert!(
        e.operande.matches('.').count() <= 1,
        "deux points dans {:?}",
        e.operande
    );

    let fin: Vec<char> = e.expression.chars().rev().take(2).collect();
    prop_assert!(
        !(fin.len() == 2 && est_op(fin[0]) && est_op(fin[1])),
        "deux opérateurs en fin de {:?}",
        e.expression
    );

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn fuzz_invariants_apres_chaque_touche(touches in prop::collection::vec(touche(), 0..60)) {
        let mut s = Saisie::new();
        for ev in touches {
            let _ = s.traiter(ev, &EvaluateurRationnel);
            check_invariants(&s)?;
        }
    }

    #[test]
    fn fuzz_resultat_affiche_relisible(touches in prop::collection::vec(touche(), 0..60)) {
        // Tout résultat affiché après un "=" réussi est lui-même une expression valide.
        let mut s = Saisie::new();
        for ev in touches {
            if let Ok(Some(calcul)) = s.traiter(ev, &EvaluateurRationnel) {
                prop_assert_eq!(s.affichage(), calcul.resultat.as_str());
                let mut relu = Saisie::new();
                for c in calcul.resultat.chars() {
                    let ev = Evenement::depuis_caractere(c);
                    // écriture scientifique (e+21) : hors pavé, on s’arrête là
                    let Some(ev) = ev else { break };
                    let _ = relu.traiter(ev, &EvaluateurRationnel);
                }
                check_invariants(&relu)?;
            }
        }
    }
}
