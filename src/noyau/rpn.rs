// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur exacte
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur les rationnels (aucune perte avant la conversion f64)
//
// Règles:
// - Précédences : + - (1) < * / % (2) < moins unaire (3)
// - Associativité gauche pour les binaires, moins unaire préfixe (droite)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, c’est Tok::Neg : "2*-3" => "2 3 neg *"
// - Modulo : a % b = a - b*floor(a/b) (signe du diviseur), a % 0 = a

use num_rational::BigRational;
use num_traits::Zero;

use super::eval::ErreurEval;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent => 2,
        Tok::Neg => 3,
        _ => 0,
    }
}

fn invalide() -> ErreurEval {
    ErreurEval::Syntaxe("expression invalide".into())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(1), Plus, Num(2), Star, Num(3)]
///   rpn:    [Num(1), Num(2), Num(3), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(invalide());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(invalide());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(invalide());
                }
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurEval::Syntaxe("parenthèse fermante sans ouvrante".into()));
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // préfixe : on empile sans dépiler (associativité droite)
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent => {
                if !prev_was_value {
                    return Err(invalide());
                }
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(invalide()),
        }
    }

    // opérateur final sans opérande (ex: "2+")
    if !prev_was_value {
        return Err(invalide());
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::Syntaxe("parenthèses non fermées".into()));
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN sur les rationnels.
pub fn eval_rpn(rpn: &[Tok]) -> Result<BigRational, ErreurEval> {
    let mut st: Vec<BigRational> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push(r),

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent => {
                let b = st.pop().ok_or_else(invalide)?;
                let a = st.pop().ok_or_else(invalide)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => {
                        if b.is_zero() {
                            return Err(ErreurEval::DivisionParZero);
                        }
                        a / b
                    }
                    _ => modulo(a, b),
                };

                st.push(v);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurEval::Syntaxe("parenthèse inattendue en RPN".into()))
            }
        }
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().ok_or_else(invalide)
}

/// Modulo “plancher” : le reste prend le signe du diviseur.
fn modulo(a: BigRational, b: BigRational) -> BigRational {
    if b.is_zero() {
        return a;
    }
    let q = (&a / &b).floor();
    a - b * q
}
