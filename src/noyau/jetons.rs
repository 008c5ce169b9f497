// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::eval::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    Plus,
    Minus,
    Star,
    Slash,
    Percent, // % (modulo)

    // Moins unaire : jamais produit par tokenize, seulement par to_rpn.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12)
/// - décimaux (ex: 0.5, .5, 5.) -> Num exact (5/10, …)
/// - exposant (ex: 1.5e+21, 2e-7) -> Num exact
/// - opérateurs + - * / %
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (rat, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(rat));
            i = suivant;
            continue;
        }

        return Err(ErreurEval::Syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Lit un littéral décimal à partir de `debut`.
/// Renvoie la valeur exacte et l’index du premier caractère non consommé.
fn lire_nombre(chars: &[char], debut: usize) -> Result<(BigRational, usize), ErreurEval> {
    let mut i = debut;

    let mut chiffres = String::new();
    while i < chars.len() && chars[i].is_ascii_digit() {
        chiffres.push(chars[i]);
        i += 1;
    }

    // partie fractionnaire : au plus un '.'
    let mut decimales: usize = 0;
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            chiffres.push(chars[i]);
            decimales += 1;
            i += 1;
        }
    }

    if chiffres.is_empty() {
        return Err(ErreurEval::Syntaxe("nombre invalide: '.'".into()));
    }
    if i < chars.len() && chars[i] == '.' {
        return Err(ErreurEval::Syntaxe("nombre invalide: deux points décimaux".into()));
    }

    // exposant : e[+-]chiffres (sinon 'e' reste un caractère inattendu)
    let mut exposant: i64 = 0;
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        let mut negatif = false;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            negatif = chars[j] == '-';
            j += 1;
        }
        let start_e = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j > start_e {
            let e_str: String = chars[start_e..j].iter().collect();
            let e: i64 = e_str
                .parse()
                .map_err(|_| ErreurEval::Syntaxe("exposant trop grand".into()))?;
            exposant = if negatif { -e } else { e };
            i = j;
        }
    }

    let mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurEval::Syntaxe("nombre invalide".into()))?;

    // valeur = mantisse × 10^(exposant - decimales)
    let puissance = exposant - decimales as i64;
    if puissance.unsigned_abs() > MAX_PUISSANCE_DIX {
        return Err(ErreurEval::Syntaxe("exposant trop grand".into()));
    }
    let dix = BigInt::from(10).pow(puissance.unsigned_abs() as u32);
    let rat = if puissance >= 0 {
        BigRational::from_integer(mantisse * dix)
    } else {
        BigRational::new(mantisse, dix)
    };

    Ok((rat, i))
}

/// Garde-fou : au-delà, le résultat sortirait de toute façon de la plage f64.
const MAX_PUISSANCE_DIX: u64 = 4096;

/// Format utilitaire (debug/journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
