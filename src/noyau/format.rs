// src/noyau/format.rs
//
// Affichage du résultat : arrondi à 10 chiffres significatifs,
// puis écriture décimale la plus courte qui relit la même valeur.

/// Précision d’affichage (chiffres significatifs).
pub const CHIFFRES_SIGNIFICATIFS: usize = 10;

/* ------------------------ Arrondi ------------------------ */

/// Arrondit `v` à `chiffres` chiffres significatifs (v fini).
pub fn arrondir_significatif(v: f64, chiffres: usize) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    // "{:.Ne}" arrondit correctement sur l’écriture décimale exacte de v
    let txt = format!("{:.*e}", chiffres.saturating_sub(1), v);
    txt.parse::<f64>().unwrap_or(v)
}

/* ------------------------ Écriture ------------------------ */

/// Chiffres significatifs les plus courts + position du point décimal.
///
/// v = 0.d1d2…dk × 10^point   (v > 0, fini)
fn chiffres_courts(v: f64) -> (String, i32) {
    // LowerExp de Rust = plus courte écriture qui relit v : "1.2345e3", "1e-7"
    let txt = format!("{v:e}");
    let (mantisse, exp) = txt.split_once('e').unwrap_or((txt.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let chiffres: String = mantisse.chars().filter(|c| c.is_ascii_digit()).collect();
    (chiffres, exp + 1)
}

/// Écrit un nombre fini comme le ferait une conversion “nombre -> texte” usuelle :
/// positionnel pour 1e-7 < |v| < 1e21, scientifique (d.ddde+N) sinon.
pub fn format_nombre(v: f64) -> String {
    if v == 0.0 {
        // -0 compris
        return "0".to_string();
    }

    let signe = if v < 0.0 { "-" } else { "" };
    let (d, n) = chiffres_courts(v.abs());
    let k = d.len() as i32;

    let corps = if k <= n && n <= 21 {
        // entier : chiffres puis zéros
        format!("{d}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (ent, frac) = d.split_at(n as usize);
        format!("{ent}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{d}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let signe_e = if e < 0 { '-' } else { '+' };
        let (tete, reste) = d.split_at(1);
        if reste.is_empty() {
            format!("{tete}e{signe_e}{}", e.abs())
        } else {
            format!("{tete}.{reste}e{signe_e}{}", e.abs())
        }
    };

    format!("{signe}{corps}")
}

/// Résultat prêt à afficher, ou `None` si NaN / infini.
pub fn formater_resultat(v: f64) -> Option<String> {
    let arrondi = arrondir_significatif(v, CHIFFRES_SIGNIFICATIFS);
    // l’arrondi peut déborder (1.7976931348623157e308 -> 1.797693135e308 = inf)
    if !arrondi.is_finite() {
        return None;
    }
    Some(format_nombre(arrondi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: f64) -> String {
        formater_resultat(v).unwrap_or_else(|| panic!("{v} devrait être affichable"))
    }

    #[test]
    fn entiers() {
        assert_eq!(f(4.0), "4");
        assert_eq!(f(-12.0), "-12");
        assert_eq!(f(1_000_000.0), "1000000");
    }

    #[test]
    fn zero_negatif() {
        assert_eq!(f(-0.0), "0");
    }

    #[test]
    fn bruit_binaire_efface() {
        assert_eq!(f(0.1 + 0.2), "0.3");
        assert_eq!(f(1.0 - 0.9), "0.1");
    }

    #[test]
    fn dix_chiffres_significatifs() {
        assert_eq!(f(1.0 / 3.0), "0.3333333333");
        assert_eq!(f(2.0 / 3.0), "0.6666666667");
        assert_eq!(f(123456.789012345), "123456.789");
        assert_eq!(f(12345678901.0), "12345678900");
    }

    #[test]
    fn pas_de_zeros_finals() {
        assert_eq!(f(2.5), "2.5");
        assert_eq!(f(0.125), "0.125");
    }

    #[test]
    fn petits_nombres() {
        assert_eq!(f(0.000001), "0.000001");
        assert_eq!(f(0.0000001), "1e-7");
        assert_eq!(f(0.00000012345), "1.2345e-7");
    }

    #[test]
    fn grands_nombres() {
        assert_eq!(f(1e20), "100000000000000000000");
        assert_eq!(f(1e21), "1e+21");
        assert_eq!(f(1.5e300), "1.5e+300");
        assert_eq!(f(-2.5e22), "-2.5e+22");
    }

    #[test]
    fn non_finis_refuses() {
        assert_eq!(formater_resultat(f64::INFINITY), None);
        assert_eq!(formater_resultat(f64::NEG_INFINITY), None);
        assert_eq!(formater_resultat(f64::NAN), None);
        assert_eq!(formater_resultat(f64::MAX), None);
    }
}
