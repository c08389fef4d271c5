// src/noyau/format.rs

/// Précision par défaut : 10 chiffres significatifs.
pub const CHIFFRES_DEFAUT: usize = 10;

/// Garde-fou : au-delà de 17 chiffres, un f64 n'a plus rien à dire.
pub const CHIFFRES_MAX: usize = 17;

/// Bascule en notation scientifique à partir de 10^16…
const ORDRE_SCI_HAUT: i32 = 16;
/// …et en dessous de 10^-5 (comme le "%g" historique).
const ORDRE_SCI_BAS: i32 = -5;

/* ------------------------ Détection entier ------------------------ */

/// La valeur est-elle mathématiquement entière ? (flag d'affichage)
pub fn est_entier(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}

/* ------------------------ Arrondi significatif ------------------------ */

/// Ordre de grandeur : exposant e tel que 10^e <= |v| < 10^(e+1).
/// Corrige les imprécisions de log10 aux puissances de 10 exactes.
fn ordre_de_grandeur(v: f64) -> i32 {
    let mut ordre = v.abs().log10().floor() as i32;
    if v.abs() / 10f64.powi(ordre) >= 10.0 {
        ordre += 1;
    } else if v.abs() / 10f64.powi(ordre) < 1.0 {
        ordre -= 1;
    }
    ordre
}

/// Arrondit à `chiffres` chiffres significatifs.
/// Entrée supposée finie (l'évaluateur ne laisse rien passer d'autre).
pub fn arrondi_significatif(v: f64, chiffres: usize) -> f64 {
    if v == 0.0 {
        return 0.0;
    }
    let chiffres = chiffres.clamp(1, CHIFFRES_MAX) as i32;

    let ordre = ordre_de_grandeur(v);
    let facteur = 10f64.powi(chiffres - 1 - ordre);
    if !facteur.is_finite() || facteur == 0.0 {
        // magnitude extrême : le facteur 10^k sort du domaine f64,
        // on renvoie la valeur telle quelle (l'affichage passe par la mantisse)
        return v;
    }
    (v * facteur).round() / facteur
}

/* ------------------------ Affichage ------------------------ */

/// Formate une valeur à `chiffres` chiffres significatifs, zéros finaux
/// retirés. Notation positionnelle dans la plage "lisible", scientifique
/// au-delà (1e300, 2.5e-7).
pub fn format_valeur(v: f64, chiffres: usize) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let ordre = ordre_de_grandeur(v);

    if (ORDRE_SCI_BAS..ORDRE_SCI_HAUT).contains(&ordre) {
        return format_positionnel(arrondi_significatif(v, chiffres));
    }

    // Notation scientifique : mantisse arrondie séparément pour éviter
    // les facteurs 10^k hors bornes sur les magnitudes extrêmes.
    let mut ordre = ordre;
    let mut mantisse = arrondi_significatif(v / 10f64.powi(ordre), chiffres);
    if mantisse.abs() >= 10.0 {
        // 9.99… arrondi à 10 : on reporte sur l'exposant
        mantisse /= 10.0;
        ordre += 1;
    }
    format!("{}e{ordre}", format_positionnel(mantisse))
}

/// Rendu positionnel : entier sans point décimal, sinon le plus court
/// affichage exact de Rust (déjà sans zéros finaux).
fn format_positionnel(v: f64) -> String {
    if est_entier(v) && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
