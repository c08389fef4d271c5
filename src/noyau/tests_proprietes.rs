//! Tests propriétés (campagne) : vérité terrain + conventions + limites.
//!
//! But : vérifier le contrat complet du pipeline sans état caché.
//! - table de vérité calculée indépendamment (précédence standard)
//! - conventions documentées : -2**2, associativité de '**', signe du modulo
//! - taxonomie d'erreurs : chaque sorte d'erreur a un déclencheur connu
//! - bornes : profondeur et longueur plafonnées, jamais de débordement
//! - idempotence : deux appels identiques, deux résultats identiques

use super::analyse::{LONGUEUR_MAX, PROFONDEUR_MAX};
use super::erreurs::{ErreurCalc, ErreurEval, ErreurParse};
use super::eval::eval_expression;
use super::format::{format_valeur, CHIFFRES_DEFAUT};

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .valeur
}

fn eval_err(expr: &str) -> ErreurCalc {
    match eval_expression(expr) {
        Ok(v) => panic!("expr={expr:?} aurait dû échouer, a donné {}", v.valeur),
        Err(e) => e,
    }
}

fn assert_vaut(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0),
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

/* ------------------------ Vérité terrain (précédence) ------------------------ */

#[test]
fn prop_table_de_verite() {
    // (expression, valeur calculée à la main avec la précédence standard)
    let table: &[(&str, f64)] = &[
        ("1+1", 2.0),
        ("2+2*3", 8.0),
        ("(2+2)*3", 12.0),
        ("10-3-2", 5.0),
        ("100/10/2", 5.0),
        ("12.5+3/4-2**3", 5.25),
        ("(12.5 + 3) / 4 - 2**3", -4.125),
        ("5%3*2", 4.0),
        ("10%4%3", 2.0),
        ("2*3%4", 2.0),
        ("2**2**3", 256.0),
        ("-3*-3", 9.0),
        ("+5--5", 10.0),
        ("0.1+0.2", 0.30000000000000004),
        (".5*4.", 2.0),
        ("((((1))))", 1.0),
        ("(1+2)*(3+4)/(5+2)", 3.0),
    ];

    for (expr, attendu) in table {
        assert_vaut(expr, *attendu);
    }
}

#[test]
fn prop_conventions_documentees() {
    // '**' lie plus fort que le signe unaire à sa gauche
    assert_vaut("-2**2", -4.0);
    assert_vaut("-2**2+1", -3.0);
    // …mais le signe d'une base parenthésée reste dans la base
    assert_vaut("(-2)**2", 4.0);
    // associativité à droite
    assert_vaut("2**3**2", 512.0);
    // exposant signé
    assert_vaut("2**-3", 0.125);
    assert_vaut("4**-0.5", 0.5);
    // modulo tronqué, signe de l'opérande gauche
    assert_vaut("-7%3", -1.0);
    assert_vaut("7%-3", 1.0);
}

/* ------------------------ Alphabet fermé ------------------------ */

#[test]
fn prop_tout_caractere_etranger_rejete() {
    // lettres, accès, appels, chaînes, underscores… : échec au lexique,
    // jamais une évaluation partielle
    let hostiles = [
        "import 1",
        "__class__",
        "open(1)",
        "2 + a",
        "x",
        "1e5",
        "0x10",
        "[1, 2]",
        "'1'+'2'",
        "\"1\"",
        "1;2",
        "{1}",
        "1_000_000",
        "2^3",
        "1,5",
        "π",
        "√4",
    ];

    for s in hostiles {
        match eval_err(s) {
            ErreurCalc::Parse(ErreurParse::CaractereInterdit { .. }) => {}
            autre => panic!("expr={s:?} : attendu CaractereInterdit, obtenu {autre:?}"),
        }
    }
}

/* ------------------------ Taxonomie d'erreurs ------------------------ */

#[test]
fn prop_chaque_erreur_a_un_declencheur() {
    use ErreurParse::*;

    assert_eq!(eval_err(""), ErreurCalc::Parse(EntreeVide));
    assert_eq!(eval_err(" \t "), ErreurCalc::Parse(EntreeVide));

    assert!(matches!(
        eval_err("1.2.3"),
        ErreurCalc::Parse(NombreInvalide { .. })
    ));
    assert!(matches!(
        eval_err("3 +"),
        ErreurCalc::Parse(JetonInattendu { .. })
    ));
    assert_eq!(eval_err("(1"), ErreurCalc::Parse(ParenthesesNonFermees));
    assert_eq!(eval_err("1)"), ErreurCalc::Parse(ParenthesesNonFermees));

    assert_eq!(
        eval_err("1/0"),
        ErreurCalc::Eval(ErreurEval::DivisionParZero)
    );
    assert!(matches!(
        eval_err("(-2)**0.5"),
        ErreurCalc::Eval(ErreurEval::OperationInvalide { .. })
    ));
    assert_eq!(
        eval_err("10**400"),
        ErreurCalc::Eval(ErreurEval::Depassement)
    );
}

/* ------------------------ Bornes (profondeur, longueur) ------------------------ */

#[test]
fn prop_profondeur_plafonnee() {
    // Juste des parenthèses, au-delà du plafond : TropProfond, pas de crash.
    let n = PROFONDEUR_MAX + 10;
    let s = format!("{}7{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_err(&s), ErreurCalc::Parse(ErreurParse::TropProfond));

    // Une imbrication raisonnable passe (et s'évalue).
    let n = 40;
    let s = format!("{}7{}", "(".repeat(n), ")".repeat(n));
    assert_vaut(&s, 7.0);
}

#[test]
fn prop_longueur_plafonnee() {
    let s = format!("1{}", "+1".repeat(LONGUEUR_MAX));
    assert!(matches!(
        eval_err(&s),
        ErreurCalc::Parse(ErreurParse::TropLongue { .. })
    ));
}

#[test]
fn prop_chaine_plate_longue_ok() {
    // Une somme plate sous le plafond de longueur s'évalue sans récursion
    // profonde côté parseur (boucle) ni pile excessive côté évaluateur.
    let n = 400;
    let s = format!("1{}", "+1".repeat(n));
    assert_vaut(&s, (n + 1) as f64);
}

/* ------------------------ Idempotence / pureté ------------------------ */

#[test]
fn prop_idempotence() {
    let exprs = ["2+2*3", "1/3", "-2**2", "10%3", "(1+2)*(3-4)"];
    for expr in exprs {
        let a = eval_expression(expr);
        let b = eval_expression(expr);
        let c = eval_expression(expr);
        assert_eq!(a, b, "expr={expr:?}");
        assert_eq!(b, c, "expr={expr:?}");
    }
}

/* ------------------------ Intégration affichage ------------------------ */

#[test]
fn prop_affichage_resultats() {
    let cas: &[(&str, &str)] = &[
        ("3 + 4 * 2", "11"),
        ("2 ** 10", "1024"),
        ("(2 + 3) * (4 - 1)", "15"),
        ("1/3", "0.3333333333"),
        ("0.1+0.2", "0.3"),
        ("10**300", "1e300"),
    ];

    for (expr, attendu) in cas {
        let r = eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert_eq!(
            format_valeur(r.valeur, CHIFFRES_DEFAUT),
            *attendu,
            "expr={expr:?}"
        );
    }
}
