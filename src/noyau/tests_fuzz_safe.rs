//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, dépassement…)
//! - invariants clés :
//!     Ok  => valeur finie, flag entier cohérent
//!     caractère étranger injecté => échec au lexique, jamais une évaluation

use std::time::{Duration, Instant};

use super::erreurs::{ErreurCalc, ErreurEval, ErreurParse};
use super::eval::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Liste blanche : erreurs *normales* pour un fuzz sur ce domaine
/// (le générateur produit une grammaire valide, mais des valeurs libres).
fn est_erreur_attendue(e: &ErreurCalc) -> bool {
    matches!(
        e,
        ErreurCalc::Eval(ErreurEval::DivisionParZero)
            | ErreurCalc::Eval(ErreurEval::Depassement)
            | ErreurCalc::Eval(ErreurEval::OperationInvalide { .. })
    )
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(10) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "3".to_string(),
        4 => "5".to_string(),
        5 => "7".to_string(),
        6 => "10".to_string(),
        7 => "0.5".to_string(),
        8 => "2.5".to_string(),
        // toujours chiffre d'abord : une injection hostile au milieu doit
        // échouer sur le caractère, pas sur un nombre orphelin "."
        _ => "0.25".to_string(),
    }
}

/// Petit exposant : la puissance est le chemin le plus court vers inf,
/// on la nourrit modérément (le dépassement reste testé, pas omniprésent).
fn gen_exposant(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "3".to_string(),
        _ => "0.5".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(10) {
        0 => gen_nombre(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("({}**{})", gen_expr(rng, depth - 1), gen_exposant(rng)),
        7 => format!("(-{})", gen_expr(rng, depth - 1)),
        8 => format!("(+{})", gen_expr(rng, depth - 1)),
        _ => {
            // sans parenthèses : exerce la précédence du parseur
            format!("{}+{}*{}", gen_nombre(rng), gen_nombre(rng), gen_nombre(rng))
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_et_erreurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);

        match eval_expression(&expr) {
            Ok(r) => {
                assert!(r.valeur.is_finite(), "non-fini sorti: expr={expr:?}");
                assert_eq!(
                    r.est_entier,
                    r.valeur.fract() == 0.0,
                    "flag entier incohérent: expr={expr:?}"
                );
                seen_ok += 1;
            }
            Err(e) => {
                // Le générateur produit une grammaire valide : seules les
                // erreurs d'évaluation sont admissibles.
                assert!(
                    est_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne "balaye" rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop \"sage\"");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes expressions => mêmes sorties.
    let campagne = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        (0..60)
            .map(|_| {
                let expr = gen_expr(&mut rng, 4);
                format!("{expr} => {:?}", eval_expression(&expr))
            })
            .collect()
    };

    let a = campagne(0xBADC0DE_u64);
    budget(t0, max);
    let b = campagne(0xBADC0DE_u64);

    assert_eq!(a, b, "deux campagnes identiques doivent coïncider");
}

#[test]
fn fuzz_safe_caractere_etranger_injecte() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let hostiles = ['a', 'x', 'e', '_', '#', '!', '[', '"', ';', '^'];

    let mut rng = Rng::new(0xDEAD_BEEF_u64);

    for _ in 0..120 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let c = hostiles[rng.pick(hostiles.len() as u32) as usize];

        // injection à une frontière de caractère aléatoire
        let indices: Vec<usize> = expr
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(expr.len()))
            .collect();
        let at = indices[rng.pick(indices.len() as u32) as usize];

        let mut infectee = expr.clone();
        infectee.insert(at, c);

        match eval_expression(&infectee) {
            Err(ErreurCalc::Parse(ErreurParse::CaractereInterdit { caractere, .. })) => {
                assert_eq!(caractere, c, "expr={infectee:?}");
            }
            autre => panic!(
                "caractère {c:?} injecté dans {expr:?} : attendu CaractereInterdit, obtenu {autre:?}"
            ),
        }
    }
}

#[test]
fn fuzz_safe_imbrication_profonde_sans_debordement() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Bien au-delà du plafond : l'erreur doit être TropProfond (pas un crash),
    // et la réponse doit venir vite (le garde coupe la descente).
    for n in [250usize, 400, 490] {
        let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(
            eval_expression(&s),
            Err(ErreurCalc::Parse(ErreurParse::TropProfond)),
            "n={n}"
        );
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1", 200);
    budget(t0, max);

    let r = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(r.valeur, 200.0);
    assert!(r.est_entier);
}
