//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> descente récursive -> Expr -> eval_expr -> Evaluation
//!
//! Remarque : l'évaluateur ne voit QUE l'union fermée Expr. Le match est
//! exhaustif, sans branche par défaut : un opérateur ajouté demain ne
//! compile pas tant que son cas n'est pas écrit ici.

use super::analyse::{analyse, analyse_jetons, prepare};
use super::erreurs::{ErreurCalc, ErreurEval};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::format::est_entier;
use super::jetons::format_jetons;

/// Résultat d'une évaluation réussie.
/// `est_entier` note si la valeur est mathématiquement entière (affichage).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: f64,
    pub est_entier: bool,
}

impl Evaluation {
    fn depuis(valeur: f64) -> Self {
        Self {
            valeur,
            est_entier: est_entier(valeur),
        }
    }
}

/// Démarche (panneau d'explication de l'UI) : étapes intermédiaires en texte.
#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
    pub note: String,
}

/// API publique : évalue une expression texte.
/// Sans état, sans effet de bord : deux appels identiques donnent le même
/// résultat.
pub fn eval_expression(texte: &str) -> Result<Evaluation, ErreurCalc> {
    let expr = analyse(texte)?;
    let valeur = eval_expr(&expr)?;
    Ok(Evaluation::depuis(valeur))
}

/// Mode basique (deux opérandes + opérateur) : construit directement le
/// noeud binaire, sans passer par le parseur.
pub fn eval_binaire(
    gauche: f64,
    op: OpBinaire,
    droite: f64,
) -> Result<Evaluation, ErreurCalc> {
    let expr = Expr::Binaire(
        op,
        Box::new(Expr::Nombre(gauche)),
        Box::new(Expr::Nombre(droite)),
    );
    let valeur = eval_expr(&expr)?;
    Ok(Evaluation::depuis(valeur))
}

/// Variante détaillée : même résultat + démarche (jetons, arbre) pour l'UI.
pub fn eval_detaille(texte: &str) -> Result<(Evaluation, DemarcheNoyau), ErreurCalc> {
    // 1) Jetons
    let jetons = prepare(texte)?;
    let jetons_txt = format_jetons(&jetons);

    // 2) AST (Expr)
    let expr = analyse_jetons(&jetons)?;

    // 3) Valeur
    let valeur = eval_expr(&expr)?;

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        arbre: expr.to_string(),
        note: "Pipeline: jetons → descente récursive → Expr → évaluation.".into(),
    };

    Ok((Evaluation::depuis(valeur), d))
}

/// Évalue un arbre. Récursif; la profondeur est bornée par construction
/// (plafonds du parseur) et par le noeud unique du mode basique.
pub fn eval_expr(expr: &Expr) -> Result<f64, ErreurEval> {
    match expr {
        // Un littéral démesuré ("9999…9") parse en inf : bloqué ici,
        // pas de non-fini en sortie.
        Expr::Nombre(v) => fini(*v),

        Expr::Unaire(OpUnaire::Neg, x) => fini(-eval_expr(x)?),
        Expr::Unaire(OpUnaire::Pos, x) => eval_expr(x),

        Expr::Binaire(op, a, b) => {
            let ga = eval_expr(a)?;
            let gd = eval_expr(b)?;

            match op {
                OpBinaire::Add => fini(ga + gd),
                OpBinaire::Sub => fini(ga - gd),
                OpBinaire::Mul => fini(ga * gd),

                OpBinaire::Div => {
                    if gd == 0.0 {
                        return Err(ErreurEval::DivisionParZero);
                    }
                    fini(ga / gd)
                }

                // Reste tronqué, signe de l'opérande gauche : -7 % 3 = -1.
                OpBinaire::Mod => {
                    if gd == 0.0 {
                        return Err(ErreurEval::DivisionParZero);
                    }
                    fini(ga % gd)
                }

                OpBinaire::Pow => puissance(ga, gd),
            }
        }
    }
}

/// Garde finitude : inf / NaN ne sort jamais de l'évaluateur.
fn fini(v: f64) -> Result<f64, ErreurEval> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::Depassement)
    }
}

/// a ** b, frontières explicites :
/// - 0 ** négatif        => division par zéro
/// - négatif ** non-entier => opération invalide (résultat complexe),
///   jamais un NaN silencieux
/// - 0 ** 0 = 1 (convention IEEE)
fn puissance(base: f64, exposant: f64) -> Result<f64, ErreurEval> {
    if base == 0.0 && exposant < 0.0 {
        return Err(ErreurEval::DivisionParZero);
    }

    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(ErreurEval::OperationInvalide {
            raison: format!("base négative ({base}) avec exposant non entier ({exposant})"),
        });
    }

    fini(base.powf(exposant))
}
