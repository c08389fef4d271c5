//! Noyau d'évaluation sûre
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation (alphabet fermé)
//! - expr.rs     : AST fermé (nombre / unaire / binaire)
//! - analyse.rs  : descente récursive, profondeur bornée
//! - eval.rs     : évaluateur restreint + pipeline complet
//! - format.rs   : affichage (chiffres significatifs, flag entier)
//! - erreurs.rs  : erreurs typées (parse / éval)

pub mod analyse;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{ErreurCalc, ErreurEval, ErreurParse};
pub use eval::{eval_binaire, eval_detaille, eval_expression, DemarcheNoyau, Evaluation};
pub use expr::OpBinaire;
