// src/noyau/erreurs.rs
//
// Erreurs typées du noyau.
// - ErreurParse : tout ce qui peut échouer avant d'avoir un arbre
// - ErreurEval  : tout ce qui peut échouer en évaluant un arbre
// - ErreurCalc  : l'union des deux (surface publique du pipeline)
//
// Contrat : une erreur est une VALEUR retournée à l'appelant, jamais un
// panic. Le message Display est celui que l'UI affiche tel quel.

use std::fmt;

use super::analyse::{LONGUEUR_MAX, PROFONDEUR_MAX};

/// Échec de la phase lexicale ou syntaxique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurParse {
    /// Entrée vide (ou uniquement des espaces).
    EntreeVide,
    /// Entrée plus longue que LONGUEUR_MAX caractères.
    TropLongue { longueur: usize },
    /// Caractère hors de l'alphabet `[0-9 . + - * / % ( ) espaces]`.
    /// Première barrière : lettres, crochets, guillemets… ne deviennent
    /// jamais des jetons.
    CaractereInterdit { caractere: char, position: usize },
    /// Littéral numérique mal formé (ex: "1.2.3", ".").
    NombreInvalide { texte: String },
    /// Jeton valide mais au mauvais endroit (ex: "3 +", "()", "3 3").
    JetonInattendu { position: usize },
    /// '(' sans ')' correspondante, ou ')' en trop.
    ParenthesesNonFermees,
    /// Imbrication au-delà de PROFONDEUR_MAX niveaux.
    TropProfond,
}

impl fmt::Display for ErreurParse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntreeVide => write!(f, "Entrée vide"),
            Self::TropLongue { longueur } => {
                write!(
                    f,
                    "expression trop longue ({longueur} caractères, max {LONGUEUR_MAX})"
                )
            }
            Self::CaractereInterdit {
                caractere,
                position,
            } => {
                write!(f, "caractère inattendu: '{caractere}' (position {position})")
            }
            Self::NombreInvalide { texte } => write!(f, "nombre invalide: \"{texte}\""),
            Self::JetonInattendu { position } => {
                write!(f, "expression invalide (position {position})")
            }
            Self::ParenthesesNonFermees => write!(f, "parenthèses non fermées"),
            Self::TropProfond => {
                write!(f, "expression trop profonde (max {PROFONDEUR_MAX} niveaux)")
            }
        }
    }
}

/// Échec de l'évaluation d'un arbre valide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurEval {
    /// Division ou modulo par zéro (0^-n inclus).
    DivisionParZero,
    /// Opération hors du domaine réel (ex: base négative, exposant non entier).
    OperationInvalide { raison: String },
    /// Résultat intermédiaire ou final non fini (inf / NaN).
    Depassement,
}

impl fmt::Display for ErreurEval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionParZero => write!(f, "division par zéro"),
            Self::OperationInvalide { raison } => write!(f, "opération invalide: {raison}"),
            Self::Depassement => write!(f, "dépassement de capacité (résultat non fini)"),
        }
    }
}

/// Erreur du pipeline complet (parse puis éval).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalc {
    Parse(ErreurParse),
    Eval(ErreurEval),
}

impl fmt::Display for ErreurCalc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => e.fmt(f),
            Self::Eval(e) => e.fmt(f),
        }
    }
}

impl From<ErreurParse> for ErreurCalc {
    fn from(e: ErreurParse) -> Self {
        Self::Parse(e)
    }
}

impl From<ErreurEval> for ErreurCalc {
    fn from(e: ErreurEval) -> Self {
        Self::Eval(e)
    }
}
