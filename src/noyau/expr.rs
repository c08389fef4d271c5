// src/noyau/expr.rs
//
// AST fermé de l'évaluateur sûr.
//
// IMPORTANT (SAFE):
// - L'union est FERMÉE : exactement trois variantes (nombre, unaire, binaire).
//   Un appel de fonction, un nom, un accès d'attribut ne sont pas
//   représentables — ils ne peuvent donc pas être évalués.
// - L'évaluateur fait un match exhaustif dessus, sans branche par défaut.
// - Chaque noeud possède ses enfants (Box) : arbre strict, pas de cycles.

use std::fmt;

/// Opérateur unaire (signe).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Pos,
}

/// Opérateur binaire. Liste blanche complète : rien d'autre n'existe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl OpBinaire {
    /// Symbole source de l'opérateur (celui que le lexeur reconnaît).
    pub fn symbole(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }

    /// Tous les opérateurs, dans l'ordre des boutons de l'UI.
    pub const TOUS: [OpBinaire; 6] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
}

/* ------------------------ Affichage debug (pas "joli" final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(v) => write!(f, "{v}"),
            Expr::Unaire(OpUnaire::Neg, x) => write!(f, "(-{x})"),
            Expr::Unaire(OpUnaire::Pos, x) => write!(f, "(+{x})"),
            Expr::Binaire(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
        }
    }
}
