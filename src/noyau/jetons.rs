// src/noyau/jetons.rs

use super::erreurs::ErreurParse;

/// Nature d'un jeton.
///
/// L'alphabet est FERMÉ : nombre, six opérateurs, parenthèses, fin.
/// Tout caractère qui pourrait désigner un nom, un appel ou un accès
/// (lettres, crochets, guillemets…) est rejeté dès la tokenisation.
#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Littéral numérique : texte d'origine + valeur f64 déjà parsée.
    Num { texte: String, valeur: f64 },

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar, // **

    LPar,
    RPar,

    /// Marqueur de fin d'entrée (toujours dernier, position = longueur).
    Fin,
}

/// Jeton + position (index de caractère dans l'entrée, pour les erreurs).
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

impl Jeton {
    fn new(tok: Tok, pos: usize) -> Self {
        Self { tok, pos }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12) et décimaux (ex: 12.5, .5, 5.)
/// - opérateurs + - * / % ** (le signe est un opérateur, jamais dans le nombre)
/// - parenthèses ( )
///
/// Première barrière de sûreté : tout caractère hors de
/// `[0-9 . + - * / % ( ) espaces]` => CaractereInterdit.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurParse> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Jeton::new(Tok::LPar, i));
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::new(Tok::RPar, i));
            i += 1;
            continue;
        }

        // Opérateurs ('*' suivi de '*' => puissance)
        match c {
            '+' => {
                out.push(Jeton::new(Tok::Plus, i));
                i += 1;
                continue;
            }
            '-' => {
                out.push(Jeton::new(Tok::Minus, i));
                i += 1;
                continue;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Jeton::new(Tok::StarStar, i));
                    i += 2;
                } else {
                    out.push(Jeton::new(Tok::Star, i));
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Jeton::new(Tok::Slash, i));
                i += 1;
                continue;
            }
            '%' => {
                out.push(Jeton::new(Tok::Percent, i));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Nombre : suite de chiffres et de points, validée ensuite.
        // Pas de signe ici (le signe est un opérateur unaire), pas de
        // notation scientifique ('e' n'est pas dans l'alphabet).
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();

            let points = texte.chars().filter(|&p| p == '.').count();
            let chiffres = texte.chars().filter(char::is_ascii_digit).count();
            if points > 1 || chiffres == 0 {
                return Err(ErreurParse::NombreInvalide { texte });
            }

            let valeur: f64 = texte.parse().map_err(|_| ErreurParse::NombreInvalide {
                texte: texte.clone(),
            })?;

            out.push(Jeton::new(Tok::Num { texte, valeur }, start));
            continue;
        }

        return Err(ErreurParse::CaractereInterdit {
            caractere: c,
            position: i,
        });
    }

    out.push(Jeton::new(Tok::Fin, chars.len()));
    Ok(out)
}

/// Format utilitaire (debug/"démarche") : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match &j.tok {
            Tok::Num { texte, .. } => texte.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::StarStar => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            Tok::Fin => continue,
        };
        out.push(s);
    }
    out.join(" ")
}
