// src/noyau/analyse.rs
//
// Descente récursive -> Expr
//
// Grammaire (précédence croissante) :
//   expression := terme (('+' | '-') terme)*
//   terme      := facteur (('*' | '/' | '%') facteur)*
//   facteur    := ('+' | '-') facteur | puissance
//   puissance  := primaire ('**' facteur)?        # associative à droite
//   primaire   := NOMBRE | '(' expression ')'
//
// Conventions (testées explicitement) :
// - '**' lie plus fort que le signe unaire à sa gauche : -2**2 = -(2**2) = -4
// - '**' associe à droite : 2**3**2 = 2**(3**2) = 512
// - l'exposant peut porter son propre signe : 2**-3 = 1/8
//
// Garde-fous :
// - longueur d'entrée plafonnée (LONGUEUR_MAX)
// - profondeur de récursion plafonnée (PROFONDEUR_MAX) => TropProfond,
//   jamais d'épuisement de pile sur une entrée pathologique

use super::erreurs::ErreurParse;
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::{tokenize, Jeton, Tok};

/// Plafond d'imbrication (parenthèses + chaînes de signes).
pub const PROFONDEUR_MAX: usize = 200;

/// Plafond de longueur d'entrée (en caractères, après trim).
pub const LONGUEUR_MAX: usize = 1000;

/// Analyse une expression complète : texte -> Expr.
pub fn analyse(texte: &str) -> Result<Expr, ErreurParse> {
    let jetons = prepare(texte)?;
    analyse_jetons(&jetons)
}

/// Étape 1 : trim + bornes + tokenisation.
/// Séparée pour que le pipeline "démarche" puisse afficher les jetons.
pub(crate) fn prepare(texte: &str) -> Result<Vec<Jeton>, ErreurParse> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurParse::EntreeVide);
    }

    let longueur = s.chars().count();
    if longueur > LONGUEUR_MAX {
        return Err(ErreurParse::TropLongue { longueur });
    }

    tokenize(s)
}

/// Étape 2 : jetons -> Expr (+ contrôle des restes).
pub(crate) fn analyse_jetons(jetons: &[Jeton]) -> Result<Expr, ErreurParse> {
    let mut lecteur = Lecteur::new(jetons);
    let expr = lecteur.expression()?;

    // Tout doit avoir été consommé.
    match lecteur.courant().tok {
        Tok::Fin => Ok(expr),
        // ')' en trop : "1+2)"
        Tok::RPar => Err(ErreurParse::ParenthesesNonFermees),
        // reste non grammatical : "3 3"
        _ => Err(ErreurParse::JetonInattendu {
            position: lecteur.courant().pos,
        }),
    }
}

struct Lecteur<'a> {
    jetons: &'a [Jeton],
    pos: usize,
    profondeur: usize,
}

impl<'a> Lecteur<'a> {
    fn new(jetons: &'a [Jeton]) -> Self {
        debug_assert!(matches!(jetons.last().map(|j| &j.tok), Some(Tok::Fin)));
        Self {
            jetons,
            pos: 0,
            profondeur: 0,
        }
    }

    /// Jeton courant. Tok::Fin est toujours dernier : jamais hors bornes.
    fn courant(&self) -> &Jeton {
        &self.jetons[self.pos]
    }

    fn avance(&mut self) {
        if self.pos + 1 < self.jetons.len() {
            self.pos += 1;
        }
    }

    fn entre(&mut self) -> Result<(), ErreurParse> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurParse::TropProfond);
        }
        Ok(())
    }

    fn sort(&mut self) {
        self.profondeur -= 1;
    }

    fn expression(&mut self) -> Result<Expr, ErreurParse> {
        self.entre()?;

        let mut expr = self.terme()?;
        loop {
            let op = match self.courant().tok {
                Tok::Plus => OpBinaire::Add,
                Tok::Minus => OpBinaire::Sub,
                _ => break,
            };
            self.avance();
            let droite = self.terme()?;
            expr = Expr::Binaire(op, Box::new(expr), Box::new(droite));
        }

        self.sort();
        Ok(expr)
    }

    fn terme(&mut self) -> Result<Expr, ErreurParse> {
        let mut expr = self.facteur()?;
        loop {
            let op = match self.courant().tok {
                Tok::Star => OpBinaire::Mul,
                Tok::Slash => OpBinaire::Div,
                Tok::Percent => OpBinaire::Mod,
                _ => break,
            };
            self.avance();
            let droite = self.facteur()?;
            expr = Expr::Binaire(op, Box::new(expr), Box::new(droite));
        }
        Ok(expr)
    }

    /// Signe unaire, chaînable ("--5" vaut 5). Le signe porte sur la
    /// puissance entière : facteur('-') englobe primaire('**'...).
    /// La profondeur n'est comptée que si un signe est consommé : un niveau
    /// d'imbrication = un incrément, que ce soit une parenthèse ou un signe.
    fn facteur(&mut self) -> Result<Expr, ErreurParse> {
        let op = match self.courant().tok {
            Tok::Plus => Some(OpUnaire::Pos),
            Tok::Minus => Some(OpUnaire::Neg),
            _ => None,
        };

        match op {
            Some(op) => {
                self.entre()?;
                self.avance();
                let x = self.facteur()?;
                self.sort();
                Ok(Expr::Unaire(op, Box::new(x)))
            }
            None => self.puissance(),
        }
    }

    /// '**' associe à droite : l'exposant est un facteur complet,
    /// qui retombe sur puissance => 2**3**2 = 2**(3**2).
    fn puissance(&mut self) -> Result<Expr, ErreurParse> {
        let base = self.primaire()?;

        if matches!(self.courant().tok, Tok::StarStar) {
            self.avance();
            let exposant = self.facteur()?;
            return Ok(Expr::Binaire(
                OpBinaire::Pow,
                Box::new(base),
                Box::new(exposant),
            ));
        }

        Ok(base)
    }

    fn primaire(&mut self) -> Result<Expr, ErreurParse> {
        match &self.courant().tok {
            Tok::Num { valeur, .. } => {
                let v = *valeur;
                self.avance();
                Ok(Expr::Nombre(v))
            }

            Tok::LPar => {
                self.avance();
                let expr = self.expression()?;
                match self.courant().tok {
                    Tok::RPar => {
                        self.avance();
                        Ok(expr)
                    }
                    // "(1+2" : la parenthèse n'est jamais fermée
                    Tok::Fin => Err(ErreurParse::ParenthesesNonFermees),
                    // "(1 2)" : jeton valide, place invalide
                    _ => Err(ErreurParse::JetonInattendu {
                        position: self.courant().pos,
                    }),
                }
            }

            // "3 + )", "()", "* 2"… : il fallait un nombre ou '('
            _ => Err(ErreurParse::JetonInattendu {
                position: self.courant().pos,
            }),
        }
    }
}
