//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l'état de la calculatrice (mode, entrée, résultat, erreur,
//! chiffres, démarche, historique) et offrir des opérations simples (C/CLR/AC)
//! sans logique d'affichage.
//!
//! Contrats (version UI) :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur la précision et sur l'historique.

use crate::noyau::format::{CHIFFRES_DEFAUT, CHIFFRES_MAX};
use crate::noyau::OpBinaire;

/// Garde-fou : l'historique ne grandit jamais au-delà de 50 entrées.
const HISTORIQUE_MAX: usize = 50;

/// Mode de saisie : deux nombres + opérateur, ou expression libre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Basique,
    Avancee,
}

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub note: String,
}

/// Une ligne d'historique : expression soumise + résultat affiché.
#[derive(Clone, Debug)]
pub struct EntreeHistorique {
    pub expr: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- mode ---
    pub mode: Mode,

    // --- entrée utilisateur (mode avancé) ---
    pub entree: String,

    // --- mode basique (deux opérandes + opérateur) ---
    pub operande_a: f64,
    pub operande_b: f64,
    pub op_basique: OpBinaire,

    // --- sorties ---
    pub resultat: String,      // résultat formaté (chiffres significatifs)
    pub erreur: String,        // message d'erreur (si parsing/éval échoue)
    pub resultat_dispo: bool,  // false si rien à afficher (démarrage, erreur)

    // --- démarche (panneau d'explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub chiffres: usize, // précision d'affichage (chiffres significatifs)

    // --- historique (borné, plus récent d'abord) ---
    pub historique: Vec<EntreeHistorique>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l'entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            mode: Mode::Avancee, // expression libre d'abord
            entree: String::new(),
            operande_a: 0.0,
            operande_b: 0.0,
            op_basique: OpBinaire::Add,
            resultat: String::new(),
            erreur: String::new(),
            resultat_dispo: false, // au démarrage : rien à lire
            demarche: Demarche::default(),
            chiffres: CHIFFRES_DEFAUT,
            historique: Vec::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions "boutons" (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + précision par défaut).
    /// L'historique survit (il a son propre bouton).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.operande_a = 0.0;
        self.operande_b = 0.0;
        self.op_basique = OpBinaire::Add;
        self.clear_resultats();
        self.chiffres = CHIFFRES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l'entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l'entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas "effacer
    ///   l'écran" sur une faute.
    /// - On coupe la démarche (non fiable si l'évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.resultat_dispo = false;
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (affichage + démarche).
    pub fn set_resultat(&mut self, affichage: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = affichage.into();
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : limite la précision (évite abus / affichages absurdes).
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
        self.focus_entree = true;
    }

    /* ------------------------ Historique ------------------------ */

    /// Insère en tête, tronque à HISTORIQUE_MAX (plus récent d'abord).
    pub fn ajoute_historique(&mut self, expr: impl Into<String>, resultat: impl Into<String>) {
        self.historique.insert(
            0,
            EntreeHistorique {
                expr: expr.into(),
                resultat: resultat.into(),
            },
        );
        self.historique.truncate(HISTORIQUE_MAX);
    }

    pub fn vide_historique(&mut self) {
        self.historique.clear();
        self.focus_entree = true;
    }
}
