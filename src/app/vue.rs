// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Deux modes : Basique (deux nombres) / Avancée (expression libre)
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
//
// Note :
// - PAS de Key::NumEnter (n'existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + "Enter" virtuel mobile selon navigateur)

use eframe::egui;

use crate::noyau::format::{format_valeur, CHIFFRES_MAX};
use crate::noyau::{eval_binaire, eval_detaille, OpBinaire};

use super::etat::{AppCalc, Demarche, Mode};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité "calc"
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice Moderne");
                ui.add_space(6.0);

                self.ui_mode(ui);
                ui.add_space(6.0);

                match self.mode {
                    Mode::Basique => self.ui_basique(ui),
                    Mode::Avancee => self.ui_entree(ui),
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);

                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Mode :");
            ui.radio_value(&mut self.mode, Mode::Basique, "Basique (deux nombres)");
            ui.radio_value(&mut self.mode, Mode::Avancee, "Avancée (expression)");
        });
    }

    /* ------------------------ Mode basique ------------------------ */

    fn ui_basique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Premier nombre :");
            ui.add(egui::DragValue::new(&mut self.operande_a).speed(0.1));

            ui.separator();

            ui.label("Second nombre :");
            ui.add(egui::DragValue::new(&mut self.operande_b).speed(0.1));
        });

        ui.horizontal(|ui| {
            ui.label("Opération :");
            egui::ComboBox::from_id_salt("op_basique")
                .selected_text(self.op_basique.symbole())
                .show_ui(ui, |ui| {
                    for op in OpBinaire::TOUS {
                        ui.selectable_value(&mut self.op_basique, op, op.symbole());
                    }
                });

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("Calculer"));
            if eq.clicked() {
                self.eval_basique_via_noyau();
            }
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    /* ------------------------ Mode avancé ------------------------ */

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (12.5 + 3) / 4 - 2**3")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / opérateurs / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        // On évite les déclenchements "globaux" quand l'utilisateur clique ailleurs.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        // Actions + précision
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l'entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Précision :");
            let mut c = self.chiffres as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut c)
                    .speed(1)
                    .range(1..=CHIFFRES_MAX as u32)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_chiffres(c as usize);
            }
        });

        ui.add_space(8.0);

        // Touches rapides + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "%", "%", InsertKind::Op);
            self.bouton_insert(ui, "**", "**", InsertKind::Op);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace "intelligent" : retire d'un coup les motifs utiles ("**").
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire tokens connus
        if self.entree.ends_with("**") {
            self.entree.pop();
            self.entree.pop();
            while self.entree.ends_with(' ') {
                self.entree.pop();
            }
            return;
        }

        // Sinon : un caractère
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /* ------------------------ Résultat / démarche / historique ------------------------ */

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        if self.resultat_dispo {
            Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);
        } else {
            ui.monospace("indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique (récent d'abord)")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.label("Aucun calcul pour l'instant.");
                } else {
                    for (i, item) in self.historique.iter().enumerate() {
                        ui.monospace(format!("{}. {} = {}", i + 1, item.expr, item.resultat));
                    }
                }

                ui.add_space(4.0);
                if ui.button("Vider l'historique").clicked() {
                    self.vide_historique();
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule "stable", sans TextEdit interactif.
        // On garde un cadre visuel via Frame + Label monospace.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    /* ------------------------ Boutons ------------------------ */

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen => {
                if !self.entree.is_empty() {
                    let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                    if let Some(c) = last {
                        if c.is_ascii_digit() || c == ')' || c == '.' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d'espaces auto
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /* ------------------------ Évaluation (via noyau) ------------------------ */

    /// Évalue l'expression via le noyau, puis dépose résultat + démarche
    /// dans l'état UI (et une ligne d'historique).
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            self.focus_entree = true;
            return;
        }

        match eval_detaille(&s) {
            Ok((evaluation, d_noyau)) => {
                let affichage = format_valeur(evaluation.valeur, self.chiffres);
                let d_ui = Demarche {
                    jetons: d_noyau.jetons,
                    arbre: d_noyau.arbre,
                    note: d_noyau.note,
                };
                self.ajoute_historique(s, affichage.clone());
                self.set_resultat(affichage, d_ui);
                self.focus_entree = true;
            }
            Err(e) => {
                self.set_erreur(e.to_string());
                self.focus_entree = true;
            }
        }
    }

    /// Mode basique : construit le noeud binaire directement (pas de parseur).
    fn eval_basique_via_noyau(&mut self) {
        let (a, b, op) = (self.operande_a, self.operande_b, self.op_basique);

        match eval_binaire(a, op, b) {
            Ok(evaluation) => {
                let affichage = format_valeur(evaluation.valeur, self.chiffres);
                let expr = format!("({a}) {} ({b})", op.symbole());
                self.ajoute_historique(expr, affichage.clone());
                self.set_resultat(affichage, Demarche::default());
            }
            Err(e) => {
                self.set_erreur(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Op,
    OpenParen,
    CloseParen,
}
