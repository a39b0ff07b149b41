use std::collections::{HashMap, HashSet};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use family_core::{
    branch_groups, AvatarOutcome, Branch, FamilyDirectory, MemberId, SubmitOutcome, WorkflowState,
};
use serde::{Deserialize, Serialize};

use crate::backend_bridge::commands::WorkerCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_worker_command;

pub const SETTINGS_STORAGE_KEY: &str = "family_directory_ui_settings";

const MIN_TEXT_SCALE: f32 = 0.8;
const MAX_TEXT_SCALE: f32 = 1.4;

const CARD_WIDTH: f32 = 112.0;
const AVATAR_DISPLAY_SIZE: f32 = 56.0;

/// UI preferences persisted via eframe storage. Member data is never
/// persisted; the directory always restarts from the seed family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedUiSettings {
    pub text_scale: f32,
    pub show_relations: bool,
}

impl Default for PersistedUiSettings {
    fn default() -> Self {
        Self {
            text_scale: 1.0,
            show_relations: true,
        }
    }
}

/// Owned per-frame render model for one member card. Snapshotting the
/// card data up-front keeps the borrow of the directory out of the
/// rendering closures, which need `&mut self` for removal and textures.
struct MemberCard {
    id: MemberId,
    name: String,
    relation: String,
    initials: String,
    root: bool,
    texture: Option<TextureHandle>,
}

pub struct FamilyApp {
    cmd_tx: Sender<WorkerCommand>,
    ui_rx: Receiver<UiEvent>,

    directory: FamilyDirectory,
    avatar_textures: HashMap<MemberId, TextureHandle>,

    status: String,
    settings: PersistedUiSettings,
    settings_open: bool,
}

impl FamilyApp {
    pub fn new(
        cmd_tx: Sender<WorkerCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedUiSettings>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            directory: FamilyDirectory::new(),
            avatar_textures: HashMap::new(),
            status: String::new(),
            settings: persisted.unwrap_or_default(),
            settings_open: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::AvatarDecoded { generation, image } => {
                    match self.directory.complete_avatar(generation, Ok(image)) {
                        AvatarOutcome::Added(_) => {
                            self.status = "Family member added".to_string();
                        }
                        AvatarOutcome::Stale => {
                            tracing::debug!(generation, "dropped stale avatar decode result");
                        }
                        AvatarOutcome::Failed => {}
                    }
                }
                UiEvent::AvatarDecodeFailed { generation, reason } => {
                    match self.directory.complete_avatar(generation, Err(reason)) {
                        AvatarOutcome::Failed => {
                            self.status = "Photo could not be loaded".to_string();
                        }
                        AvatarOutcome::Stale => {
                            tracing::debug!(generation, "dropped stale avatar decode failure");
                        }
                        AvatarOutcome::Added(_) => {}
                    }
                }
                UiEvent::WorkerFailed(message) => {
                    tracing::error!("photo worker failed: {message}");
                    self.status = message;
                }
            }
        }
    }

    /// Uploads textures for members whose decoded photo has no texture
    /// yet and drops textures for members that were removed.
    fn sync_avatar_textures(&mut self, ctx: &egui::Context) {
        let live_ids: HashSet<MemberId> =
            self.directory.members().iter().map(|member| member.id).collect();
        self.avatar_textures.retain(|id, _| live_ids.contains(id));

        for member in self.directory.members() {
            let Some(avatar) = &member.avatar else {
                continue;
            };
            if self.avatar_textures.contains_key(&member.id) {
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [avatar.width, avatar.height],
                &avatar.rgba,
            );
            let texture = ctx.load_texture(
                format!("avatar_{:?}", member.id),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            self.avatar_textures.insert(member.id, texture);
        }
    }

    fn collect_cards(&self) -> Vec<(Branch, Vec<MemberCard>)> {
        branch_groups(self.directory.members())
            .into_iter()
            .map(|group| {
                let cards = group
                    .members
                    .iter()
                    .map(|member| MemberCard {
                        id: member.id,
                        name: member.name.clone(),
                        relation: member.relation.clone(),
                        initials: initials(&member.name),
                        root: member.root,
                        texture: self.avatar_textures.get(&member.id).cloned(),
                    })
                    .collect();
                (group.branch, cards)
            })
            .collect()
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.heading("Welcome to My Family");
            ui.small("A growing tree of love, connections, and generations.");
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let controls_width = 220.0;
                ui.add_space(((ui.available_width() - controls_width) / 2.0).max(0.0));
                if ui.button("+ Add Family Member").clicked() {
                    self.directory.open_form();
                }
                if ui.button("Settings").clicked() {
                    self.settings_open = true;
                }
            });
            if !self.status.is_empty() {
                ui.small(self.status.clone());
            }
            ui.add_space(4.0);
        });
    }

    fn show_branch_columns(&mut self, ui: &mut egui::Ui) {
        let groups = self.collect_cards();
        let show_relations = self.settings.show_relations;
        let mut removal: Option<MemberId> = None;

        ui.columns(groups.len(), |columns| {
            for (column, (branch, cards)) in columns.iter_mut().zip(&groups) {
                column.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(branch.label()).strong().size(13.0));
                    ui.add_space(6.0);
                    for card in cards {
                        if show_member_card(ui, card, show_relations) {
                            removal = Some(card.id);
                        }
                        ui.add_space(6.0);
                    }
                });
            }
        });

        if let Some(id) = removal {
            if self.directory.remove_member(id) {
                self.status = "Family member removed".to_string();
            }
        }
    }

    fn show_add_member_modal(&mut self, ctx: &egui::Context) {
        if self.directory.workflow_state() == WorkflowState::Closed {
            return;
        }
        let submitting = self.directory.workflow_state() == WorkflowState::Submitting;

        egui::Window::new("Add a Family Member")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!submitting, |ui| {
                    let draft = self.directory.draft_mut();

                    ui.label("Name");
                    ui.text_edit_singleline(&mut draft.name);
                    ui.label("Relation");
                    ui.text_edit_singleline(&mut draft.relation);
                    ui.label("Branch");
                    egui::ComboBox::from_id_salt("branch_select")
                        .selected_text(draft.branch.label())
                        .show_ui(ui, |ui| {
                            for branch in Branch::ALL {
                                ui.selectable_value(&mut draft.branch, branch, branch.label());
                            }
                        });

                    ui.label("Photo (optional)");
                    ui.horizontal(|ui| {
                        if ui.button("Choose image...").clicked() {
                            let picked = rfd::FileDialog::new()
                                .add_filter(
                                    "Images",
                                    &["png", "jpg", "jpeg", "gif", "webp", "bmp"],
                                )
                                .pick_file();
                            if let Some(path) = picked {
                                draft.avatar_path = Some(path);
                            }
                        }
                        match &draft.avatar_path {
                            Some(path) => {
                                let file_name = path
                                    .file_name()
                                    .map(|name| name.to_string_lossy().into_owned())
                                    .unwrap_or_else(|| path.display().to_string());
                                ui.small(file_name);
                            }
                            None => {
                                ui.small("no file selected");
                            }
                        }
                        if draft.avatar_path.is_some() && ui.small_button("✕").clicked() {
                            draft.avatar_path = None;
                        }
                    });
                });

                if let Some(error) = self.directory.last_error() {
                    ui.colored_label(
                        egui::Color32::from_rgb(220, 90, 90),
                        format!("Photo could not be loaded: {error}"),
                    );
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if submitting {
                        ui.spinner();
                        ui.small("Loading photo...");
                    } else {
                        if ui.button("Add").clicked() {
                            self.submit_member();
                        }
                        if ui.button("Cancel").clicked() {
                            self.directory.cancel_form();
                        }
                    }
                });
            });
    }

    fn submit_member(&mut self) {
        match self.directory.submit() {
            SubmitOutcome::Rejected => {
                // Blank name: the form stays open, nothing is surfaced.
            }
            SubmitOutcome::Added(_) => {
                self.status = "Family member added".to_string();
            }
            SubmitOutcome::AwaitingAvatar(request) => {
                let generation = request.generation;
                let queued = dispatch_worker_command(
                    &self.cmd_tx,
                    WorkerCommand::DecodeAvatar {
                        generation,
                        path: request.path,
                    },
                    &mut self.status,
                );
                if !queued {
                    // Unwind immediately so the form re-enables instead of
                    // waiting on a decode that will never run.
                    self.directory
                        .complete_avatar(generation, Err("photo worker unavailable".to_string()));
                }
            }
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        let mut settings_open = self.settings_open;
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .open(&mut settings_open)
            .show(ctx, |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut self.settings.text_scale,
                        MIN_TEXT_SCALE..=MAX_TEXT_SCALE,
                    )
                    .text("Text scale")
                    .step_by(0.05),
                );
                ui.checkbox(&mut self.settings.show_relations, "Show relations on cards");
                if ui.button("Reset to defaults").clicked() {
                    self.settings = PersistedUiSettings::default();
                }
            });
        self.settings_open = settings_open;
    }
}

impl eframe::App for FamilyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_avatar_textures(ctx);
        ctx.set_zoom_factor(self.settings.text_scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_header(ui);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_branch_columns(ui);
            });
        });

        self.show_add_member_modal(ctx);
        self.show_settings_window(ctx);

        // Decode results arrive without user interaction; poll faster
        // while one is pending.
        if self.directory.workflow_state() == WorkflowState::Submitting {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

/// Renders one member card; returns true when its remove action was
/// clicked. Root members get an accent ring and no remove action.
fn show_member_card(ui: &mut egui::Ui, card: &MemberCard, show_relations: bool) -> bool {
    let mut remove_clicked = false;
    let accent = ui.style().visuals.selection.bg_fill;
    let stroke = if card.root {
        egui::Stroke::new(2.0, accent)
    } else {
        egui::Stroke::new(1.0, ui.style().visuals.window_stroke().color)
    };

    egui::Frame::NONE
        .fill(ui.style().visuals.extreme_bg_color)
        .stroke(stroke)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical_centered(|ui| {
                match &card.texture {
                    Some(texture) => {
                        ui.add(
                            egui::Image::new(texture).fit_to_exact_size(egui::vec2(
                                AVATAR_DISPLAY_SIZE,
                                AVATAR_DISPLAY_SIZE,
                            )),
                        );
                    }
                    None => {
                        ui.label(egui::RichText::new(&card.initials).strong().size(18.0));
                    }
                }
                ui.label(egui::RichText::new(&card.name).strong().size(12.0));
                if show_relations {
                    ui.small(card.relation.as_str());
                }
                if !card.root && ui.small_button("✕").clicked() {
                    remove_clicked = true;
                }
            });
        });

    remove_clicked
}

/// Two-letter uppercase fallback shown when a member has no photo.
fn initials(name: &str) -> String {
    let letters: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(2)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::{initials, PersistedUiSettings};

    #[test]
    fn initials_take_the_first_two_non_whitespace_characters() {
        assert_eq!(initials("Nana"), "NA");
        assert_eq!(initials("You"), "YO");
        assert_eq!(initials("a b"), "AB");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn missing_persisted_fields_fall_back_to_defaults() {
        let parsed: PersistedUiSettings = serde_json::from_str("{}").expect("parse empty settings");
        assert_eq!(parsed, PersistedUiSettings::default());
    }
}
