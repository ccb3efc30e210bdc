//! Property editors for the active object.
//!
//! `property_gui` edits a value copy of the object and reports what kind of
//! change happened this frame. [`PropertyEditSession`] turns those reports
//! into history entries: a slider drag becomes one undo step no matter how
//! many frames it spans.

use classicyou_core::abstract_editor::ActionManager;

use crate::actions::{EditorContext, UpdateObjectAction};
use crate::level::pillar::Pillar;
use crate::level::platform::{Platform, PlatformStyle};
use crate::level::polygon::PolygonPlatform;
use crate::level::ramp::{Direction, Ramp, RampStyle};
use crate::level::texture::TextureProp;
use crate::level::wall::Wall;
use crate::level::{FLOOR_HEIGHT, LevelObject, ObjectType, TILE_SIZE};

/// What a property editor did during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// A value is being dragged; preview and coalesce.
    pub continuous_update: bool,
    /// An edit finished (drag released or value typed in); commit.
    pub action: bool,
    /// A discrete edit (checkbox, combo box, colour) that commits at once.
    pub always_update: bool,
}

impl UpdateResult {
    /// Classifies the response of a drag-capable widget.
    pub fn from_drag(response: &egui::Response) -> Self {
        Self {
            continuous_update: response.changed() && response.dragged(),
            action: response.drag_stopped() || (response.changed() && !response.dragged()),
            always_update: false,
        }
    }

    pub fn toggled(changed: bool) -> Self {
        Self {
            always_update: changed,
            ..Default::default()
        }
    }

    pub fn merge(&mut self, other: UpdateResult) {
        self.continuous_update |= other.continuous_update;
        self.action |= other.action;
        self.always_update |= other.always_update;
    }

    pub fn any(&self) -> bool {
        self.continuous_update || self.action || self.always_update
    }
}

/// Draws the editor for `object`, editing it in place.
pub fn property_gui(ui: &mut egui::Ui, object: &mut LevelObject) -> UpdateResult {
    ui.label(
        egui::RichText::new(format!("{} {}", object.kind().label(), object.object_id))
            .strong()
            .color(crate::theme::TEXT_SECONDARY),
    );
    ui.separator();
    match &mut object.object_type {
        ObjectType::Wall(wall) => wall_gui(ui, wall),
        ObjectType::Platform(platform) => platform_gui(ui, platform),
        ObjectType::PolygonPlatform(polygon) => polygon_gui(ui, polygon),
        ObjectType::Pillar(pillar) => pillar_gui(ui, pillar),
        ObjectType::Ramp(ramp) => ramp_gui(ui, ramp),
    }
}

fn wall_gui(ui: &mut egui::Ui, wall: &mut Wall) -> UpdateResult {
    let props = &mut wall.props;
    let mut result = texture_gui(ui, "Front", &mut props.texture_front);
    result.merge(texture_gui(ui, "Back", &mut props.texture_back));
    result.merge(height_slider(ui, "Base", &mut props.base_height));
    result.merge(height_slider(ui, "Height", &mut props.wall_height));
    result
}

fn platform_gui(ui: &mut egui::Ui, platform: &mut Platform) -> UpdateResult {
    let props = &mut platform.props;
    let mut result = texture_gui(ui, "Top", &mut props.texture_top);
    result.merge(texture_gui(ui, "Bottom", &mut props.texture_bottom));
    result.merge(length_drag(ui, "Width", &mut props.width));
    result.merge(length_drag(ui, "Depth", &mut props.depth));
    result.merge(height_slider(ui, "Base", &mut props.base));
    result.merge(combo(
        ui,
        "Style",
        &mut props.style,
        &PlatformStyle::ALL,
        PlatformStyle::label,
    ));
    result
}

fn polygon_gui(ui: &mut egui::Ui, polygon: &mut PolygonPlatform) -> UpdateResult {
    let props = &mut polygon.props;
    let mut result = texture_gui(ui, "Top", &mut props.texture_top);
    result.merge(texture_gui(ui, "Bottom", &mut props.texture_bottom));
    result.merge(height_slider(ui, "Base", &mut props.base));
    result.merge(UpdateResult::toggled(
        ui.checkbox(&mut props.visible, "Visible").changed(),
    ));
    result
}

fn pillar_gui(ui: &mut egui::Ui, pillar: &mut Pillar) -> UpdateResult {
    let props = &mut pillar.props;
    let mut result = texture_gui(ui, "Texture", &mut props.texture);
    result.merge(length_drag(ui, "Size", &mut props.size));
    result.merge(height_slider(ui, "Base", &mut props.base_height));
    result.merge(height_slider(ui, "Height", &mut props.height));
    result.merge(UpdateResult::toggled(
        ui.checkbox(&mut props.angled, "Angled").changed(),
    ));
    result
}

fn ramp_gui(ui: &mut egui::Ui, ramp: &mut Ramp) -> UpdateResult {
    let props = &mut ramp.props;
    let mut result = texture_gui(ui, "Top", &mut props.texture_top);
    result.merge(texture_gui(ui, "Bottom", &mut props.texture_bottom));
    result.merge(length_drag(ui, "Width", &mut props.width));
    result.merge(length_drag(ui, "Depth", &mut props.depth));
    result.merge(height_slider(ui, "Start height", &mut props.start_height));
    result.merge(height_slider(ui, "End height", &mut props.end_height));
    result.merge(combo(
        ui,
        "Ramp style",
        &mut props.style,
        &RampStyle::ALL,
        RampStyle::label,
    ));
    result.merge(combo(
        ui,
        "Direction",
        &mut props.direction,
        &Direction::ALL,
        Direction::label,
    ));
    result
}

fn texture_gui(ui: &mut egui::Ui, label: &str, texture: &mut TextureProp) -> UpdateResult {
    let mut result = UpdateResult::default();
    ui.horizontal(|ui| {
        ui.label(label);
        let mut id = texture.id as i64;
        let response = ui.add(
            egui::DragValue::new(&mut id)
                .range(0..=u32::MAX as i64)
                .prefix("tex "),
        );
        if response.changed() {
            texture.id = id as u32;
        }
        result.merge(UpdateResult::from_drag(&response));

        let mut rgba = texture.colour.to_array();
        if ui.color_edit_button_srgba_unmultiplied(&mut rgba).changed() {
            texture.colour = rgba.into();
            result.always_update = true;
        }
    });
    result
}

fn height_slider(ui: &mut egui::Ui, label: &str, value: &mut f32) -> UpdateResult {
    let response = ui.add(egui::Slider::new(value, 0.0..=FLOOR_HEIGHT).text(label));
    UpdateResult::from_drag(&response)
}

fn length_drag(ui: &mut egui::Ui, label: &str, value: &mut f32) -> UpdateResult {
    let mut result = UpdateResult::default();
    ui.horizontal(|ui| {
        ui.label(label);
        let response = ui.add(
            egui::DragValue::new(value)
                .speed(1.0)
                .range(1.0..=TILE_SIZE * 256.0),
        );
        result = UpdateResult::from_drag(&response);
    });
    result
}

fn combo<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    options: &[T],
    text: fn(T) -> &'static str,
) -> UpdateResult {
    let before = *value;
    egui::ComboBox::from_label(label)
        .selected_text(text(before))
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, *option, text(*option));
            }
        });
    UpdateResult::toggled(*value != before)
}

/// Owner of the pre-drag snapshot for one property editor.
///
/// The first continuous frame caches the object as it was before the drag
/// and pushes an update; later frames push with coalescing so they fold
/// into that entry. The commit closes the drag and the next drag caches
/// afresh. [`cancel`](Self::cancel) rolls an open drag back.
#[derive(Debug, Default)]
pub struct PropertyEditSession {
    before: Option<LevelObject>,
    /// History length right after the drag's entry was pushed.
    entry: Option<usize>,
}

impl PropertyEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag is in progress.
    pub fn is_editing(&self) -> bool {
        self.before.is_some()
    }

    /// Forgets the cached snapshot without pushing anything.
    pub fn reset(&mut self) {
        self.before = None;
        self.entry = None;
    }

    /// Abandons an open drag: the object goes back to its pre-drag state
    /// and the drag leaves nothing in the history. Returns `true` if a drag
    /// was open.
    pub fn cancel(
        &mut self,
        ctx: &mut EditorContext,
        actions: &mut ActionManager<EditorContext>,
    ) -> bool {
        let Some(before) = self.before.take() else {
            return false;
        };
        let entry = self.entry.take();
        if entry.is_some_and(|len| len == actions.history_len() && len == actions.cursor())
            && actions.discard_last(ctx)
        {
            log::debug!("Cancelled edit of {}", before.object_id);
            return true;
        }
        // The drag's entry is gone or buried; restore the snapshot directly
        if let Some(floor) = ctx.level.get_object_floor(before.object_id) {
            ctx.level.update_object(&before, floor);
        }
        true
    }

    /// Pushes the history entry for one frame of property editing.
    /// `edited` is the object after this frame's changes. Returns `true`
    /// when the history changed.
    pub fn submit(
        &mut self,
        result: UpdateResult,
        edited: LevelObject,
        floor: i32,
        ctx: &mut EditorContext,
        actions: &mut ActionManager<EditorContext>,
    ) -> bool {
        if self
            .before
            .is_some_and(|b| b.object_id != edited.object_id)
        {
            log::debug!("Dropping stale edit snapshot");
            self.reset();
        }
        let Some(current) = ctx.level.get_object(edited.object_id).copied() else {
            log::warn!("Edited object {} no longer exists", edited.object_id);
            self.reset();
            return false;
        };

        if result.action {
            self.entry = None;
            let (before, coalesce) = match self.before.take() {
                Some(before) => (before, true),
                None => (current, false),
            };
            if !coalesce && edited == current {
                return false;
            }
            let action = UpdateObjectAction::new(before, edited, floor);
            return actions.push_action(Box::new(action), ctx, coalesce);
        }

        if result.continuous_update {
            let coalesce = self.before.is_some();
            let before = *self.before.get_or_insert(current);
            let action = UpdateObjectAction::new(before, edited, floor);
            let pushed = actions.push_action(Box::new(action), ctx, coalesce);
            if !coalesce {
                if pushed {
                    self.entry = Some(actions.history_len());
                } else {
                    // Nothing to fold later frames into
                    self.reset();
                }
            }
            return pushed;
        }

        if result.always_update && edited != current {
            self.reset();
            let action = UpdateObjectAction::new(current, edited, floor);
            return actions.push_action(Box::new(action), ctx, false);
        }
        false
    }
}
