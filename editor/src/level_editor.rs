//! Per-session orchestration of the level editor.
//!
//! [`LevelEditor`] owns the editing context, the action history, the active
//! tool and the handlers, and decides which of them sees each input frame.

use std::path::{Path, PathBuf};

use classicyou_core::abstract_editor::{ActionManager, EditAction};
use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;

use crate::actions::{BulkUpdateObjectAction, DeleteObjectAction, EditorContext};
use crate::config::EditorConfig;
use crate::handlers::{CopyPasteHandler, ObjectMoveHandler};
use crate::input::{InputFrame, KeyCode, Modifiers, MouseButton, ToolEvent};
use crate::inspector::{PropertyEditSession, UpdateResult, property_gui};
use crate::level::serialize::LoadSummary;
use crate::level::{EditorLevel, LevelFileError, LevelObject, ObjectId, ObjectKind, snap_to_tile};
use crate::selection::{EditorState, ToolType};
use crate::tools::{Tool, ToolOutput, ToolPreview, UpdatePolygonTool, UpdateWallTool, create_tool};

pub struct LevelEditor {
    ctx: EditorContext,
    actions: ActionManager<EditorContext>,
    tool: Box<dyn Tool>,
    /// Object the active update tool is bound to.
    tool_target: Option<ObjectId>,
    move_handler: ObjectMoveHandler,
    clipboard: CopyPasteHandler,
    property_session: PropertyEditSession,
    levels_directory: PathBuf,
    theme_applied: bool,
}

impl LevelEditor {
    pub fn new(config: &EditorConfig) -> Self {
        let state = EditorState::new(config);
        let level = EditorLevel::new().with_select_distance(config.editor.select_distance);
        let tool = create_tool(state.tool);
        log::info!("Level editor ready, tool: {}", state.tool.label());
        Self {
            ctx: EditorContext::new(state, level),
            actions: ActionManager::new(),
            tool,
            tool_target: None,
            move_handler: ObjectMoveHandler::new(),
            clipboard: CopyPasteHandler::new(),
            property_session: PropertyEditSession::new(),
            levels_directory: config.editor.levels_directory.clone(),
            theme_applied: false,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn level(&self) -> &EditorLevel {
        &self.ctx.level
    }

    pub fn state(&self) -> &EditorState {
        &self.ctx.state
    }

    pub fn actions(&self) -> &ActionManager<EditorContext> {
        &self.actions
    }

    pub fn tool(&self) -> &dyn Tool {
        self.tool.as_ref()
    }

    pub fn clipboard(&self) -> &CopyPasteHandler {
        &self.clipboard
    }

    pub fn is_dragging(&self) -> bool {
        self.tool.is_dragging() || self.move_handler.is_dragging()
    }

    /// What the active tool would create or change if released now.
    pub fn tool_preview(&self) -> ToolPreview {
        self.tool.preview()
    }

    /// Moved copies of the selection while a move is in progress.
    pub fn move_preview(&self) -> Vec<(LevelObject, i32)> {
        self.move_handler.preview()
    }

    /// Routes one input frame. Returns `true` if anything used it.
    pub fn handle_input(&mut self, input: InputFrame) -> bool {
        // Releases always get through so drags cannot get stuck under a
        // widget
        let is_release = matches!(input.event, ToolEvent::MouseUp { .. });
        if input.ui_wants_pointer && !is_release && input.event.tile().is_some() {
            return false;
        }
        if let Some(tile) = input.event.tile() {
            self.ctx.state.node_hovered = tile;
        }

        match input.event {
            ToolEvent::KeyPressed(key) => self.handle_key(key, input.modifiers),
            ToolEvent::MouseDown { button: MouseButton::Left, tile } if !self.is_dragging() => {
                self.handle_press(input, tile)
            }
            ToolEvent::MouseMove { tile } if self.move_handler.is_dragging() => {
                self.move_handler.update(tile);
                true
            }
            ToolEvent::MouseUp { button: MouseButton::Left, tile }
                if self.move_handler.is_dragging() =>
            {
                if let Some(action) = self.move_handler.finish(tile) {
                    self.push(action);
                }
                true
            }
            _ => self.forward_to_tool(&input),
        }
    }

    fn handle_press(&mut self, input: InputFrame, tile: Vec2) -> bool {
        // Handles of the bound update tool take priority over selection
        if self.tool_target.is_some() && self.forward_to_tool(&input) {
            return true;
        }
        if self.move_handler.try_start(tile, &self.ctx) {
            return true;
        }

        let floor = self.ctx.state.current_floor;
        let active = self.ctx.state.selection.active_object();
        let hit = self
            .ctx
            .level
            .try_select(tile, active, floor)
            .map(|o| o.object_id);
        let selection = &mut self.ctx.state.selection;
        match hit {
            Some(id) => {
                if input.modifiers.ctrl {
                    selection.add_to_selection(id, floor);
                } else {
                    selection.set_selection(id, floor);
                }
                self.property_session.reset();
                self.sync_tool_with_selection();
                return true;
            }
            None if !input.modifiers.ctrl && selection.has_selection() => {
                selection.clear_selection();
                self.property_session.reset();
                self.sync_tool_with_selection();
            }
            None => {}
        }
        self.forward_to_tool(&input)
    }

    fn forward_to_tool(&mut self, input: &InputFrame) -> bool {
        match self.tool.on_event(input, &mut self.ctx) {
            ToolOutput::Ignored => false,
            ToolOutput::Consumed => true,
            ToolOutput::Commit(action) => {
                self.push(action);
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> bool {
        if key == KeyCode::Escape {
            let was_dragging = self.is_dragging() || self.property_session.is_editing();
            self.cancel_property_edit();
            self.abort_interactions();
            return was_dragging;
        }
        if self.is_dragging() {
            return false;
        }
        match (key, modifiers.ctrl) {
            (KeyCode::Z, true) if modifiers.shift => self.redo(),
            (KeyCode::Z, true) => self.undo(),
            (KeyCode::Y, true) => self.redo(),
            (KeyCode::C, true) => self.copy_selection() > 0,
            (KeyCode::V, true) => self.paste(),
            (KeyCode::Delete, _) => self.delete_selection(),
            (KeyCode::R, false) => self.rotate_selection(),
            (KeyCode::PageUp, _) => {
                self.change_floor(1);
                true
            }
            (KeyCode::PageDown, _) => {
                self.change_floor(-1);
                true
            }
            _ => false,
        }
    }

    fn push(&mut self, action: Box<dyn EditAction<EditorContext>>) -> bool {
        let pushed = self.actions.push_action(action, &mut self.ctx, false);
        self.sync_tool_with_selection();
        pushed
    }

    fn abort_interactions(&mut self) {
        self.tool.cancel();
        self.move_handler.cancel();
        self.property_session.reset();
    }

    /// Rolls back a property drag that has not been committed yet.
    pub fn cancel_property_edit(&mut self) -> bool {
        let cancelled = self.property_session.cancel(&mut self.ctx, &mut self.actions);
        if cancelled {
            self.sync_tool_with_selection();
        }
        cancelled
    }

    pub fn undo(&mut self) -> bool {
        self.abort_interactions();
        let undone = self.actions.undo_action(&mut self.ctx);
        self.sync_tool_with_selection();
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.abort_interactions();
        let redone = self.actions.redo_action(&mut self.ctx);
        self.sync_tool_with_selection();
        redone
    }

    /// Picks the creation tool for `tool_type` and clears the selection.
    pub fn set_tool(&mut self, tool_type: ToolType) {
        self.abort_interactions();
        self.ctx.state.tool = tool_type;
        self.ctx.state.selection.clear_selection();
        self.tool = create_tool(tool_type);
        self.tool_target = None;
        log::debug!("Tool: {}", tool_type.label());
    }

    /// Binds the wall or polygon update tool to a single selected wall or
    /// polygon, and falls back to the creation tool otherwise.
    pub fn sync_tool_with_selection(&mut self) {
        let target = self.ctx.state.selection.single().and_then(|(id, floor)| {
            let kind = self.ctx.level.get_object(id)?.kind();
            matches!(kind, ObjectKind::Wall | ObjectKind::PolygonPlatform)
                .then_some((id, floor, kind))
        });

        match target {
            Some((id, _, _)) if self.tool_target == Some(id) => {}
            Some((id, floor, ObjectKind::Wall)) => {
                self.tool = Box::new(UpdateWallTool::new(id, floor));
                self.tool_target = Some(id);
            }
            Some((id, floor, _)) => {
                self.tool = Box::new(UpdatePolygonTool::new(id, floor));
                self.tool_target = Some(id);
            }
            None if self.tool_target.is_some() => {
                self.tool = create_tool(self.ctx.state.tool);
                self.tool_target = None;
            }
            None => {}
        }
    }

    /// Deletes the selection as one undoable step.
    pub fn delete_selection(&mut self) -> bool {
        let (objects, floors) = self
            .ctx
            .level
            .copy_objects_and_floors(self.ctx.state.selection.objects());
        if objects.is_empty() {
            return false;
        }
        self.push(Box::new(DeleteObjectAction::new(objects, floors)))
    }

    /// Rotates the selection 90 degrees clockwise about the grid point
    /// nearest the centre of its bounds.
    pub fn rotate_selection(&mut self) -> bool {
        let (old, floors) = self
            .ctx
            .level
            .copy_objects_and_floors(self.ctx.state.selection.objects());
        let Some(bounds) = old
            .iter()
            .map(LevelObject::bounds)
            .reduce(|a, b: Rectangle| a.union(&b))
        else {
            return false;
        };
        let centre = snap_to_tile(bounds.centre());
        let new = old
            .iter()
            .map(|o| {
                let mut o = *o;
                o.rotate_around(centre);
                o
            })
            .collect();
        self.push(Box::new(BulkUpdateObjectAction::new(old, new, floors)))
    }

    /// Moves to another floor, creating it when needed.
    pub fn change_floor(&mut self, delta: i32) {
        self.abort_interactions();
        let floor = self.ctx.state.current_floor + delta;
        self.ctx.level.ensure_floors_up_to(floor);
        self.ctx.state.current_floor = floor;
        self.ctx.state.selection.clear_selection();
        self.sync_tool_with_selection();
        log::info!("Current floor: {floor}");
    }

    pub fn copy_selection(&mut self) -> usize {
        self.clipboard.copy_selection(&self.ctx)
    }

    /// Pastes the clipboard at the hovered tile.
    pub fn paste(&mut self) -> bool {
        let at = self.ctx.state.node_hovered;
        match self.clipboard.paste(&self.ctx, at) {
            Some(action) => self.push(action),
            None => false,
        }
    }

    /// Applies one frame of property editing to the active object.
    pub fn edit_active_object(&mut self, result: UpdateResult, edited: LevelObject) -> bool {
        let Some(floor) = self.ctx.level.get_object_floor(edited.object_id) else {
            return false;
        };
        let changed = self.property_session.submit(
            result,
            edited,
            floor,
            &mut self.ctx,
            &mut self.actions,
        );
        if changed {
            self.sync_tool_with_selection();
        }
        changed
    }

    /// Draws the property editor of the active object.
    pub fn show_properties(&mut self, ui: &mut egui::Ui) -> UpdateResult {
        let active = self
            .ctx
            .state
            .selection
            .active_object()
            .and_then(|id| self.ctx.level.get_object(id).copied());
        let Some(mut object) = active else {
            ui.label(egui::RichText::new("Nothing selected").color(crate::theme::TEXT_MUTED));
            return UpdateResult::default();
        };
        let result = property_gui(ui, &mut object);
        if result.any() {
            self.edit_active_object(result, object);
        }
        result
    }

    /// Side panels: properties on top, history below.
    pub fn show_panels(&mut self, ctx: &egui::Context) {
        if !self.theme_applied {
            crate::theme::apply(ctx);
            self.theme_applied = true;
        }
        egui::SidePanel::right("level_inspector").show(ctx, |ui| {
            ui.heading(format!("Floor {}", self.ctx.state.current_floor));
            self.show_properties(ui);
            ui.separator();
            crate::history_panel::show_history(ui, &self.actions);
        });
        egui::TopBottomPanel::bottom("action_log").show(ctx, |ui| {
            crate::history_panel::show_action_log(ui, &self.actions);
        });
    }

    /// Path of a level called `name` inside the configured levels directory.
    pub fn level_path(&self, name: &str) -> PathBuf {
        self.levels_directory.join(format!("{name}.json"))
    }

    pub fn save(&mut self, path: &Path) -> Result<(), LevelFileError> {
        self.ctx.level.save_to_file(path)
    }

    /// Loads a level and starts a fresh history. The current level is kept
    /// if loading fails.
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary, LevelFileError> {
        self.abort_interactions();
        let summary = self.ctx.level.load_from_file(path)?;
        self.actions.clear();
        self.ctx.state.selection.clear_selection();
        self.ctx.state.current_floor = 0;
        self.sync_tool_with_selection();
        Ok(summary)
    }
}
