use classicyou_core::abstract_editor::ActionManager;
use classicyou_core::geometry::Rectangle;
use classicyou_core::math::Vec2;

use classicyou_editor::actions::{
    AddObjectAction, DeleteObjectAction, EditorContext, UpdateObjectAction,
};
use classicyou_editor::config::EditorConfig;
use classicyou_editor::input::{InputFrame, KeyCode, Modifiers, MouseButton, ToolEvent};
use classicyou_editor::inspector::UpdateResult;
use classicyou_editor::level::pillar::{Pillar, PillarProps};
use classicyou_editor::level::platform::{Platform, PlatformProps};
use classicyou_editor::level::texture::{Colour, TextureProp};
use classicyou_editor::level::wall::WallProps;
use classicyou_editor::level::{EditorLevel, FloorManager, LevelObject, ObjectId, ObjectType};
use classicyou_editor::selection::Selection;
use classicyou_editor::tools::ToolName;
use classicyou_editor::LevelEditor;

fn pillar(x: f32, y: f32) -> LevelObject {
    LevelObject::new(ObjectType::Pillar(Pillar::new(
        Vec2::new(x, y),
        PillarProps {
            size: 32.0,
            ..Default::default()
        },
    )))
}

fn key(k: KeyCode, modifiers: Modifiers) -> InputFrame {
    InputFrame::new(ToolEvent::KeyPressed(k)).with_modifiers(modifiers)
}

fn click(editor: &mut LevelEditor, event: fn(MouseButton, Vec2) -> ToolEvent, at: Vec2) -> bool {
    editor.handle_input(InputFrame::new(event(MouseButton::Left, at)))
}

fn down(button: MouseButton, tile: Vec2) -> ToolEvent {
    ToolEvent::MouseDown { button, tile }
}

fn up(button: MouseButton, tile: Vec2) -> ToolEvent {
    ToolEvent::MouseUp { button, tile }
}

fn objects(level: &EditorLevel) -> Vec<(i32, LevelObject)> {
    level.iter_objects().map(|(f, o)| (f, *o)).collect()
}

// ---------------------------------------------------------------------------
// History properties
// ---------------------------------------------------------------------------

#[test]
fn slider_drag_undoes_in_one_step() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    click(&mut editor, down, Vec2::new(0.0, 0.0));
    click(&mut editor, up, Vec2::new(96.0, 0.0));
    let (id, _) = editor.state().selection.single().unwrap();

    let set_height = |editor: &LevelEditor, height: f32| {
        let mut wall = *editor.level().get_object(id).unwrap();
        if let ObjectType::Wall(w) = &mut wall.object_type {
            w.props.wall_height = height;
        }
        wall
    };
    let height = |editor: &LevelEditor| {
        editor.level().get_object(id).unwrap().as_wall().unwrap().props.wall_height
    };

    let start = set_height(&editor, 0.2);
    editor.edit_active_object(UpdateResult::toggled(true), start);
    let history_before_drag = editor.actions().history_len();

    let continuous = UpdateResult {
        continuous_update: true,
        ..Default::default()
    };
    for step in 1..=30 {
        let value = 0.2 + 0.02 * step as f32;
        let frame = set_height(&editor, value);
        editor.edit_active_object(continuous, frame);
    }
    let commit = UpdateResult {
        action: true,
        ..Default::default()
    };
    let end = set_height(&editor, 0.8);
    editor.edit_active_object(commit, end);

    assert_eq!(editor.actions().history_len(), history_before_drag + 1);
    assert_eq!(height(&editor), 0.8);
    editor.undo();
    assert_eq!(height(&editor), 0.2);
}

#[test]
fn escape_rolls_back_slider_drag() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    click(&mut editor, down, Vec2::new(0.0, 0.0));
    click(&mut editor, up, Vec2::new(96.0, 0.0));
    let (id, _) = editor.state().selection.single().unwrap();
    let height = |editor: &LevelEditor| {
        editor.level().get_object(id).unwrap().as_wall().unwrap().props.wall_height
    };
    let original = height(&editor);
    assert_eq!(editor.actions().history_len(), 1);

    let continuous = UpdateResult {
        continuous_update: true,
        ..Default::default()
    };
    for value in [0.5, 0.9, 1.3] {
        let mut wall = *editor.level().get_object(id).unwrap();
        if let ObjectType::Wall(w) = &mut wall.object_type {
            w.props.wall_height = value;
        }
        editor.edit_active_object(continuous, wall);
    }
    assert_eq!(height(&editor), 1.3);

    assert!(editor.handle_input(key(KeyCode::Escape, Modifiers::NONE)));
    assert_eq!(height(&editor), original);
    assert_eq!(editor.actions().history_len(), 1);

    // Undo now reverts the wall creation, not part of the drag
    editor.undo();
    assert_eq!(editor.level().object_count(), 0);
}

#[test]
fn undo_redo_symmetry_for_every_depth() {
    let mut ctx = EditorContext::default();
    let mut actions = ActionManager::new();
    actions.push_action(Box::new(AddObjectAction::new(pillar(0.0, 0.0), 0)), &mut ctx, false);
    actions.push_action(Box::new(AddObjectAction::new(pillar(64.0, 0.0), 1)), &mut ctx, false);
    let first = *ctx.level.get_object(ObjectId(1)).unwrap();
    let mut moved = first;
    moved.move_by(Vec2::new(0.0, 32.0));
    actions.push_action(Box::new(UpdateObjectAction::new(first, moved, 0)), &mut ctx, false);
    actions.push_action(Box::new(DeleteObjectAction::single(moved, 0)), &mut ctx, false);

    let end_state = objects(&ctx.level);
    for k in 0..=actions.history_len() {
        for _ in 0..k {
            assert!(actions.undo_action(&mut ctx));
        }
        for _ in 0..k {
            assert!(actions.redo_action(&mut ctx));
        }
        assert_eq!(objects(&ctx.level), end_state, "depth {k}");
    }
}

#[test]
fn pushing_after_undo_discards_the_tail() {
    let mut ctx = EditorContext::default();
    let mut actions = ActionManager::new();
    for x in [0.0, 64.0, 128.0] {
        actions.push_action(Box::new(AddObjectAction::new(pillar(x, 0.0), 0)), &mut ctx, false);
    }
    actions.undo_action(&mut ctx);
    actions.undo_action(&mut ctx);
    actions.push_action(Box::new(AddObjectAction::new(pillar(0.0, 96.0), 0)), &mut ctx, false);

    assert_eq!(actions.history_len(), 2);
    for _ in 0..3 {
        assert!(!actions.redo_action(&mut ctx));
    }
    assert_eq!(ctx.level.object_count(), 2);
}

#[test]
fn deleted_object_comes_back_with_its_id() {
    let mut ctx = EditorContext::default();
    let object = *ctx.level.add_object(pillar(0.0, 0.0).with_id(ObjectId(5)), 0);
    // Advance the counter past 5
    ctx.level.add_object(pillar(64.0, 0.0), 0);
    ctx.level.remove_object(ObjectId(6));

    let mut actions = ActionManager::new();
    actions.push_action(Box::new(DeleteObjectAction::single(object, 0)), &mut ctx, false);
    assert_eq!(ctx.level.object_count(), 0);
    actions.undo_action(&mut ctx);

    let floor0 = ctx.level.objects_on_floor(0);
    assert_eq!(floor0.len(), 1);
    assert_eq!(floor0[0].object_id, ObjectId(5));
    assert_eq!(floor0[0], object);
}

#[test]
fn wall_scenario_uses_session_default() {
    let mut config = EditorConfig::default();
    config.defaults.wall_default = WallProps {
        texture_front: TextureProp::new(7, Colour::new(10, 20, 30, 255)),
        ..Default::default()
    };
    let mut editor = LevelEditor::new(&config);
    click(&mut editor, down, Vec2::new(0.0, 0.0));
    editor.handle_input(InputFrame::new(ToolEvent::MouseMove {
        tile: Vec2::new(96.0, 0.0),
    }));
    click(&mut editor, up, Vec2::new(160.0, 0.0));
    assert_eq!(editor.level().objects_on_floor(0).len(), 1);

    editor.undo();
    assert_eq!(editor.level().object_count(), 0);
    editor.redo();

    let floor0 = editor.level().objects_on_floor(0);
    assert_eq!(floor0.len(), 1);
    let wall = floor0[0].as_wall().unwrap();
    assert_eq!(wall.params.start, Vec2::new(0.0, 0.0));
    assert_eq!(wall.params.end, Vec2::new(160.0, 0.0));
    assert_eq!(wall.props, config.defaults.wall_default);
}

// ---------------------------------------------------------------------------
// Floors and selection
// ---------------------------------------------------------------------------

#[test]
fn floors_stay_contiguous() {
    let mut floors = FloorManager::new();
    for f in [0, 1, -1, 2, 2, -2, 0, 3, -3, 1] {
        floors.ensure_floor_exists(f);
        let present: Vec<i32> = floors.floors().iter().map(|f| f.real_floor).collect();
        let expected: Vec<i32> = (floors.min_floor()..=floors.max_floor()).collect();
        assert_eq!(present, expected);
    }
    assert_eq!((floors.min_floor(), floors.max_floor()), (-3, 3));
}

#[test]
fn select_within_excludes_straddling_objects() {
    let mut level = EditorLevel::new();
    let inside = level.add_object(pillar(32.0, 32.0), 0).object_id;
    let straddling = level.add_object(pillar(112.0, 32.0), 0).object_id;
    let platform = Platform::new(
        Vec2::new(0.0, 0.0),
        PlatformProps {
            width: 128.0,
            depth: 128.0,
            ..Default::default()
        },
    );
    let exact = level
        .add_object(LevelObject::new(ObjectType::Platform(platform)), 0)
        .object_id;
    let other_floor = level.add_object(pillar(32.0, 32.0), 0).object_id;
    level.ensure_floor_exists(1);
    let (moved, _) = level.remove_object(other_floor).unwrap();
    level.add_object(moved, 1);

    let mut selection = Selection::new();
    let rect = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(128.0, 128.0));
    level.select_within(&rect, &mut selection, 0);

    assert!(selection.contains(inside));
    assert!(selection.contains(exact));
    assert!(!selection.contains(straddling));
    assert!(!selection.contains(other_floor));
}

// ---------------------------------------------------------------------------
// Input routing through the level editor
// ---------------------------------------------------------------------------

#[test]
fn copy_paste_and_delete_through_shortcuts() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    editor.set_tool(classicyou_editor::selection::ToolType::CreatePillar);
    click(&mut editor, down, Vec2::new(64.0, 64.0));
    click(&mut editor, up, Vec2::new(64.0, 64.0));
    assert_eq!(editor.level().object_count(), 1);

    assert!(editor.handle_input(key(KeyCode::C, Modifiers::CTRL)));
    editor.handle_input(InputFrame::new(ToolEvent::MouseMove {
        tile: Vec2::new(256.0, 128.0),
    }));
    assert!(editor.handle_input(key(KeyCode::V, Modifiers::CTRL)));
    assert_eq!(editor.level().object_count(), 2);

    let (pasted, _) = editor.state().selection.single().unwrap();
    let pasted = editor.level().get_object(pasted).unwrap();
    assert_eq!(pasted.bounds().min(), Vec2::new(256.0, 128.0));

    assert!(editor.handle_input(key(KeyCode::Delete, Modifiers::NONE)));
    assert_eq!(editor.level().object_count(), 1);
    editor.handle_input(key(KeyCode::Z, Modifiers::CTRL));
    assert_eq!(editor.level().object_count(), 2);
}

#[test]
fn dragging_selection_moves_it() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    editor.set_tool(classicyou_editor::selection::ToolType::CreatePillar);
    click(&mut editor, down, Vec2::new(64.0, 64.0));
    click(&mut editor, up, Vec2::new(64.0, 64.0));
    let (id, _) = editor.state().selection.single().unwrap();
    let history = editor.actions().history_len();

    // Press on the selected pillar starts a move instead of a new pillar
    click(&mut editor, down, Vec2::new(64.0, 64.0));
    editor.handle_input(InputFrame::new(ToolEvent::MouseMove {
        tile: Vec2::new(96.0, 64.0),
    }));
    assert_eq!(editor.move_preview().len(), 1);
    click(&mut editor, up, Vec2::new(128.0, 96.0));

    assert_eq!(editor.level().object_count(), 1);
    assert_eq!(editor.actions().history_len(), history + 1);
    assert_eq!(
        editor.level().get_object(id).unwrap().bounds().min(),
        Vec2::new(128.0, 96.0)
    );
}

#[test]
fn selecting_a_polygon_binds_its_tool() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    editor.set_tool(classicyou_editor::selection::ToolType::CreatePolygonPlatform);
    click(&mut editor, down, Vec2::new(0.0, 0.0));
    click(&mut editor, up, Vec2::new(64.0, 64.0));
    assert_eq!(editor.tool().name(), ToolName::UpdatePolygon);

    // Drag the bottom-right corner
    click(&mut editor, down, Vec2::new(64.0, 64.0));
    click(&mut editor, up, Vec2::new(96.0, 64.0));
    let (id, _) = editor.state().selection.single().unwrap();
    let polygon = *editor.level().get_object(id).unwrap().as_polygon().unwrap();
    assert_eq!(polygon.params.corners[2], Vec2::new(96.0, 64.0));

    editor.undo();
    let polygon = *editor.level().get_object(id).unwrap().as_polygon().unwrap();
    assert_eq!(polygon.params.corners[2], Vec2::new(64.0, 64.0));
}

#[test]
fn area_select_tool_picks_objects() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    editor.set_tool(classicyou_editor::selection::ToolType::CreatePillar);
    for x in [32.0, 96.0, 320.0] {
        click(&mut editor, down, Vec2::new(x, 32.0));
        click(&mut editor, up, Vec2::new(x, 32.0));
    }
    editor.set_tool(classicyou_editor::selection::ToolType::AreaSelect);
    click(&mut editor, down, Vec2::new(0.0, 0.0));
    click(&mut editor, up, Vec2::new(192.0, 192.0));
    assert_eq!(editor.state().selection.len(), 2);
}

#[test]
fn boundary_undo_is_a_no_op() {
    let mut editor = LevelEditor::new(&EditorConfig::default());
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert!(editor.actions().log().is_empty());
}
