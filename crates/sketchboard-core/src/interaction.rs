//! Pointer and keyboard driven interaction state machine.
//!
//! The controller is the single writer of the element list, the
//! application state and the history. Hosts forward screen-space events
//! and read state back through the accessors.

use crate::config::EngineConfig;
use crate::hit_test;
use crate::history::History;
use crate::input::{InputEvent, KeyCommand, KeyInput, PointerButton, PointerEvent};
use crate::selection::{self, CursorHint, HandleKind};
use crate::shapes::{
    self, Element, ElementId, ElementKind, PropertyError, PropertyValue, ToolProperty,
};
use crate::state::ApplicationState;
use crate::tools::Tool;
use crate::viewport::Viewport;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// In-flight pointer gesture.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    /// Creating a new element.
    Drawing { id: ElementId },
    /// Dragging an element; `original` is the snapshot taken on press.
    Moving { original: Element, anchor: Point },
    /// Dragging a handle of the selected element.
    Resizing { original: Element, handle: HandleKind },
}

/// Public view of the gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Idle,
    Drawing,
    Moving,
    Resizing,
}

/// The whiteboard interaction engine.
#[derive(Debug, Clone)]
pub struct InteractionController {
    elements: Vec<Element>,
    state: ApplicationState,
    history: History,
    viewport: Viewport,
    config: EngineConfig,
    gesture: Gesture,
    /// Last screen position while the pan button is held.
    pan_from: Option<Point>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(mut config: EngineConfig) -> Self {
        if config.pan_button == PointerButton::Left {
            log::warn!("left button cannot pan, using middle");
            config.pan_button = PointerButton::Middle;
        }
        Self {
            elements: Vec::new(),
            state: ApplicationState::default(),
            history: History::with_limit(config.history_limit),
            viewport: Viewport::from_config(&config),
            config,
            gesture: Gesture::Idle,
            pan_from: None,
        }
    }

    /// Live element list in z-order, for renderers.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gesture(&self) -> GestureKind {
        match self.gesture {
            Gesture::Idle => GestureKind::Idle,
            Gesture::Drawing { .. } => GestureKind::Drawing,
            Gesture::Moving { .. } => GestureKind::Moving,
            Gesture::Resizing { .. } => GestureKind::Resizing,
        }
    }

    /// The element the current gesture is working on.
    pub fn active_element(&self) -> Option<&Element> {
        let id = match &self.gesture {
            Gesture::Idle => return None,
            Gesture::Drawing { id } => id.as_str(),
            Gesture::Moving { original, .. } | Gesture::Resizing { original, .. } => original.id(),
        };
        shapes::find(&self.elements, id)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        shapes::find(&self.elements, self.state.selection()?)
    }

    // --- Screen-space ingestion ---

    /// Forward any host event. Returns whether the engine consumed it.
    pub fn handle_event(&mut self, event: impl Into<InputEvent>) -> bool {
        match event.into() {
            InputEvent::Pointer(PointerEvent::Down { position, button }) => {
                self.pointer_down(position, button)
            }
            InputEvent::Pointer(PointerEvent::Move { position }) => self.pointer_move(position),
            InputEvent::Pointer(PointerEvent::Up { position, button }) => {
                self.pointer_up(position, button)
            }
            InputEvent::Pointer(PointerEvent::Scroll { position, delta }) => {
                self.wheel(position, delta.y)
            }
            InputEvent::Key(key) => self.key_down(&key),
        }
    }

    pub fn pointer_down(&mut self, screen: Point, button: PointerButton) -> bool {
        if button == self.config.pan_button {
            self.pan_from = Some(screen);
            log::trace!("pan start at {:?}", screen);
            return true;
        }
        if button != PointerButton::Left {
            return false;
        }
        let world = self.viewport.to_world(screen);
        self.press(world)
    }

    pub fn pointer_move(&mut self, screen: Point) -> bool {
        if let Some(from) = self.pan_from {
            self.viewport.pan(screen - from);
            self.pan_from = Some(screen);
            return true;
        }
        let world = self.viewport.to_world(screen);
        self.drag(world)
    }

    pub fn pointer_up(&mut self, _screen: Point, button: PointerButton) -> bool {
        if button == self.config.pan_button && self.pan_from.take().is_some() {
            log::trace!("pan end, offset {:?}", self.viewport.offset());
            return true;
        }
        if button != PointerButton::Left {
            return false;
        }
        self.release()
    }

    /// Wheel zoom anchored at `screen`.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> bool {
        let zoomed = self.viewport.wheel(screen, delta_y);
        if zoomed {
            log::trace!("zoom to {:.3}", self.viewport.scale());
        }
        zoomed
    }

    /// Back to the identity view.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Apply a keyboard shortcut. Returns whether the key was recognized.
    pub fn key_down(&mut self, key: &KeyInput) -> bool {
        match key.command(self.state.tool) {
            Some(KeyCommand::SelectTool(tool)) => self.set_tool(tool),
            Some(KeyCommand::Undo) => {
                self.undo();
            }
            Some(KeyCommand::Redo) => {
                self.redo();
            }
            Some(KeyCommand::Cancel) => {
                self.cancel();
            }
            None => return false,
        }
        true
    }

    // --- World-space gesture steps ---

    /// Pointer pressed at a world position.
    pub fn press(&mut self, world: Point) -> bool {
        if !matches!(self.gesture, Gesture::Idle) {
            log::warn!("press ignored: {:?} gesture in progress", self.gesture());
            return false;
        }

        if let Some(kind) = self.state.tool.element_kind() {
            self.begin_drawing(kind, world);
            return true;
        }

        if let Some((original, handle)) = self.handle_under(world) {
            log::debug!("resize {} via {}", original.id(), handle.code());
            self.gesture = Gesture::Resizing { original, handle };
            return true;
        }

        let epsilon = self.config.line_hit_epsilon;
        match hit_test::pick(world, &self.elements, epsilon).cloned() {
            Some(hit) => {
                log::debug!("select {} ({})", hit.id(), hit.kind().name());
                self.state.selection = Some(hit.id.clone());
                self.state.tool_properties.mirror(&hit);
                self.gesture = Gesture::Moving {
                    original: hit,
                    anchor: world,
                };
            }
            None => {
                if self.state.selection.take().is_some() {
                    log::debug!("selection cleared");
                }
            }
        }
        true
    }

    fn begin_drawing(&mut self, kind: ElementKind, world: Point) {
        let id = shapes::generate_id();
        let element = shapes::create(id.clone(), world, world, kind, &self.state.tool_properties);
        log::debug!("draw {} {} at {:?}", kind.name(), id, world);
        self.elements.push(element);
        self.gesture = Gesture::Drawing { id };
    }

    /// Selected element and the handle under `world`, if any.
    fn handle_under(&self, world: Point) -> Option<(Element, HandleKind)> {
        let selected = self.selected_element()?;
        let tolerance = self.config.handle_tolerance / self.viewport.scale();
        let handle = selection::hit_test_handles(selected, world, tolerance)?;
        Some((selected.clone(), handle))
    }

    /// Pointer moved to a world position.
    pub fn drag(&mut self, world: Point) -> bool {
        match &self.gesture {
            Gesture::Idle => false,
            Gesture::Drawing { id } => {
                let Some(element) = self.elements.iter_mut().find(|e| e.id == *id) else {
                    return false;
                };
                if element.kind == ElementKind::Pencil {
                    element.points.push(world);
                } else {
                    element.set_extent_to(world);
                }
                log::trace!("drawing {} to {:?}", id, world);
                true
            }
            Gesture::Moving { original, anchor } => {
                // Always offset from the press snapshot so samples never accumulate error
                let moved = shapes::translate(original, world - *anchor);
                shapes::replace_in(&mut self.elements, original.id(), moved)
            }
            Gesture::Resizing { original, handle } => {
                let resized = selection::apply_resize(original, *handle, world);
                shapes::replace_in(&mut self.elements, original.id(), resized)
            }
        }
    }

    /// Pointer released. Completes the gesture and records history.
    pub fn release(&mut self) -> bool {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => false,
            Gesture::Drawing { id } => {
                let tolerance = self.config.pencil_simplify_tolerance;
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    *element = shapes::normalize(element);
                    if element.kind == ElementKind::Pencil && tolerance > 0.0 {
                        let before = element.points.len();
                        element.points = shapes::simplify_path(&element.points, tolerance);
                        log::trace!("pencil {}: {} -> {} points", id, before, element.points.len());
                    }
                }
                self.commit("draw");
                true
            }
            Gesture::Moving { .. } => {
                self.commit("move");
                true
            }
            Gesture::Resizing { original, .. } => {
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == original.id) {
                    *element = shapes::normalize(element);
                }
                self.commit("resize");
                true
            }
        }
    }

    /// Abort the active gesture. A drawn element is removed; a moved or
    /// resized one is restored. Style edits made during the gesture survive
    /// and are committed on their own.
    pub fn cancel(&mut self) -> bool {
        self.pan_from = None;
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => return false,
            Gesture::Drawing { id } => {
                shapes::remove_in(&mut self.elements, &id);
                log::debug!("cancelled drawing {}", id);
            }
            Gesture::Moving { original, .. } | Gesture::Resizing { original, .. } => {
                log::debug!("cancelled edit of {}", original.id());
                let id = original.id.clone();
                shapes::replace_in(&mut self.elements, &id, original);
            }
        }
        if self.elements.as_slice() != self.history.current() {
            self.commit("style edit");
        }
        true
    }

    fn commit(&mut self, reason: &str) {
        log::debug!("commit after {} ({} elements)", reason, self.elements.len());
        self.history.commit(self.elements.clone());
    }

    // --- Host entry points ---

    pub fn set_tool(&mut self, tool: Tool) {
        if self.state.tool != tool {
            log::debug!("tool {} -> {}", self.state.tool, tool);
            self.state.tool = tool;
        }
    }

    /// Change a palette property. When an element is selected the change
    /// also lands on it. Returns whether the selected element changed.
    ///
    /// Idle edits are committed at once. During a gesture the edit is also
    /// written into the press snapshot so later samples keep it, and the
    /// commit happens when the gesture ends.
    pub fn update_tool_property(&mut self, property: ToolProperty) -> bool {
        let property = property.clamped();
        self.state.tool_properties.apply(&property);

        let Some(id) = self.state.selection.clone() else {
            return false;
        };
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let before = element.clone();
        element.apply_property(&property);
        if *element == before {
            return false;
        }
        log::debug!("{} set on {}", property.key(), id);

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Moving { original, .. } | Gesture::Resizing { original, .. } => {
                if original.id == id {
                    original.apply_property(&property);
                }
                return true;
            }
            Gesture::Drawing { .. } => return true,
        }
        self.commit("style edit");
        true
    }

    /// String-keyed variant of [`update_tool_property`](Self::update_tool_property)
    /// for host property panels.
    pub fn set_tool_property(
        &mut self,
        key: &str,
        value: PropertyValue,
    ) -> Result<bool, PropertyError> {
        match ToolProperty::parse(key, value) {
            Ok(property) => Ok(self.update_tool_property(property)),
            Err(err) => {
                log::warn!("rejected property {}: {}", key, err);
                Err(err)
            }
        }
    }

    /// Replace the content of the selected text element.
    pub fn set_text(&mut self, content: &str) -> bool {
        let Some(id) = self.state.selection.as_deref() else {
            return false;
        };
        let Some(text) = self
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .and_then(|e| e.text.as_mut())
        else {
            return false;
        };
        if text.content == content {
            return false;
        }
        text.content = content.to_string();
        self.commit("text edit");
        true
    }

    pub fn undo(&mut self) -> bool {
        self.cancel();
        let restored = match self.history.undo() {
            Some(snapshot) => {
                self.elements = snapshot.to_vec();
                true
            }
            None => false,
        };
        if restored {
            self.reconcile_selection();
        }
        restored
    }

    pub fn redo(&mut self) -> bool {
        self.cancel();
        let restored = match self.history.redo() {
            Some(snapshot) => {
                self.elements = snapshot.to_vec();
                true
            }
            None => false,
        };
        if restored {
            self.reconcile_selection();
        }
        restored
    }

    fn reconcile_selection(&mut self) {
        let Some(id) = self.state.selection.as_deref() else {
            return;
        };
        if shapes::find(&self.elements, id).is_none() {
            log::debug!("selected {} no longer exists", id);
            self.state.selection = None;
        }
    }

    /// Remove every element as one undoable step.
    pub fn clear(&mut self) -> bool {
        self.cancel();
        if self.elements.is_empty() {
            return false;
        }
        self.elements.clear();
        self.state.selection = None;
        self.commit("clear");
        true
    }

    /// Cursor to show for a pointer hovering at `screen`.
    pub fn cursor_at(&self, screen: Point) -> CursorHint {
        match &self.gesture {
            Gesture::Drawing { .. } => return CursorHint::Crosshair,
            Gesture::Moving { .. } => return CursorHint::Move,
            Gesture::Resizing { handle, .. } => return selection::cursor_for(Some(*handle)),
            Gesture::Idle => {}
        }
        if self.state.tool != Tool::Selection {
            return CursorHint::Crosshair;
        }
        let world = self.viewport.to_world(screen);
        if let Some((_, handle)) = self.handle_under(world) {
            return selection::cursor_for(Some(handle));
        }
        match hit_test::pick(world, &self.elements, self.config.line_hit_epsilon) {
            Some(_) => selection::cursor_for(None),
            None => CursorHint::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::shapes::Rgba;
    use kurbo::Vec2;

    fn left_drag(ctl: &mut InteractionController, from: (f64, f64), to: &[(f64, f64)]) {
        ctl.pointer_down(Point::new(from.0, from.1), PointerButton::Left);
        for &(x, y) in to {
            ctl.pointer_move(Point::new(x, y));
        }
        let last = to.last().copied().unwrap_or(from);
        ctl.pointer_up(Point::new(last.0, last.1), PointerButton::Left);
    }

    fn draw(ctl: &mut InteractionController, tool: Tool, from: (f64, f64), to: (f64, f64)) {
        ctl.set_tool(tool);
        left_drag(ctl, from, &[to]);
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_drag_forward() {
        let mut ctl = InteractionController::new();
        ctl.set_tool(Tool::Rectangle);
        ctl.pointer_down(Point::new(10.0, 10.0), PointerButton::Left);
        assert_eq!(ctl.gesture(), GestureKind::Drawing);
        ctl.pointer_move(Point::new(50.0, 60.0));
        let live = &ctl.elements()[0];
        assert!(approx(live.width, 40.0) && approx(live.height, 50.0));

        ctl.pointer_up(Point::new(50.0, 60.0), PointerButton::Left);
        let el = &ctl.elements()[0];
        assert_eq!(el.position, Point::new(10.0, 10.0));
        assert!(approx(el.width, 40.0) && approx(el.height, 50.0));
        assert_eq!(ctl.history().depth(), 2);
        assert_eq!(ctl.gesture(), GestureKind::Idle);
    }

    #[test]
    fn test_drag_backward_normalizes() {
        let mut ctl = InteractionController::new();
        ctl.set_tool(Tool::Rectangle);
        ctl.pointer_down(Point::new(100.0, 100.0), PointerButton::Left);
        ctl.pointer_move(Point::new(0.0, 0.0));
        let live = &ctl.elements()[0];
        assert!(approx(live.width, -100.0) && approx(live.height, -100.0));

        ctl.pointer_up(Point::ZERO, PointerButton::Left);
        let el = &ctl.elements()[0];
        assert_eq!(el.position, Point::ZERO);
        assert!(approx(el.width, 100.0) && approx(el.height, 100.0));
    }

    #[test]
    fn test_box_like_drawings_end_normalized() {
        let mut ctl = InteractionController::new();
        let tools = [
            Tool::Rectangle,
            Tool::Circle,
            Tool::Text,
            Tool::Diamond,
            Tool::Database,
            Tool::Cloud,
        ];
        for (i, tool) in tools.into_iter().enumerate() {
            let y = i as f64 * 100.0;
            draw(&mut ctl, tool, (80.0, y + 90.0), (10.0, y));
        }
        assert_eq!(ctl.elements().len(), tools.len());
        for el in ctl.elements() {
            assert!(el.width >= 0.0 && el.height >= 0.0, "{}", el.kind().name());
        }
        assert_eq!(ctl.history().depth(), tools.len() + 1);
    }

    #[test]
    fn test_line_keeps_direction() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Arrow, (100.0, 100.0), (20.0, 40.0));
        let el = &ctl.elements()[0];
        assert_eq!(el.position, Point::new(100.0, 100.0));
        assert!(approx(el.width, -80.0) && approx(el.height, -60.0));
        assert_eq!(el.points, vec![Point::new(100.0, 100.0), Point::new(20.0, 40.0)]);
    }

    #[test]
    fn test_pencil_appends_points() {
        let mut ctl = InteractionController::new();
        ctl.set_tool(Tool::Pencil);
        left_drag(&mut ctl, (0.0, 0.0), &[(1.0, 1.0), (2.0, 3.0), (4.0, 2.0)]);
        let el = &ctl.elements()[0];
        assert_eq!(el.points.len(), 5);
        assert_eq!(el.points[4], Point::new(4.0, 2.0));
        assert!(approx(el.width, 0.0));
    }

    #[test]
    fn test_pencil_simplified_on_release() {
        let config = EngineConfig {
            pencil_simplify_tolerance: 0.5,
            ..EngineConfig::default()
        };
        let mut ctl = InteractionController::with_config(config);
        ctl.set_tool(Tool::Pencil);
        let samples: Vec<(f64, f64)> = (1..=20).map(|i| (i as f64, 0.0)).collect();
        left_drag(&mut ctl, (0.0, 0.0), &samples);
        let el = &ctl.elements()[0];
        assert_eq!(el.points, vec![Point::ZERO, Point::new(20.0, 0.0)]);
    }

    #[test]
    fn test_new_element_uses_palette() {
        let mut ctl = InteractionController::new();
        ctl.update_tool_property(ToolProperty::StrokeColor(Rgba::rgb(255, 0, 0)));
        ctl.update_tool_property(ToolProperty::StrokeWidth(6.0));
        draw(&mut ctl, Tool::Circle, (0.0, 0.0), (30.0, 30.0));
        let style = &ctl.elements()[0].style;
        assert_eq!(style.stroke_color, Rgba::rgb(255, 0, 0));
        assert!(approx(style.stroke_width, 6.0));
        // palette edits without a selection do not touch history
        assert_eq!(ctl.history().depth(), 2);
    }

    #[test]
    fn test_pick_last_inserted() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (100.0, 100.0));
        draw(&mut ctl, Tool::Rectangle, (50.0, 50.0), (150.0, 150.0));
        let top = ctl.elements()[1].id().to_string();
        ctl.set_tool(Tool::Selection);
        ctl.pointer_down(Point::new(60.0, 60.0), PointerButton::Left);
        assert_eq!(ctl.state().selection(), Some(top.as_str()));
        assert_eq!(ctl.gesture(), GestureKind::Moving);
    }

    #[test]
    fn test_select_mirrors_style() {
        let mut ctl = InteractionController::new();
        ctl.update_tool_property(ToolProperty::Opacity(40));
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.update_tool_property(ToolProperty::Opacity(90));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);
        assert_eq!(ctl.state().tool_properties().opacity, 40);
    }

    #[test]
    fn test_press_miss_clears_selection() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);
        assert!(ctl.state().selection().is_some());
        left_drag(&mut ctl, (500.0, 500.0), &[]);
        assert!(ctl.state().selection().is_none());
    }

    #[test]
    fn test_move_independent_of_sampling() {
        let mut one = InteractionController::new();
        draw(&mut one, Tool::Rectangle, (10.0, 10.0), (50.0, 50.0));
        let mut many = one.clone();

        one.set_tool(Tool::Selection);
        left_drag(&mut one, (30.0, 30.0), &[(30.0 + 73.3, 30.0 - 41.7)]);

        many.set_tool(Tool::Selection);
        let steps: Vec<(f64, f64)> = (1..=100)
            .map(|i| {
                let t = i as f64 / 100.0;
                (30.0 + 73.3 * t, 30.0 - 41.7 * t)
            })
            .collect();
        left_drag(&mut many, (30.0, 30.0), &steps);

        let a = one.elements()[0].position;
        let b = many.elements()[0].position;
        assert!(approx(a.x, b.x) && approx(a.y, b.y));
        assert!(approx(a.x, 83.3));
    }

    #[test]
    fn test_move_release_commits() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[(15.0, 25.0)]);
        assert_eq!(ctl.history().depth(), 3);
        let el = &ctl.elements()[0];
        assert_eq!(el.position, Point::new(10.0, 20.0));
        assert_eq!(el.points[1], Point::new(20.0, 30.0));
    }

    #[test]
    fn test_release_without_gesture_is_noop() {
        let mut ctl = InteractionController::new();
        assert!(!ctl.pointer_up(Point::ZERO, PointerButton::Left));
        assert_eq!(ctl.history().depth(), 1);
    }

    #[test]
    fn test_resize_from_handle() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (100.0, 100.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (50.0, 50.0), &[]);

        ctl.pointer_down(Point::new(101.0, 99.0), PointerButton::Left);
        assert_eq!(ctl.gesture(), GestureKind::Resizing);
        ctl.pointer_move(Point::new(-50.0, 40.0));
        ctl.pointer_up(Point::new(-50.0, 40.0), PointerButton::Left);

        let el = &ctl.elements()[0];
        assert_eq!(el.position, Point::new(-50.0, 0.0));
        assert!(approx(el.width, 50.0) && approx(el.height, 40.0));
        assert_eq!(ctl.history().depth(), 4);
    }

    #[test]
    fn test_resize_line_endpoint() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Line, (0.0, 0.0), (100.0, 0.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (50.0, 0.0), &[]);
        left_drag(&mut ctl, (100.0, 2.0), &[(100.0, 80.0)]);
        let el = &ctl.elements()[0];
        assert_eq!(el.points, vec![Point::ZERO, Point::new(100.0, 80.0)]);
    }

    #[test]
    fn test_decorative_shapes_selectable() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Diamond, (0.0, 0.0), (100.0, 100.0));
        draw(&mut ctl, Tool::Database, (200.0, 0.0), (300.0, 100.0));
        draw(&mut ctl, Tool::Cloud, (400.0, 0.0), (500.0, 100.0));
        ctl.set_tool(Tool::Selection);
        for x in [50.0, 250.0, 450.0] {
            left_drag(&mut ctl, (x, 50.0), &[]);
            let selected = ctl.selected_element().map(|e| e.position);
            assert_eq!(selected, Some(Point::new(x - 50.0, 0.0)));
        }
    }

    #[test]
    fn test_style_edit_commits_once_per_change() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);
        let depth = ctl.history().depth();

        for w in [3.0, 4.0, 5.0] {
            assert!(ctl.update_tool_property(ToolProperty::StrokeWidth(w)));
        }
        assert_eq!(ctl.history().depth(), depth + 3);
        assert!(approx(ctl.elements()[0].style.stroke_width, 5.0));

        // same value again changes nothing
        assert!(!ctl.update_tool_property(ToolProperty::StrokeWidth(5.0)));
        assert_eq!(ctl.history().depth(), depth + 3);
    }

    #[test]
    fn test_style_edit_during_move_survives() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        ctl.pointer_down(Point::new(5.0, 5.0), PointerButton::Left);
        ctl.pointer_move(Point::new(15.0, 5.0));
        let depth = ctl.history().depth();

        assert!(ctl.update_tool_property(ToolProperty::StrokeWidth(9.0)));
        // deferred until release
        assert_eq!(ctl.history().depth(), depth);
        ctl.pointer_move(Point::new(25.0, 5.0));
        ctl.pointer_up(Point::new(25.0, 5.0), PointerButton::Left);

        let el = &ctl.elements()[0];
        assert!(approx(el.style.stroke_width, 9.0));
        assert_eq!(el.position, Point::new(20.0, 0.0));
        assert_eq!(ctl.history().depth(), depth + 1);
        assert_eq!(ctl.history().current(), ctl.elements());
        assert!(approx(ctl.state().tool_properties().stroke_width, 9.0));
    }

    #[test]
    fn test_style_edit_during_cancelled_resize_is_kept() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (100.0, 100.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (50.0, 50.0), &[]);
        let depth = ctl.history().depth();

        ctl.pointer_down(Point::new(100.0, 100.0), PointerButton::Left);
        assert_eq!(ctl.gesture(), GestureKind::Resizing);
        ctl.pointer_move(Point::new(150.0, 150.0));
        ctl.update_tool_property(ToolProperty::Opacity(50));
        ctl.pointer_move(Point::new(160.0, 160.0));
        assert_eq!(ctl.elements()[0].style.opacity, 50);
        assert!(ctl.cancel());

        let el = &ctl.elements()[0];
        assert!(approx(el.width, 100.0));
        assert_eq!(el.style.opacity, 50);
        assert_eq!(ctl.history().depth(), depth + 1);
        assert_eq!(ctl.history().current(), ctl.elements());
    }

    #[test]
    fn test_style_edit_is_clamped() {
        let mut ctl = InteractionController::new();
        ctl.update_tool_property(ToolProperty::StrokeWidth(99.0));
        ctl.update_tool_property(ToolProperty::Opacity(1));
        let props = ctl.state().tool_properties();
        assert!(approx(props.stroke_width, 20.0));
        assert_eq!(props.opacity, 10);
    }

    #[test]
    fn test_font_edit_only_reaches_text() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);
        let depth = ctl.history().depth();
        assert!(!ctl.update_tool_property(ToolProperty::FontSize(40.0)));
        assert_eq!(ctl.history().depth(), depth);
        assert!(approx(ctl.state().tool_properties().font_size, 40.0));
    }

    #[test]
    fn test_set_tool_property_bridge() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Text, (0.0, 0.0), (100.0, 30.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);

        let committed = ctl.set_tool_property("fontFamily", PropertyValue::Text("Inter".into()));
        assert_eq!(committed, Ok(true));
        let text = ctl.elements()[0].text.as_ref().map(|t| t.font_family.as_str());
        assert_eq!(text, Some("Inter"));

        let err = ctl.set_tool_property("strokeColor", PropertyValue::Text("nope".into()));
        assert!(matches!(err, Err(PropertyError::Color(_))));
    }

    #[test]
    fn test_set_text() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Text, (0.0, 0.0), (100.0, 30.0));
        assert!(!ctl.set_text("nothing selected"));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);
        assert!(ctl.set_text("hello"));
        assert!(!ctl.set_text("hello"));
        let content = ctl.elements()[0].text.as_ref().map(|t| t.content.clone());
        assert_eq!(content.as_deref(), Some("hello"));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        draw(&mut ctl, Tool::Circle, (20.0, 20.0), (40.0, 40.0));
        let before = ctl.elements().to_vec();

        assert!(ctl.undo());
        assert_eq!(ctl.elements().len(), 1);
        assert!(ctl.redo());
        assert_eq!(ctl.elements(), before.as_slice());
        assert!(!ctl.redo());
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut ctl = InteractionController::new();
        assert!(!ctl.undo());
        assert!(ctl.elements().is_empty());
    }

    #[test]
    fn test_commit_after_undo_drops_redo() {
        let mut ctl = InteractionController::new();
        for i in 0..3 {
            let x = i as f64 * 20.0;
            draw(&mut ctl, Tool::Rectangle, (x, 0.0), (x + 10.0, 10.0));
        }
        assert_eq!(ctl.history().depth(), 4);
        ctl.undo();
        ctl.undo();
        draw(&mut ctl, Tool::Line, (0.0, 50.0), (10.0, 60.0));
        assert_eq!(ctl.history().depth(), 3);
        assert!(!ctl.history().can_redo());
    }

    #[test]
    fn test_undo_clears_stale_selection() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        left_drag(&mut ctl, (5.0, 5.0), &[]);
        ctl.undo();
        assert!(ctl.state().selection().is_some());
        ctl.undo();
        assert!(ctl.elements().is_empty());
        assert!(ctl.state().selection().is_none());
    }

    #[test]
    fn test_undo_mid_gesture_cancels_first() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.pointer_down(Point::new(50.0, 50.0), PointerButton::Left);
        ctl.pointer_move(Point::new(80.0, 80.0));
        assert_eq!(ctl.elements().len(), 2);
        assert!(ctl.undo());
        assert!(ctl.elements().is_empty());
        assert_eq!(ctl.gesture(), GestureKind::Idle);
    }

    #[test]
    fn test_escape_cancels_move() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        ctl.set_tool(Tool::Selection);
        ctl.pointer_down(Point::new(5.0, 5.0), PointerButton::Left);
        ctl.pointer_move(Point::new(105.0, 5.0));
        assert!(ctl.key_down(&KeyInput::new("Escape")));
        assert_eq!(ctl.elements()[0].position, Point::ZERO);
        assert_eq!(ctl.history().depth(), 2);
        assert!(!ctl.pointer_up(Point::new(105.0, 5.0), PointerButton::Left));
    }

    #[test]
    fn test_escape_cancels_drawing() {
        let mut ctl = InteractionController::new();
        ctl.set_tool(Tool::Circle);
        ctl.pointer_down(Point::new(5.0, 5.0), PointerButton::Left);
        ctl.pointer_move(Point::new(30.0, 30.0));
        ctl.cancel();
        assert!(ctl.elements().is_empty());
        assert_eq!(ctl.history().depth(), 1);
    }

    #[test]
    fn test_keyboard_tools() {
        let mut ctl = InteractionController::new();
        assert!(ctl.key_down(&KeyInput::new("4")));
        assert_eq!(ctl.state().tool(), Tool::Line);
        ctl.key_down(&KeyInput::new("ArrowRight"));
        assert_eq!(ctl.state().tool(), Tool::Arrow);
        ctl.key_down(&KeyInput::new("1"));
        ctl.key_down(&KeyInput::new("ArrowLeft"));
        assert_eq!(ctl.state().tool(), Tool::Pencil);
        assert!(!ctl.key_down(&KeyInput::new("2").in_text_field()));
        assert_eq!(ctl.state().tool(), Tool::Pencil);
        assert!(!ctl.key_down(&KeyInput::new("q")));
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        ctl.key_down(&KeyInput::new("z").with_modifiers(ctrl));
        assert!(ctl.elements().is_empty());
        ctl.key_down(&KeyInput::new("y").with_modifiers(ctrl));
        assert_eq!(ctl.elements().len(), 1);
    }

    #[test]
    fn test_wheel_zoom_anchor() {
        let mut ctl = InteractionController::new();
        let pointer = Point::new(100.0, 100.0);
        let before = ctl.viewport().to_world(pointer);
        assert!(ctl.handle_event(PointerEvent::Scroll {
            position: pointer,
            delta: Vec2::new(0.0, -100.0),
        }));
        assert!(approx(ctl.viewport().scale(), 1.05));
        let after = ctl.viewport().to_world(pointer);
        assert!(approx(before.x, after.x) && approx(before.y, after.y));
    }

    #[test]
    fn test_middle_button_pans() {
        let mut ctl = InteractionController::new();
        ctl.wheel(Point::ZERO, -1.0);
        ctl.pointer_down(Point::new(10.0, 10.0), PointerButton::Middle);
        ctl.pointer_move(Point::new(30.0, 15.0));
        ctl.pointer_move(Point::new(40.0, 25.0));
        ctl.pointer_up(Point::new(40.0, 25.0), PointerButton::Middle);
        assert_eq!(ctl.viewport().offset(), Vec2::new(30.0, 15.0));
        assert!(ctl.elements().is_empty());
        assert_eq!(ctl.gesture(), GestureKind::Idle);

        ctl.reset_view();
        assert_eq!(ctl.viewport().offset(), Vec2::ZERO);
        assert!(approx(ctl.viewport().scale(), 1.0));
    }

    #[test]
    fn test_left_pan_button_falls_back() {
        let config = EngineConfig {
            pan_button: PointerButton::Left,
            ..EngineConfig::default()
        };
        let mut ctl = InteractionController::with_config(config);
        assert_eq!(ctl.config().pan_button, PointerButton::Middle);
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        assert_eq!(ctl.elements().len(), 1);
    }

    #[test]
    fn test_drawing_uses_world_coordinates() {
        let config = EngineConfig {
            zoom_step: 2.0,
            ..EngineConfig::default()
        };
        let mut ctl = InteractionController::with_config(config);
        ctl.wheel(Point::ZERO, -1.0);
        ctl.pointer_down(Point::ZERO, PointerButton::Middle);
        ctl.pointer_move(Point::new(100.0, 0.0));
        ctl.pointer_up(Point::new(100.0, 0.0), PointerButton::Middle);
        draw(&mut ctl, Tool::Rectangle, (100.0, 0.0), (300.0, 100.0));
        let el = &ctl.elements()[0];
        assert_eq!(el.position, Point::ZERO);
        assert!(approx(el.width, 100.0) && approx(el.height, 50.0));
    }

    #[test]
    fn test_right_button_ignored() {
        let mut ctl = InteractionController::new();
        ctl.set_tool(Tool::Rectangle);
        assert!(!ctl.pointer_down(Point::ZERO, PointerButton::Right));
        assert!(ctl.elements().is_empty());
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut ctl = InteractionController::new();
        assert!(!ctl.clear());
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
        assert!(ctl.clear());
        assert!(ctl.elements().is_empty());
        ctl.undo();
        assert_eq!(ctl.elements().len(), 1);
    }

    #[test]
    fn test_cursor_hints() {
        let mut ctl = InteractionController::new();
        draw(&mut ctl, Tool::Rectangle, (0.0, 0.0), (100.0, 100.0));
        assert_eq!(ctl.cursor_at(Point::new(500.0, 500.0)), CursorHint::Crosshair);

        ctl.set_tool(Tool::Selection);
        assert_eq!(ctl.cursor_at(Point::new(50.0, 50.0)), CursorHint::Move);
        assert_eq!(ctl.cursor_at(Point::new(500.0, 500.0)), CursorHint::Default);

        left_drag(&mut ctl, (50.0, 50.0), &[]);
        assert_eq!(ctl.cursor_at(Point::new(100.0, 0.0)), CursorHint::NeswResize);
        assert_eq!(ctl.cursor_at(Point::new(50.0, 100.0)), CursorHint::NsResize);
    }
}
