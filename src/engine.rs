//! Interaction state machine and the board that owns it.
//!
//! [`BoardCore`] holds every piece of board state and turns raw pointer,
//! wheel and keyboard input into shape, selection and view changes. It has no
//! drawing context, so it can be driven entirely from tests. [`Board`] wraps
//! a core together with a 2D context and the host's status and viewport
//! capabilities, and adds the per-frame [`Board::tick`] and
//! [`Board::teardown`] lifecycle.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info};

use crate::camera::{Camera, Point};
use crate::config::BoardConfig;
use crate::doc::{Circle, DocStore, Dot, Line, ShapeId};
use crate::host::{Action, Cursor, StatusCache, StatusKey, StatusSink, ViewportSize};
use crate::input::{Button, Modifiers, MouseMode, MouseState, WheelDelta, ZoomDirection};
use crate::keyboard::{KeyBinding, KeyEdge, KeyTracker, KeyTransition};
use crate::render::{self, Canvas2d, RenderError, Scene};
use crate::selection::{Marquee, Selection, SelectionEngine, SelectionSnapshot};
use crate::surface::{Surface, SurfaceError};

/// Core board state, independent of any drawing context.
pub struct BoardCore {
    config: BoardConfig,
    doc: DocStore,
    camera: Camera,
    selection: SelectionEngine,
    keys: KeyTracker,
    mouse: MouseState,
    mode: MouseMode,
    /// Mode to restore when the pan key is released.
    saved_mode: Option<MouseMode>,
    preview: Option<Point>,
    cursor: Cursor,
    stage_width: f64,
    stage_height: f64,
}

impl Default for BoardCore {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl BoardCore {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let config = config.validated();
        let mut keys = KeyTracker::new();
        keys.watch(&config.pan_key, KeyBinding::PanMode);
        Self {
            camera: Camera { grid_gap: config.grid_gap, ..Camera::default() },
            config,
            doc: DocStore::new(),
            selection: SelectionEngine::new(),
            keys,
            mouse: MouseState::default(),
            mode: MouseMode::default(),
            saved_mode: None,
            preview: None,
            cursor: Cursor::Default,
            stage_width: 0.0,
            stage_height: 0.0,
        }
    }

    // --- Shape mutators ---

    /// Add a dot at real coordinates. The position is not snapped.
    pub fn add_dot(&mut self, x: f64, y: f64, radius: f64, color: &str) -> ShapeId {
        let id = self.doc.add_dot(x, y, radius, color);
        debug!(id, x, y, "dot added");
        id
    }

    /// Add a circle at real coordinates with a radius in grid units.
    pub fn add_circle(&mut self, x: f64, y: f64, radius: f64) -> ShapeId {
        let id = self.doc.add_circle(x, y, radius);
        debug!(id, x, y, radius, "circle added");
        id
    }

    /// Connect consecutive dots into a path. Fewer than two dots is a no-op.
    pub fn connect(&mut self, dots: &[ShapeId]) -> Vec<Line> {
        let lines = self.doc.connect(dots);
        debug!(count = lines.len(), "lines added");
        lines
    }

    /// Remove dots, their lines, and any selection entries referring to them.
    pub fn remove_dots(&mut self, ids: &[ShapeId]) {
        let cascaded = self.doc.remove_dots(ids);
        self.selection.forget_dots(ids);
        debug!(dots = ids.len(), lines = cascaded.len(), "dots removed");
    }

    pub fn remove_lines(&mut self, lines: &[Line]) {
        self.doc.remove_lines(lines);
        self.selection.forget_lines(lines);
        debug!(count = lines.len(), "lines removed");
    }

    pub fn remove_circles(&mut self, ids: &[ShapeId]) {
        self.doc.remove_circles(ids);
        self.selection.forget_circles(ids);
        debug!(count = ids.len(), "circles removed");
    }

    /// Empty the selection, notifying listeners if it was not already empty.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.selection.clear() {
            return vec![self.selection_changed()];
        }
        Vec::new()
    }

    // --- View properties ---

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    /// Set zoom directly, clamped to the floor. The pan is not adjusted.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.camera.zoom = zoom.max(self.config.min_zoom);
        }
    }

    #[must_use]
    pub fn mouse_mode(&self) -> MouseMode {
        self.mode
    }

    /// Force the mouse mode. Leaving draw mode hides the preview dot.
    pub fn set_mouse_mode(&mut self, mode: MouseMode) {
        if mode != MouseMode::Draw {
            self.preview = None;
        }
        debug!(from = %self.mode, to = %mode, "mouse mode set");
        self.mode = mode;
    }

    #[must_use]
    pub fn grid_gap(&self) -> f64 {
        self.camera.grid_gap
    }

    /// Set the grid gap, clamped to the configured floor.
    pub fn set_grid_gap(&mut self, gap: f64) {
        if gap.is_finite() {
            self.camera.grid_gap = gap.max(self.config.min_grid_gap);
        }
    }

    /// Record the stage size in CSS pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.stage_width = width;
        self.stage_height = height;
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn doc(&self) -> &DocStore {
        &self.doc
    }

    pub fn dots(&self) -> impl Iterator<Item = &Dot> {
        self.doc.dots()
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        self.doc.lines()
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.doc.circles()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    #[must_use]
    pub fn marquee(&self) -> Option<Marquee> {
        self.selection.marquee()
    }

    /// Grid-snapped position the next draw-mode click would place a dot at.
    #[must_use]
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    #[must_use]
    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn is_key_down(&self, key: &str) -> bool {
        self.keys.is_down(key)
    }

    #[must_use]
    pub fn stage_size(&self) -> (f64, f64) {
        (self.stage_width, self.stage_height)
    }

    /// Status line texts for zoom, pan and mode.
    #[must_use]
    pub fn status(&self) -> [(StatusKey, String); 3] {
        [
            (StatusKey::Zoom, format!("Zoom: {:.0}%", self.camera.zoom * 100.0)),
            (StatusKey::Pan, format!("Pan: {:.0}px, {:.0}px", self.camera.pan_x, self.camera.pan_y)),
            (StatusKey::Mode, format!("Mode: {}", self.mode)),
        ]
    }

    /// Read-only view of everything needed to draw a frame.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            doc: &self.doc,
            camera: &self.camera,
            selection: self.selection.selection(),
            marquee: self.selection.marquee(),
            preview: self.preview,
            mode: self.mode,
            config: &self.config,
            stage_width: self.stage_width,
            stage_height: self.stage_height,
        }
    }

    // --- Pointer input ---

    /// Primary pointer pressed at `screen`.
    ///
    /// Draw mode commits a snapped dot, select mode opens a marquee, move mode
    /// starts a pan drag.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary {
            return actions;
        }
        self.mouse = MouseState { screen, is_down: true };
        let real = self.camera.screen_to_real(screen);
        match self.mode {
            MouseMode::Draw => {
                let at = self.camera.snap(real);
                let (radius, color) = (self.config.dot_radius, self.config.dot_color.clone());
                self.add_dot(at.x, at.y, radius, &color);
            }
            MouseMode::Select => self.selection.begin(real),
            MouseMode::Move => self.set_cursor(Cursor::Grabbing, &mut actions),
        }
        actions
    }

    /// Pointer moved to `screen`; `movement` is the raw device delta since the last event.
    pub fn on_pointer_move(&mut self, screen: Point, movement: Point, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        self.mouse.screen = screen;
        if self.mouse.is_down && self.mode == MouseMode::Move {
            self.camera.pan_by_movement(movement.x, movement.y);
        }

        let real = self.camera.screen_to_real(screen);
        match self.mode {
            MouseMode::Draw => {
                self.set_cursor(Cursor::Default, &mut actions);
                self.preview = Some(self.camera.snap(real));
            }
            MouseMode::Select => self.selection.drag_to(real),
            MouseMode::Move => {}
        }
        actions
    }

    /// Primary pointer released. In select mode this commits the marquee.
    ///
    /// The selection is additive if the configured additive key is held,
    /// either as reported by the event's modifier flags or as tracked from
    /// keyboard events.
    pub fn on_pointer_up(&mut self, _screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary {
            return actions;
        }
        self.mouse.is_down = false;
        match self.mode {
            MouseMode::Move => {
                self.set_cursor(Cursor::Grab, &mut actions);
                self.selection.cancel();
            }
            MouseMode::Select => {
                let key = &self.config.additive_key;
                let additive = modifiers.holds(key) || self.keys.is_down(key);
                if let Some(selection) = self.selection.commit(&self.doc, &self.camera, additive) {
                    debug!(
                        additive,
                        dots = selection.dots.len(),
                        lines = selection.lines.len(),
                        circles = selection.circles.len(),
                        "selection committed"
                    );
                    actions.push(self.selection_changed());
                }
            }
            MouseMode::Draw => self.selection.cancel(),
        }
        actions
    }

    /// One wheel step zooms by the configured step, pivoting on the pointer.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        self.mouse.screen = screen;
        let step = ZoomDirection::from_wheel(delta).signed(self.config.zoom_step);
        self.camera.zoom_around(screen, step, self.config.min_zoom);
        Vec::new()
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        let transition = self.keys.press(key);
        self.apply_key_transition(transition)
    }

    pub fn on_key_up(&mut self, key: &str) -> Vec<Action> {
        let transition = self.keys.release(key);
        self.apply_key_transition(transition)
    }

    /// The host lost keyboard focus; treat every held key as released.
    pub fn on_blur(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        for transition in self.keys.release_all() {
            actions.extend(self.apply_key_transition(Some(transition)));
        }
        actions
    }

    fn apply_key_transition(&mut self, transition: Option<KeyTransition>) -> Vec<Action> {
        match transition {
            Some(KeyTransition { binding: KeyBinding::PanMode, edge: KeyEdge::Down }) => self.begin_pan_hold(),
            Some(KeyTransition { binding: KeyBinding::PanMode, edge: KeyEdge::Up }) => self.end_pan_hold(),
            None => Vec::new(),
        }
    }

    /// Enter move mode, remembering the mode to restore.
    ///
    /// Only the first call before [`Self::end_pan_hold`] records the mode, so
    /// repeated presses restore the original one.
    pub fn begin_pan_hold(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.saved_mode.is_none() {
            self.saved_mode = Some(self.mode);
        }
        self.preview = None;
        self.mode = MouseMode::Move;
        let cursor = if self.mouse.is_down { Cursor::Grabbing } else { Cursor::Grab };
        self.set_cursor(cursor, &mut actions);
        debug!(saved = ?self.saved_mode, "pan hold started");
        actions
    }

    /// Leave move mode and restore the mode saved by [`Self::begin_pan_hold`].
    pub fn end_pan_hold(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(mode) = self.saved_mode.take() {
            self.mode = mode;
        }
        self.set_cursor(Cursor::Default, &mut actions);
        debug!(mode = %self.mode, "pan hold ended");
        actions
    }

    // --- Helpers ---

    fn set_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    fn selection_changed(&self) -> Action {
        Action::SelectionChanged(SelectionSnapshot::resolve(self.selection.selection(), &self.doc))
    }
}

/// A board bound to a drawing context and the host's status and viewport capabilities.
pub struct Board<C> {
    pub core: BoardCore,
    ctx: C,
    status: Box<dyn StatusSink>,
    status_cache: StatusCache,
    viewport: Box<dyn ViewportSize>,
    torn_down: bool,
}

impl<C: Canvas2d> Board<C> {
    /// Create a board drawing on `surface`, sized from `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface cannot produce a 2D context.
    pub fn new<S>(
        surface: &S,
        config: BoardConfig,
        status: Box<dyn StatusSink>,
        viewport: Box<dyn ViewportSize>,
    ) -> Result<Self, SurfaceError>
    where
        S: Surface<Context = C>,
    {
        let ctx = surface.context_2d()?;
        let mut board = Self {
            core: BoardCore::new(config),
            ctx,
            status,
            status_cache: StatusCache::default(),
            viewport,
            torn_down: false,
        };
        board.resize();
        let (width, height) = board.core.stage_size();
        info!(width, height, "board created");
        Ok(board)
    }

    /// Re-read the viewport size.
    pub fn resize(&mut self) {
        let (width, height) = self.viewport.viewport_size();
        self.core.resize(width, height);
    }

    /// Per-frame update: refresh status text and redraw. No-op after teardown.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a drawing call fails.
    pub fn tick(&mut self) -> Result<(), RenderError> {
        if self.torn_down {
            return Ok(());
        }
        for (key, text) in self.core.status() {
            self.status_cache.push(self.status.as_mut(), key, text);
        }
        render::draw(&mut self.ctx, &self.core.scene())
    }

    /// Stop reacting to input and drawing. Returns `false` if already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        info!("board torn down");
        true
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_pointer_down(screen, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen: Point, movement: Point, modifiers: Modifiers) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_pointer_move(screen, movement, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_pointer_up(screen, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_wheel(screen, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_key_down(key)
    }

    pub fn on_key_up(&mut self, key: &str) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_key_up(key)
    }

    pub fn on_blur(&mut self) -> Vec<Action> {
        if self.torn_down {
            return Vec::new();
        }
        self.core.on_blur()
    }
}
