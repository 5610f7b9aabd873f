//! Browser binding.
//!
//! Implements [`Surface`] for `<canvas>` elements and [`Canvas2d`] for the
//! browser's 2D context, provides DOM-backed host capabilities, and wires a
//! board to DOM events and a `requestAnimationFrame` loop through [`attach`].
//! Everything registered here is released by [`Attachment::detach`].

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use js_sys::Date;
use tracing::{info, trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use crate::camera::Point;
use crate::config::BoardConfig;
use crate::engine::Board;
use crate::host::{Action, Cursor, CursorSink, Hooks, SelectionListeners, StatusKey, StatusSink, ViewportSize};
use crate::input::{Button, Modifiers, WheelDelta};
use crate::render::{Canvas2d, RenderError};
use crate::surface::{Surface, SurfaceError};

/// Board type driven by [`attach`].
pub type WebBoard = Board<CanvasRenderingContext2d>;

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn canvas_err(err: &JsValue) -> RenderError {
    RenderError::Canvas(describe(err))
}

// =============================================================
// Surface and context
// =============================================================

impl Surface for HtmlCanvasElement {
    type Context = CanvasRenderingContext2d;

    fn context_2d(&self) -> Result<CanvasRenderingContext2d, SurfaceError> {
        let ctx = self
            .get_context("2d")
            .map_err(|err| SurfaceError::Platform(describe(&err)))?
            .ok_or(SurfaceError::NoContext)?;
        ctx.dyn_into::<CanvasRenderingContext2d>().map_err(|_| SurfaceError::NoContext)
    }
}

impl Canvas2d for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::scale(self, x, y).map_err(|err| canvas_err(&err))
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: &str) {
        CanvasRenderingContext2d::set_text_align(self, align);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::rect(self, x, y, w, h);
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), RenderError> {
        self.arc(x, y, radius, 0.0, TAU).map_err(|err| canvas_err(&err))
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::fill_text(self, text, x, y).map_err(|err| canvas_err(&err))
    }
}

// =============================================================
// DOM host capabilities
// =============================================================

/// Writes status text into every element carrying `data-board-<key>`.
pub struct DomStatus {
    document: Document,
}

impl DomStatus {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl StatusSink for DomStatus {
    /// Elements are looked up on every call, so ones mounted after the
    /// board still get filled in.
    fn set_status(&mut self, key: StatusKey, text: &str) -> bool {
        let selector = format!("[data-board-{}]", key.as_str());
        let nodes = match self.document.query_selector_all(&selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!(error = %describe(&err), %selector, "status lookup failed");
                return false;
            }
        };
        let mut written = false;
        for i in 0..nodes.length() {
            if let Some(node) = nodes.item(i) {
                node.set_text_content(Some(text));
                written = true;
            }
        }
        written
    }
}

/// Sets `document.body.style.cursor`.
pub struct DomCursor {
    body: Option<HtmlElement>,
}

impl DomCursor {
    #[must_use]
    pub fn new(document: &Document) -> Self {
        Self { body: document.body() }
    }
}

impl CursorSink for DomCursor {
    fn set_cursor(&mut self, cursor: Cursor) {
        let Some(body) = self.body.as_ref() else {
            return;
        };
        if let Err(err) = body.style().set_property("cursor", cursor.as_css()) {
            warn!(error = %describe(&err), "cursor update failed");
        }
    }
}

/// Reads `innerWidth` / `innerHeight` from the window.
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ViewportSize for WindowViewport {
    fn viewport_size(&self) -> (f64, f64) {
        let read = |value: Result<JsValue, JsValue>| match value {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(err) => {
                warn!(error = %describe(&err), "viewport size unavailable");
                0.0
            }
        };
        (read(self.window.inner_width()), read(self.window.inner_height()))
    }
}

// =============================================================
// Event plumbing
// =============================================================

struct Registration {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Registration {
    fn add(target: &EventTarget, event: &'static str, passive: bool, callback: Closure<dyn FnMut(Event)>) -> Result<Self, SurfaceError> {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| SurfaceError::Platform(describe(&err)))?;
        Ok(Self { target: target.clone(), event, callback })
    }

    fn remove(&self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!(error = %describe(&err), event = self.event, "listener removal failed");
        }
    }
}

/// Self-rescheduling `requestAnimationFrame` loop.
struct FrameLoop {
    window: Window,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(window: &Window, board: &Rc<RefCell<WebBoard>>) -> Result<Self, SurfaceError> {
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::default();
        let pending: Rc<Cell<Option<i32>>> = Rc::default();

        let cb_slot = Rc::clone(&callback);
        let cb_pending = Rc::clone(&pending);
        let cb_board = Rc::clone(board);
        let cb_window = window.clone();
        let frame = Closure::wrap(Box::new(move |_ts: f64| {
            cb_pending.set(None);
            let started_ms = Date::now();
            if let Err(err) = cb_board.borrow_mut().tick() {
                warn!(%err, "frame draw failed");
            }
            trace!(elapsed_ms = (Date::now() - started_ms).max(0.0), "frame");
            if let Some(cb) = cb_slot.borrow().as_ref() {
                match cb_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => cb_pending.set(Some(id)),
                    Err(err) => warn!(error = %describe(&err), "frame scheduling failed"),
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window
            .request_animation_frame(frame.as_ref().unchecked_ref())
            .map_err(|err| SurfaceError::Platform(describe(&err)))?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(frame);
        Ok(Self { window: window.clone(), callback, pending })
    }

    fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                warn!(error = %describe(&err), "frame cancel failed");
            }
        }
        // Dropping the closure also breaks its reference cycle with the slot.
        self.callback.borrow_mut().take();
    }
}

fn pointer_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(f64::from(event.client_x()) - rect.left(), f64::from(event.client_y()) - rect.top())
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers { shift: event.shift_key(), ctrl: event.ctrl_key(), alt: event.alt_key(), meta: event.meta_key() }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit_canvas(canvas: &HtmlCanvasElement, board: &WebBoard) {
    let (width, height) = board.core.stage_size();
    canvas.set_width(width.max(0.0).round() as u32);
    canvas.set_height(height.max(0.0).round() as u32);
}

// =============================================================
// Attachment
// =============================================================

/// A board bound to a canvas, its DOM listeners and its frame loop.
pub struct Attachment {
    board: Rc<RefCell<WebBoard>>,
    listeners: Vec<Registration>,
    frame: FrameLoop,
    detached: bool,
}

impl Attachment {
    /// Shared handle to the board, for mutators and view properties.
    #[must_use]
    pub fn board(&self) -> Rc<RefCell<WebBoard>> {
        Rc::clone(&self.board)
    }

    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Remove every listener, cancel the frame loop and tear the board down.
    ///
    /// Returns `false` if already detached.
    pub fn detach(&mut self) -> bool {
        if self.detached {
            return false;
        }
        self.detached = true;
        for registration in self.listeners.drain(..) {
            registration.remove();
        }
        self.frame.stop();
        self.board.borrow_mut().teardown();
        info!("board detached");
        true
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Bind a board to `canvas`.
///
/// Registers pointer and wheel listeners on the canvas, key, blur and resize
/// listeners on the window, and starts the frame loop. Cursor changes go to
/// the document body; selection changes go to `listeners`.
///
/// # Errors
///
/// Returns [`SurfaceError::NoContext`] if the canvas has no 2D context, or
/// [`SurfaceError::Platform`] if there is no window or a registration fails.
/// Anything registered before the failure is released again.
pub fn attach(
    canvas: HtmlCanvasElement,
    config: BoardConfig,
    listeners: SelectionListeners,
) -> Result<Attachment, SurfaceError> {
    let window = web_sys::window().ok_or_else(|| SurfaceError::Platform("no window".to_owned()))?;
    let document = window.document().ok_or_else(|| SurfaceError::Platform("no document".to_owned()))?;

    let hooks = Hooks { cursor: Box::new(DomCursor::new(&document)), selection: listeners };
    let board = Board::new(
        &canvas,
        config,
        Box::new(DomStatus::new(document)),
        Box::new(WindowViewport::new(window.clone())),
    )?;
    fit_canvas(&canvas, &board);
    let board = Rc::new(RefCell::new(board));
    let hooks = Rc::new(RefCell::new(hooks));

    let mut registrations = Vec::new();
    if let Err(err) = register_listeners(&canvas, &window, &board, &hooks, &mut registrations) {
        for registration in &registrations {
            registration.remove();
        }
        return Err(err);
    }
    let frame = match FrameLoop::start(&window, &board) {
        Ok(frame) => frame,
        Err(err) => {
            for registration in &registrations {
                registration.remove();
            }
            return Err(err);
        }
    };

    info!("board attached");
    Ok(Attachment { board, listeners: registrations, frame, detached: false })
}

fn register_listeners(
    canvas: &HtmlCanvasElement,
    window: &Window,
    board: &Rc<RefCell<WebBoard>>,
    hooks: &Rc<RefCell<Hooks>>,
    out: &mut Vec<Registration>,
) -> Result<(), SurfaceError> {
    let canvas_target: &EventTarget = canvas.as_ref();
    let window_target: &EventTarget = window.as_ref();

    // Each handler releases the board borrow before dispatching, so hooks may
    // call back into the board.
    let handler = |f: Box<dyn Fn(&mut WebBoard, &Event) -> Vec<Action>>| {
        let board = Rc::clone(board);
        let hooks = Rc::clone(hooks);
        Closure::wrap(Box::new(move |event: Event| {
            let actions = f(&mut board.borrow_mut(), &event);
            if !actions.is_empty() {
                hooks.borrow_mut().dispatch(actions);
            }
        }) as Box<dyn FnMut(Event)>)
    };

    let c = canvas.clone();
    out.push(Registration::add(
        canvas_target,
        "pointerdown",
        true,
        handler(Box::new(move |board: &mut WebBoard, event: &Event| {
            let Some(ev) = event.dyn_ref::<MouseEvent>() else {
                return Vec::new();
            };
            board.on_pointer_down(pointer_position(&c, ev), Button::from_dom(ev.button()), modifiers(ev))
        })),
    )?);

    let c = canvas.clone();
    out.push(Registration::add(
        canvas_target,
        "pointermove",
        true,
        handler(Box::new(move |board: &mut WebBoard, event: &Event| {
            let Some(ev) = event.dyn_ref::<MouseEvent>() else {
                return Vec::new();
            };
            let movement = Point::new(f64::from(ev.movement_x()), f64::from(ev.movement_y()));
            board.on_pointer_move(pointer_position(&c, ev), movement, modifiers(ev))
        })),
    )?);

    let c = canvas.clone();
    out.push(Registration::add(
        canvas_target,
        "pointerup",
        true,
        handler(Box::new(move |board: &mut WebBoard, event: &Event| {
            let Some(ev) = event.dyn_ref::<MouseEvent>() else {
                return Vec::new();
            };
            board.on_pointer_up(pointer_position(&c, ev), Button::from_dom(ev.button()), modifiers(ev))
        })),
    )?);

    let c = canvas.clone();
    out.push(Registration::add(
        canvas_target,
        "wheel",
        false,
        handler(Box::new(move |board: &mut WebBoard, event: &Event| {
            let Some(ev) = event.dyn_ref::<WheelEvent>() else {
                return Vec::new();
            };
            ev.prevent_default();
            let delta = WheelDelta { dy: ev.delta_y() };
            board.on_wheel(pointer_position(&c, ev), delta, modifiers(ev))
        })),
    )?);

    out.push(Registration::add(
        window_target,
        "keydown",
        true,
        handler(Box::new(|board: &mut WebBoard, event: &Event| match event.dyn_ref::<KeyboardEvent>() {
            Some(ev) => board.on_key_down(&ev.key()),
            None => Vec::new(),
        })),
    )?);

    out.push(Registration::add(
        window_target,
        "keyup",
        true,
        handler(Box::new(|board: &mut WebBoard, event: &Event| match event.dyn_ref::<KeyboardEvent>() {
            Some(ev) => board.on_key_up(&ev.key()),
            None => Vec::new(),
        })),
    )?);

    out.push(Registration::add(window_target, "blur", true, handler(Box::new(|board: &mut WebBoard, _: &Event| board.on_blur())))?);

    let c = canvas.clone();
    out.push(Registration::add(
        window_target,
        "resize",
        true,
        handler(Box::new(move |board: &mut WebBoard, _: &Event| {
            board.resize();
            fit_canvas(&c, board);
            Vec::new()
        })),
    )?);

    Ok(())
}
