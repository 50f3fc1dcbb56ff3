//! Browser surface and frame driver (wasm32)
//!
//! [`DomSurface`] maps elements found with `querySelector` to
//! [`ElementId`]s and writes inline styles. [`WebPointerTrail`] wires the
//! document and hover-target listeners plus a self-rescheduling
//! `requestAnimationFrame` callback around a [`PointerTrail`].

use crate::animator::error::{TrailError, TrailResult};
use crate::animator::trail::PointerTrail;
use crate::capture::input::types::Position;
use crate::capture::selector::Selector;
use crate::capture::style;
use crate::capture::traits::{ElementId, Surface};
use crate::config::TrailConfig;
use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlElement, MouseEvent, Window};

fn js_error(context: &str, err: JsValue) -> TrailError {
    TrailError::Surface(format!("{}: {:?}", context, err))
}

/// [`Surface`] over the page's document; elements found by selector get
/// stable ids in discovery order
pub struct DomSurface {
    document: Document,
    elements: Vec<HtmlElement>,
}

impl DomSurface {
    /// Create a surface with no elements registered yet
    pub fn new(document: Document) -> Self {
        Self {
            document,
            elements: Vec::new(),
        }
    }

    /// Element registered under `id`
    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id.0 as usize)
    }

    fn register(&mut self, element: HtmlElement) -> ElementId {
        if let Some(index) = self.elements.iter().position(|e| *e == element) {
            return ElementId(index as u64);
        }
        self.elements.push(element);
        ElementId(self.elements.len() as u64 - 1)
    }

    fn style_target(&self, id: ElementId) -> TrailResult<&HtmlElement> {
        self.element(id).ok_or(TrailError::UnknownElement(id))
    }
}

impl Surface for DomSurface {
    fn find_first(&mut self, selector: &Selector) -> Option<ElementId> {
        let element = self
            .document
            .query_selector(selector.as_css())
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(self.register(element))
    }

    fn find_all(&mut self, selector: &Selector) -> Vec<ElementId> {
        let Ok(nodes) = self.document.query_selector_all(selector.as_css()) else {
            return vec![];
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    fn set_translation(&mut self, element: ElementId, translation: Position) -> TrailResult<()> {
        self.style_target(element)?
            .style()
            .set_property("transform", &style::translate(translation))
            .map_err(|e| js_error("set transform", e))
    }

    fn set_size(&mut self, element: ElementId, width: f64, height: f64) -> TrailResult<()> {
        let css = self.style_target(element)?.style();
        css.set_property("width", &style::px(width))
            .map_err(|e| js_error("set width", e))?;
        css.set_property("height", &style::px(height))
            .map_err(|e| js_error("set height", e))
    }
}

type SharedDomTrail = Rc<RefCell<PointerTrail<DomSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

/// A running trail wired into the page
pub struct WebPointerTrail {
    window: Window,
    trail: SharedDomTrail,
    listeners: Vec<Listener>,
    frame_callback: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
}

impl WebPointerTrail {
    /// Attach to the current page; `Ok(None)` if either marker is missing
    pub fn install(config: TrailConfig) -> TrailResult<Option<Self>> {
        let window = web_sys::window()
            .ok_or_else(|| TrailError::Surface("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| TrailError::Surface("no document".to_string()))?;

        let Some(trail) = PointerTrail::install(DomSurface::new(document.clone()), config)? else {
            return Ok(None);
        };
        let trail: SharedDomTrail = Rc::new(RefCell::new(trail));

        let mut web = Self {
            window,
            trail,
            listeners: Vec::new(),
            frame_callback: Rc::new(RefCell::new(None)),
            frame_id: Rc::new(Cell::new(None)),
        };

        web.listen_pointer_moves(&document)?;
        web.listen_hover_targets()?;
        web.start_frames()?;

        tracing::info!("Pointer trail running ({} listeners)", web.listeners.len());
        Ok(Some(web))
    }

    fn add_listener(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(MouseEvent)>,
    ) -> TrailResult<()> {
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| js_error(kind, e))?;
        self.listeners.push(Listener {
            target,
            kind,
            callback,
        });
        Ok(())
    }

    fn listen_pointer_moves(&mut self, document: &Document) -> TrailResult<()> {
        let trail = self.trail.clone();
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Ok(mut trail) = trail.try_borrow_mut() {
                trail.on_pointer_move(event.client_x() as f64, event.client_y() as f64);
            }
        });
        self.add_listener(document.clone().into(), "mousemove", callback)
    }

    fn listen_hover_targets(&mut self) -> TrailResult<()> {
        let targets: Vec<(ElementId, EventTarget)> = {
            let trail = self.trail.borrow();
            trail
                .hover_targets()
                .filter_map(|id| {
                    trail
                        .surface()
                        .element(id)
                        .map(|el| (id, el.clone().into()))
                })
                .collect()
        };

        for (id, target) in targets {
            let trail = self.trail.clone();
            let enter = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
                if let Ok(mut trail) = trail.try_borrow_mut() {
                    if let Err(e) = trail.on_pointer_enter(id) {
                        tracing::warn!("Hover enter on {} failed: {}", id, e);
                    }
                }
            });
            self.add_listener(target.clone(), "mouseenter", enter)?;

            let trail = self.trail.clone();
            let leave = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
                if let Ok(mut trail) = trail.try_borrow_mut() {
                    if let Err(e) = trail.on_pointer_leave(id) {
                        tracing::warn!("Hover leave on {} failed: {}", id, e);
                    }
                }
            });
            self.add_listener(target, "mouseleave", leave)?;
        }
        Ok(())
    }

    fn start_frames(&mut self) -> TrailResult<()> {
        let trail = self.trail.clone();
        let window = self.window.clone();
        let frame_id = self.frame_id.clone();
        let callback = self.frame_callback.clone();

        *self.frame_callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if let Ok(mut trail) = trail.try_borrow_mut() {
                if let Err(e) = trail.frame() {
                    tracing::warn!("Frame failed, stopping pointer trail: {}", e);
                    frame_id.set(None);
                    return;
                }
            }
            frame_id.set(request_frame(&window, &callback));
        }));

        let id = request_frame(&self.window, &self.frame_callback)
            .ok_or_else(|| TrailError::FrameLoop("requestAnimationFrame failed".to_string()))?;
        self.frame_id.set(Some(id));
        Ok(())
    }

    /// Cancel the pending frame, remove every listener and give the
    /// animator back
    pub fn stop(self) -> Option<PointerTrail<DomSurface>> {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();

        for listener in &self.listeners {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        drop(self.listeners);

        tracing::info!("Pointer trail stopped");
        Rc::try_unwrap(self.trail).ok().map(RefCell::into_inner)
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    let callback = callback.borrow();
    let callback = callback.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

/// Buffers one formatted event and hands it to the browser console
#[derive(Default)]
struct ConsoleWriter(Vec<u8>);

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.0.is_empty() {
            let line = String::from_utf8_lossy(&self.0);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            self.0.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Route panics and tracing output to the browser console
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("pointer_trail=info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(ConsoleWriter::default),
        )
        .try_init();
}

/// Page entry point: run the stock effect for the lifetime of the page
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_browser_logging();

    match WebPointerTrail::install(TrailConfig::default()) {
        Ok(Some(trail)) => {
            std::mem::forget(trail);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}
