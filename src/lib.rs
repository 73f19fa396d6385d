// Re-export all public modules so they can be used from main.rs
pub mod assets;
pub mod config;
pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent, Window};

#[cfg(target_arch = "wasm32")]
use assets::{CarLoader, LoadState, ProceduralCar};
#[cfg(target_arch = "wasm32")]
use config::DemoConfig;
#[cfg(target_arch = "wasm32")]
use controller::{input, FrameClock, FrameLoop, InputEvent, InputProcessor, KeyBindings};
#[cfg(target_arch = "wasm32")]
use view::{FrameSnapshot, View};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let window = web_sys::window().ok_or_else(|| js_error("no global `window`"))?;
    let document = window.document().ok_or_else(|| js_error("no document on window"))?;
    let hud = init_hud(&document)?;

    let bindings = KeyBindings::default();
    let (width, height) = viewport_size(&window);
    let frame_loop = FrameLoop::new(DemoConfig::default(), bindings.clone(), width, height)
        .map_err(|e| js_error(format!("invalid configuration: {e}")))?;
    let frame_loop = Rc::new(RefCell::new(frame_loop));

    // The car arrives on a later frame; until then only camera and light respond
    let slot = frame_loop.borrow().load_slot();
    wasm_bindgen_futures::spawn_local(async move {
        let result = ProceduralCar::default().load().await;
        *slot.borrow_mut() = LoadState::from(result);
    });

    setup_input_listeners(&document, &window, InputProcessor::new(bindings), frame_loop.clone())?;

    let mut clock = FrameClock::new();
    let mut view = HudView::new(hud);
    let performance = window.performance();
    let f = RcCellCallback::new(window.clone(), move || {
        let now = performance.as_ref().map(|p| p.now()).unwrap_or(0.0);
        let dt = clock.tick(now);
        let frame = frame_loop.borrow_mut().update(dt);
        view.present(&frame);
    });
    f.start()?;

    tracing::info!(width, height, "wheelspin started");
    Ok(())
}

/// Text overlay in the top-left corner of the page
#[cfg(target_arch = "wasm32")]
struct HudView {
    element: Element,
    last: String,
}

#[cfg(target_arch = "wasm32")]
impl HudView {
    fn new(element: Element) -> Self {
        Self { element, last: String::new() }
    }
}

#[cfg(target_arch = "wasm32")]
impl View for HudView {
    fn present(&mut self, frame: &FrameSnapshot) {
        let text = format!("{}\n{}", view::status_line(frame), view::hud::CONTROLS);
        if text != self.last {
            self.element.set_text_content(Some(&text));
            self.last = text;
        }
    }
}

/// Wire DOM events into the frame loop's input queue
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    document: &Document,
    window: &Window,
    processor: InputProcessor,
    frame_loop: Rc<RefCell<FrameLoop>>,
) -> Result<(), JsValue> {
    // Keyboard down
    {
        let frame_loop = frame_loop.clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            // keep arrow keys and space from scrolling the page
            if processor.is_bound(&e.key()) {
                e.prevent_default();
            }
            frame_loop.borrow_mut().handle_event(&input::wasm::key_down_to_input(&e));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Mouse move
    {
        let frame_loop = frame_loop.clone();
        let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
            frame_loop.borrow_mut().handle_event(&input::wasm::mouse_move_to_input(&e));
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
        mm.forget();
    }

    // Resize
    {
        let window_for_size = window.clone();
        let resize = Closure::wrap(Box::new(move |_e: Event| {
            let (width, height) = viewport_size(&window_for_size);
            frame_loop.borrow_mut().handle_event(&InputEvent::Resized { width, height });
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        resize.forget();
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn init_hud(document: &Document) -> Result<Element, JsValue> {
    let body = document.body().ok_or_else(|| js_error("no body on document"))?;
    let hud = document.create_element("pre")?;
    hud.set_id("wheelspin-hud");
    hud.set_attribute(
        "style",
        "position:fixed;top:8px;left:8px;margin:0;font:12px monospace;color:#fff;pointer-events:none",
    )?;
    body.append_child(&hud)?;
    Ok(hud)
}

#[cfg(target_arch = "wasm32")]
fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback) as u32
    };
    (dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0))
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

/// Runs a closure on every animation frame
#[cfg(target_arch = "wasm32")]
struct RcCellCallback {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
}

#[cfg(target_arch = "wasm32")]
impl RcCellCallback {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
        }
    }

    fn start(self) -> Result<(), JsValue> {
        let inner = self.inner.clone();
        let window = self.window.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            inner.borrow_mut().as_mut()();

            // Schedule the next frame
            let cb_ref = callback_clone.borrow();
            if let Some(cb) = cb_ref.as_ref() {
                if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    tracing::error!(error = ?e, "requestAnimationFrame failed, frame loop stopped");
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = callback.borrow().as_ref() {
            self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }

        // The closure owns itself through callback_clone and lives for the page's lifetime
        std::mem::forget(callback);
        Ok(())
    }
}
