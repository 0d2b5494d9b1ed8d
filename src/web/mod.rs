//! DOM presentation layer for browser builds (feature `web`).
//!
//! Every element, stylesheet and listener created here is owned by a Rust
//! value and released in its `Drop` impl, so mounting and unmounting the
//! viewer any number of times leaves the document as it found it.
//!
//! Browser callbacks never touch the engine directly. They push into
//! shared queues that the host drains once per animation frame:
//!
//! ```ignore
//! for event in focus.drain() {
//!     let _ = engine.handle_input(event, now);
//! }
//! for id in presenter.drain_clicks() {
//!     engine.handle_label_click(&id, now);
//! }
//! for code in keys.drain() {
//!     let _ = engine.handle_key_press(&code, now);
//! }
//! if let Some((w, h)) = resize.take() {
//!     engine.resize(w, h);
//! }
//! if engine.frame_due(now) {
//!     let frame = engine.update(now);
//!     engine.present_labels(&mut presenter, &frame);
//!     nav_widget.apply(&frame.selection_events);
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlStyleElement,
    KeyboardEvent, MouseEvent, Window,
};

use crate::annotation::{LabelLayout, LabelPresenter};
use crate::input::InputEvent;
use crate::options::KeybindingOptions;

/// Stylesheet injected once per presenter.
const LABEL_CSS: &str = "
.eyeview-label {
    position: absolute;
    left: 0;
    top: 0;
    transform-origin: top left;
    cursor: pointer;
    user-select: none;
    font-family: sans-serif;
    color: #fff;
}
.eyeview-label .eyeview-number {
    display: inline-block;
    width: 1.6em;
    height: 1.6em;
    line-height: 1.6em;
    border-radius: 50%;
    text-align: center;
    background: rgba(0, 0, 0, 0.6);
}
.eyeview-label .eyeview-text {
    display: none;
    margin-left: 0.5em;
    padding: 0.5em;
    border-radius: 4px;
    background: rgba(0, 0, 0, 0.75);
    max-width: 16em;
}
.eyeview-label.active .eyeview-number { background: #e04040; }
.eyeview-label.active .eyeview-text { display: inline-block; }
";

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

/// The browser window and its document.
///
/// # Errors
///
/// Fails outside a browser main thread.
pub fn window_and_document() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    Ok((window, document))
}

// ---------------------------------------------------------------------------
// Label presenter
// ---------------------------------------------------------------------------

struct DomLabel {
    root: HtmlElement,
    description: HtmlElement,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl DomLabel {
    fn detach(self) {
        let _ = self.root.remove_event_listener_with_callback(
            "click",
            self.on_click.as_ref().unchecked_ref(),
        );
        self.root.remove();
    }
}

/// Shared queue of clicked annotation ids.
pub type ClickQueue = Rc<RefCell<VecDeque<String>>>;

/// Renders labels as absolutely positioned `div`s inside a container.
pub struct DomLabelPresenter {
    document: Document,
    container: Element,
    style: HtmlStyleElement,
    labels: FxHashMap<String, DomLabel>,
    clicks: ClickQueue,
}

impl DomLabelPresenter {
    /// Presenter drawing into `container`, which should be positioned
    /// over the 3D canvas.
    ///
    /// # Errors
    ///
    /// Returns the DOM exception if the stylesheet cannot be created.
    pub fn new(document: Document, container: Element) -> Result<Self, JsValue> {
        let style = document
            .create_element("style")?
            .dyn_into::<HtmlStyleElement>()
            .map_err(JsValue::from)?;
        style.set_text_content(Some(LABEL_CSS));
        let _ = container.append_child(&style)?;
        Ok(Self {
            document,
            container,
            style,
            labels: FxHashMap::default(),
            clicks: Rc::default(),
        })
    }

    /// Handle to the click queue.
    #[must_use]
    pub fn clicks(&self) -> ClickQueue {
        Rc::clone(&self.clicks)
    }

    /// Take all queued label clicks, oldest first.
    pub fn drain_clicks(&self) -> Vec<String> {
        self.clicks.borrow_mut().drain(..).collect()
    }

    /// Number of label elements currently in the document.
    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.labels.len()
    }

    fn build(&self, label: &LabelLayout) -> Result<DomLabel, JsValue> {
        let root = create_html(&self.document, "div")?;
        root.set_class_name("eyeview-label");

        let number = create_html(&self.document, "span")?;
        number.set_class_name("eyeview-number");
        number.set_text_content(Some(&label.number.to_string()));

        let text = create_html(&self.document, "div")?;
        text.set_class_name("eyeview-text");
        let title = create_html(&self.document, "strong")?;
        title.set_text_content(Some(&label.title));
        let description = create_html(&self.document, "p")?;
        let _ = text.append_child(&title)?;
        let _ = text.append_child(&description)?;

        let _ = root.append_child(&number)?;
        let _ = root.append_child(&text)?;

        let clicks = Rc::clone(&self.clicks);
        let id = label.id.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.stop_propagation();
            clicks.borrow_mut().push_back(id.clone());
        });
        root.add_event_listener_with_callback(
            "click",
            on_click.as_ref().unchecked_ref(),
        )?;
        let _ = self.container.append_child(&root)?;

        Ok(DomLabel {
            root,
            description,
            on_click,
        })
    }

    fn restyle(dom: &DomLabel, label: &LabelLayout) -> Result<(), JsValue> {
        let style = dom.root.style();
        style.set_property(
            "transform",
            &format!(
                "translate({}px, {}px) scale({})",
                label.screen_position.x, label.screen_position.y, label.scale
            ),
        )?;
        style.set_property(
            "display",
            if label.visible { "block" } else { "none" },
        )?;
        let _ = dom
            .root
            .class_list()
            .toggle_with_force("active", label.active)?;
        dom.description
            .set_text_content(label.description.as_deref());
        Ok(())
    }
}

impl LabelPresenter for DomLabelPresenter {
    fn mount(&mut self, label: &LabelLayout) {
        match self.build(label) {
            Ok(dom) => {
                if let Err(e) = Self::restyle(&dom, label) {
                    log::warn!("Label {} style failed: {e:?}", label.id);
                }
                if let Some(old) = self.labels.insert(label.id.clone(), dom) {
                    old.detach();
                }
            }
            Err(e) => log::warn!("Label {} mount failed: {e:?}", label.id),
        }
    }

    fn update(&mut self, label: &LabelLayout) {
        if let Some(dom) = self.labels.get(&label.id) {
            if let Err(e) = Self::restyle(dom, label) {
                log::warn!("Label {} style failed: {e:?}", label.id);
            }
        }
    }

    fn unmount(&mut self, id: &str) {
        if let Some(dom) = self.labels.remove(id) {
            dom.detach();
        }
    }
}

impl Drop for DomLabelPresenter {
    fn drop(&mut self) {
        for (_, dom) in self.labels.drain() {
            dom.detach();
        }
        self.style.remove();
    }
}

// ---------------------------------------------------------------------------
// Window listeners
// ---------------------------------------------------------------------------

/// An event listener that is removed when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(
            event,
            callback.as_ref().unchecked_ref(),
        )?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// `focus`/`blur` listener on the viewer element, reported as
/// [`InputEvent::FocusChanged`].
///
/// The target must be focusable (a canvas or a container with a
/// `tabindex`). The viewer starts out focused, matching
/// [`InputProcessor`](crate::input::InputProcessor).
pub struct FocusListener {
    focused: Rc<Cell<bool>>,
    queue: Rc<RefCell<VecDeque<InputEvent>>>,
    _focus: Listener,
    _blur: Listener,
}

impl FocusListener {
    /// Start listening on `target`.
    ///
    /// # Errors
    ///
    /// Returns the DOM exception if a listener cannot be attached.
    pub fn attach(target: &EventTarget) -> Result<Self, JsValue> {
        let focused = Rc::new(Cell::new(true));
        let queue: Rc<RefCell<VecDeque<InputEvent>>> = Rc::default();
        let on = |value: bool| {
            let flag = Rc::clone(&focused);
            let sink = Rc::clone(&queue);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                flag.set(value);
                sink.borrow_mut()
                    .push_back(InputEvent::FocusChanged { focused: value });
            })
        };
        let focus = Listener::attach(target.clone(), "focus", on(true))?;
        let blur = Listener::attach(target.clone(), "blur", on(false))?;
        Ok(Self {
            focused,
            queue,
            _focus: focus,
            _blur: blur,
        })
    }

    /// Whether the viewer element currently has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Take all queued focus changes, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// Window `keydown` listener queueing `KeyboardEvent.code` strings.
///
/// While the viewer has focus, keys bound to a viewer action have their
/// default action (page scrolling for arrows) suppressed.
pub struct KeyListener {
    queue: Rc<RefCell<VecDeque<String>>>,
    bindings: Rc<RefCell<KeybindingOptions>>,
    _listener: Listener,
}

impl KeyListener {
    /// Start listening on `window`, consuming keys in `bindings` while
    /// `focus` reports the viewer focused.
    ///
    /// # Errors
    ///
    /// Returns the DOM exception if the listener cannot be attached.
    pub fn attach(
        window: &Window,
        bindings: KeybindingOptions,
        focus: &FocusListener,
    ) -> Result<Self, JsValue> {
        let queue: Rc<RefCell<VecDeque<String>>> = Rc::default();
        let bindings = Rc::new(RefCell::new(bindings));
        let sink = Rc::clone(&queue);
        let bound = Rc::clone(&bindings);
        let focused = Rc::clone(&focus.focused);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                let code = key.code();
                if focused.get() && bound.borrow().lookup(&code).is_some() {
                    key.prevent_default();
                }
                sink.borrow_mut().push_back(code);
            }
        });
        let listener =
            Listener::attach(window.clone().into(), "keydown", callback)?;
        Ok(Self {
            queue,
            bindings,
            _listener: listener,
        })
    }

    /// Replace the bindings used to decide which keys to consume.
    pub fn set_bindings(&self, bindings: KeybindingOptions) {
        *self.bindings.borrow_mut() = bindings;
    }

    /// Take all queued key codes, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// Window `resize` listener remembering the latest inner size.
pub struct ResizeListener {
    latest: Rc<Cell<Option<(f32, f32)>>>,
    _listener: Listener,
}

fn inner_size(window: &Window) -> Option<(f32, f32)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}

impl ResizeListener {
    /// Start listening on `window`.
    ///
    /// # Errors
    ///
    /// Returns the DOM exception if the listener cannot be attached.
    pub fn attach(window: &Window) -> Result<Self, JsValue> {
        let latest = Rc::new(Cell::new(None));
        let sink = Rc::clone(&latest);
        let source = window.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            sink.set(inner_size(&source));
        });
        let listener =
            Listener::attach(window.clone().into(), "resize", callback)?;
        Ok(Self {
            latest,
            _listener: listener,
        })
    }

    /// The size reported by the most recent resize, if any since the last
    /// call.
    pub fn take(&self) -> Option<(f32, f32)> {
        self.latest.take()
    }
}

/// Route `log` output to the browser console and panics to
/// `console.error`.
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialised");
    }
}
