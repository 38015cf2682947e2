//! Browser glue: binds a `ParticleField` to a canvas, the frame clock, pointer
//! events and an `<img>` loader. `start()` and `stop()` are the whole lifecycle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent,
    Window,
};

use crate::error::Error;
use crate::model::FieldConfig;
use crate::state::{ParticleField, SampleBuffer, to_canvas};
use crate::util::clog;

type FrameCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn as_fn<T: ?Sized>(cb: &Closure<T>) -> &js_sys::Function {
    cb.as_ref().unchecked_ref()
}

// Keeps the <img> and its handlers alive until the load settles or we stop.
struct PendingImage {
    img: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

pub struct FieldController {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: Rc<RefCell<ParticleField>>,
    raf_id: Rc<Cell<Option<i32>>>,
    frame_cb: FrameCell,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
    image: Option<PendingImage>,
}

impl FieldController {
    /// Fails without scheduling anything when the canvas or its 2d context is missing.
    pub fn mount(canvas: Option<HtmlCanvasElement>, config: FieldConfig) -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let canvas = canvas.ok_or(Error::NoCanvas)?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(Error::NoContext)?;
        Ok(Self {
            window,
            canvas,
            ctx,
            field: Rc::new(RefCell::new(ParticleField::new(config))),
            raf_id: Rc::new(Cell::new(None)),
            frame_cb: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
            image: None,
        })
    }

    pub fn start(&mut self) {
        if self.field.borrow().is_running() {
            return;
        }
        self.field.borrow_mut().start();
        self.attach_pointer_listeners();

        // RAF loop
        let field = self.field.clone();
        let window = self.window.clone();
        let raf_id = self.raf_id.clone();
        let cell = self.frame_cb.clone();
        let mut ctx = self.ctx.clone();
        *self.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !field.borrow_mut().frame(&mut ctx) {
                return;
            }
            if let Some(cb) = cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(as_fn(cb)) {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            if let Ok(id) = self.window.request_animation_frame(as_fn(cb)) {
                self.raf_id.set(Some(id));
            }
        }
    }

    /// Cancels the pending frame and detaches every listener. An in-flight image
    /// still lands in the field, so a later `start()` draws it.
    pub fn stop(&mut self) {
        self.field.borrow_mut().stop();
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        for (kind, cb) in self.listeners.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind, as_fn(&cb));
        }
        // Dropping the closure breaks the loop's self-reference.
        self.frame_cb.borrow_mut().take();
    }

    /// Start decoding `src`. The particle set is rebuilt once the image lands;
    /// until then frames run over whatever set is current.
    pub fn load_image(&mut self, src: &str) {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                clog(&format!("particle logo: {}", Error::ImageLoad(format!("{e:?}"))));
                self.field.borrow_mut().clear();
                return;
            }
        };
        img.set_cross_origin(Some("anonymous"));

        let onload = {
            let field = self.field.clone();
            let img = img.clone();
            Closure::wrap(Box::new(move || {
                let mut field = field.borrow_mut();
                match sample_image(&img, field.config()) {
                    Ok(buf) => {
                        let n = field.load(&buf);
                        clog(&format!("particle logo: {n} particles"));
                    }
                    Err(e) => {
                        clog(&format!("particle logo: {e}"));
                        field.clear();
                    }
                }
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let field = self.field.clone();
            let src = src.to_string();
            Closure::wrap(Box::new(move || {
                clog(&format!("particle logo: {}", Error::ImageLoad(src.clone())));
                field.borrow_mut().clear();
            }) as Box<dyn FnMut()>)
        };
        img.set_onload(Some(as_fn(&onload)));
        img.set_onerror(Some(as_fn(&onerror)));
        img.set_src(src);

        if let Some(old) = self.image.replace(PendingImage {
            img,
            _onload: onload,
            _onerror: onerror,
        }) {
            old.img.set_onload(None);
            old.img.set_onerror(None);
        }
    }

    fn attach_pointer_listeners(&mut self) {
        let move_to = {
            let field = self.field.clone();
            let canvas = self.canvas.clone();
            move |client_x: f64, client_y: f64| {
                let rect = canvas.get_bounding_client_rect();
                let mut field = field.borrow_mut();
                let pointer = to_canvas(
                    client_x,
                    client_y,
                    rect.left(),
                    rect.top(),
                    rect.width(),
                    rect.height(),
                    field.config(),
                );
                if let Some(p) = pointer {
                    field.pointer_move(p);
                }
            }
        };

        let mouse_move = move_to.clone();
        self.listen("mousemove", move |e: Event| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                mouse_move(e.client_x() as f64, e.client_y() as f64);
            }
        });
        let touch_move = move_to;
        self.listen("touchmove", move |e: Event| {
            if let Some(t) = e.dyn_ref::<TouchEvent>().and_then(|e| e.touches().get(0)) {
                touch_move(t.client_x() as f64, t.client_y() as f64);
            }
        });
        for kind in ["mouseleave", "touchend", "touchcancel"] {
            let field = self.field.clone();
            self.listen(kind, move |_e: Event| field.borrow_mut().pointer_leave());
        }
    }

    fn listen(&mut self, kind: &'static str, handler: impl FnMut(Event) + 'static) {
        let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match self.canvas.add_event_listener_with_callback(kind, as_fn(&cb)) {
            Ok(()) => self.listeners.push((kind, cb)),
            Err(e) => clog(&format!("particle logo: cannot listen for {kind}: {e:?}")),
        }
    }
}

impl Drop for FieldController {
    fn drop(&mut self) {
        self.stop();
        // The handlers die with us; the <img> must not call into them afterwards.
        if let Some(pending) = self.image.take() {
            pending.img.set_onload(None);
            pending.img.set_onerror(None);
        }
    }
}

/// Draw the image into an offscreen canvas at the sampling resolution and read it back.
fn sample_image(img: &HtmlImageElement, cfg: &FieldConfig) -> Result<SampleBuffer, Error> {
    let document = web_sys::window()
        .ok_or(Error::NoWindow)?
        .document()
        .ok_or(Error::NoDocument)?;
    let tmp: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| Error::NoCanvas)?;
    tmp.set_width(cfg.sample_width);
    tmp.set_height(cfg.sample_height);
    let ctx = tmp
        .get_context("2d")?
        .ok_or(Error::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| Error::NoContext)?;
    let (w, h) = (cfg.sample_width as f64, cfg.sample_height as f64);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)?;
    let data = ctx.get_image_data(0.0, 0.0, w, h)?;
    SampleBuffer::new(data.width(), data.height(), data.data().0)
        .ok_or_else(|| Error::ImageData("pixel buffer does not match its size".into()))
}
