use crate::dom::{AnchorDownloader, DomView};
use crate::engine::JsEngine;
use crate::logger;
use common::{FrontendConfig, ImageInput, Point};
use log::{debug, info, warn};
use pipeline::Frontend;
use sketch::{Raster, StrokeCapture};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, ImageData, MouseEvent,
};

/// Id of an optional `<script type="application/json">` holding a `FrontendConfig`
const CONFIG_ELEMENT_ID: &str = "digit-guesser-config";

type App = Frontend<JsEngine, JsEngine, JsEngine, AnchorDownloader, DomView>;

/// Drawing surface plus the canvas it is mirrored to
struct Pad {
    capture: StrokeCapture,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Pad {
    fn new(canvas: HtmlCanvasElement, config: &FrontendConfig) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let raster = Raster::new(canvas.width(), canvas.height(), &config.stroke);
        let pad = Self {
            capture: StrokeCapture::new(raster),
            canvas,
            context,
        };
        pad.blit()?;
        Ok(pad)
    }

    /// Copy the raster onto the visible canvas
    fn blit(&self) -> Result<(), JsValue> {
        let raster = self.capture.raster();
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(raster.as_raw()),
            raster.width(),
            raster.height(),
        )?;
        self.context.put_image_data(&data, 0.0, 0.0)
    }

    /// Event position in raster pixels. The canvas may be scaled by CSS.
    fn point(&self, event: &MouseEvent) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        surface_point(
            event.client_x() as f64,
            event.client_y() as f64,
            (rect.left(), rect.top(), rect.width(), rect.height()),
            (self.canvas.width(), self.canvas.height()),
        )
    }
}

/// Map client coordinates into surface pixels given the element's bounding
/// box `(left, top, width, height)` and its pixel size
fn surface_point(client_x: f64, client_y: f64, rect: (f64, f64, f64, f64), size: (u32, u32)) -> Point {
    let (left, top, width, height) = rect;
    let scale_x = if width > 0.0 { size.0 as f64 / width } else { 1.0 };
    let scale_y = if height > 0.0 { size.1 as f64 / height } else { 1.0 };
    Point::new((client_x - left) * scale_x, (client_y - top) * scale_y)
}

pub fn init() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let config = load_config(&document);
    logger::init(logger::parse_level(&config.log_level));

    let app: Rc<App> = Rc::new(Frontend::new(
        &config,
        JsEngine,
        JsEngine,
        JsEngine,
        AnchorDownloader::new(document.clone()),
        DomView::new(document.clone(), config.elements.clone()),
    ));

    let pad = match document.get_element_by_id(&config.elements.canvas) {
        Some(canvas) => {
            let canvas = canvas.dyn_into::<HtmlCanvasElement>()?;
            let pad = Rc::new(RefCell::new(Pad::new(canvas, &config)?));
            setup_drawing_handlers(&pad)?;
            Some(pad)
        }
        None => None,
    };

    setup_action_handlers(&document, &config, &app, pad)?;
    info!("digit guesser ready ({:?} model)", config.model_mode);
    Ok(())
}

fn load_config(document: &Document) -> FrontendConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return FrontendConfig::default();
    };

    FrontendConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        FrontendConfig::default()
    })
}

fn setup_drawing_handlers(pad: &Rc<RefCell<Pad>>) -> Result<(), JsValue> {
    let canvas = pad.borrow().canvas.clone();

    // Mouse down
    let pad_clone = pad.clone();
    let mousedown_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        let mut pad = pad_clone.borrow_mut();
        let at = pad.point(&event);
        pad.capture.press(at);
    }) as Box<dyn Fn(MouseEvent)>);
    canvas.add_event_listener_with_callback("mousedown", mousedown_closure.as_ref().unchecked_ref())?;
    mousedown_closure.forget();

    // Mouse move
    let pad_clone = pad.clone();
    let mousemove_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        let mut pad = pad_clone.borrow_mut();
        let at = pad.point(&event);
        if pad.capture.move_to(at, event.buttons()) {
            if let Err(e) = pad.blit() {
                warn!("canvas update failed: {:?}", e);
            }
        }
    }) as Box<dyn Fn(MouseEvent)>);
    canvas.add_event_listener_with_callback("mousemove", mousemove_closure.as_ref().unchecked_ref())?;
    mousemove_closure.forget();

    // Mouse up
    let pad_clone = pad.clone();
    let mouseup_closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
        pad_clone.borrow_mut().capture.release();
    }) as Box<dyn Fn(MouseEvent)>);
    canvas.add_event_listener_with_callback("mouseup", mouseup_closure.as_ref().unchecked_ref())?;
    mouseup_closure.forget();

    Ok(())
}

/// Wire `handler` to the button with `id`. Returns false if the page has no such button.
fn on_click(
    document: &Document,
    id: &str,
    handler: impl Fn() + 'static,
) -> Result<bool, JsValue> {
    let Some(button) = document.get_element_by_id(id) else {
        return Ok(false);
    };

    let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        handler();
    }) as Box<dyn Fn(MouseEvent)>);
    button
        .dyn_into::<HtmlElement>()?
        .set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    Ok(true)
}

fn setup_action_handlers(
    document: &Document,
    config: &FrontendConfig,
    app: &Rc<App>,
    pad: Option<Rc<RefCell<Pad>>>,
) -> Result<(), JsValue> {
    let ids = &config.elements;

    // Classify the drawing
    match pad {
        Some(pad) => {
            let app = app.clone();
            on_click(document, &ids.classify_drawing_button, move || {
                let app = app.clone();
                let pad = pad.clone();
                let upload = app.view().upload();
                spawn_local(async move {
                    let snapshot = || {
                        pad.borrow()
                            .capture
                            .snapshot()
                            .map(|image| Some(ImageInput::Canvas(image)))
                    };
                    app.classify(snapshot, upload).await;
                });
            })?;
        }
        None => {
            if document.get_element_by_id(&ids.classify_drawing_button).is_some() {
                warn!("#{} has no canvas to classify", ids.classify_drawing_button);
            }
        }
    }

    // Classify the checked sample
    let app_clone = app.clone();
    on_click(document, &ids.classify_sample_button, move || {
        let app = app_clone.clone();
        let upload = app.view().upload();
        spawn_local(async move {
            app.classify(|| Ok(app.view().selected_sample()), upload).await;
        });
    })?;

    // Three fresh samples
    let app_clone = app.clone();
    on_click(document, &ids.samples_button, move || {
        app_clone.refresh_samples();
    })?;

    // Train and download
    let app_clone = app.clone();
    let wired = on_click(document, &ids.train_button, move || {
        let hyperparameters = app_clone.view().hyperparameters();
        app_clone.train(&hyperparameters);
    })?;
    debug!("train button wired: {}", wired);

    Ok(())
}
