#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::constants::STAR_COUNT;
use valentine_core::gallery::{CardFill, PHOTOS};
use valentine_core::particles::starfield;
use valentine_core::scenes::ids;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod app;
mod constants;
mod dom;
mod events;
mod frame;
mod render;

/// Populate the background with twinkling stars.
fn build_starfield(document: &web::Document) {
    let Some(container) = document.get_element_by_id(ids::STARFIELD) else {
        return;
    };
    for star in starfield(STAR_COUNT) {
        let Ok(el) = document.create_element("div") else {
            continue;
        };
        el.set_class_name("star-twinkle");
        if let Some(style) = dom::style_of(&el) {
            for (k, v) in [
                ("left", format!("{}%", star.x_pct)),
                ("top", format!("{}%", star.y_pct)),
                ("width", format!("{}px", star.size)),
                ("height", format!("{}px", star.size)),
                ("animation-delay", format!("{}s", star.delay_sec)),
                ("animation-duration", format!("{}s", star.duration_sec)),
            ] {
                _ = style.set_property(k, &v);
            }
        }
        _ = container.append_child(&el);
    }
}

/// Point each gallery image at its photo, swapping in the gradient
/// placeholder if it fails to load.
fn wire_photos(document: &web::Document) {
    let Ok(frames) = document.query_selector_all(&format!(".{}", ids::GALLERY_FRAME_CLASS)) else {
        return;
    };
    for (i, photo) in PHOTOS.iter().enumerate() {
        let Some(frame) = frames
            .item(i as u32)
            .and_then(|n| n.dyn_into::<web::Element>().ok())
        else {
            break;
        };
        let Ok(Some(img)) = frame.query_selector("img") else {
            continue;
        };
        let Ok(img) = img.dyn_into::<web::HtmlImageElement>() else {
            continue;
        };

        let fallback = photo.fill(false);
        let frame_err = frame.clone();
        let img_err = img.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let CardFill::Gradient(a, b) = fallback {
                if let Some(style) = dom::style_of(&frame_err) {
                    let bg = format!("linear-gradient(135deg, {}, {})", a.to_css(), b.to_css());
                    _ = style.set_property("background", &bg);
                }
            }
            _ = img_err.style().set_property("display", "none");
            log::warn!("[gallery] image {} failed, using gradient", img_err.src());
        }) as Box<dyn FnMut()>);
        _ = img.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
        closure.forget();

        if let CardFill::Image(src) = photo.fill(true) {
            img.set_src(src);
        }
        img.set_alt(&photo.alt_text(i));
    }
}

fn confetti_canvas(document: &web::Document) -> Option<render::ConfettiCanvas> {
    let canvas = document
        .get_element_by_id(constants::CONFETTI_CANVAS_ID)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    match render::ConfettiCanvas::new(canvas) {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("[render] confetti disabled: {e:?}");
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("valentine-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    build_starfield(&document);
    wire_photos(&document);

    let canvas = confetti_canvas(&document);
    let app = Rc::new(RefCell::new(app::App::new(document.clone(), canvas)));

    events::pointer::wire_prompt(&document, &app);
    events::scroll::wire_scroll(&window, &app);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(app)));
    frame::start_loop(frame_ctx);
    Ok(())
}
