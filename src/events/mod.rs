pub mod pointer;
pub mod scroll;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach `handler` for `name` on `target` for the lifetime of the page.
/// `passive: Some(false)` allows the handler to cancel the default action.
pub fn listen<E>(
    target: &web::EventTarget,
    name: &str,
    passive: Option<bool>,
    handler: impl FnMut(E) + 'static,
) where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let cb = closure.as_ref().unchecked_ref();
    let res = match passive {
        Some(p) => {
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(p);
            target.add_event_listener_with_callback_and_add_event_listener_options(name, cb, &opts)
        }
        None => target.add_event_listener_with_callback(name, cb),
    };
    if let Err(e) = res {
        log::warn!("[events] could not listen for {name}: {e:?}");
    }
    closure.forget();
}
