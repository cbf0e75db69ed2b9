use super::listen;
use crate::app::App;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::evasive::Proximity;
use valentine_core::scenes::ids;
use web_sys as web;

/// Wire the prompt's buttons: approach on the decline button, click on accept.
pub fn wire_prompt(document: &web::Document, app: &Rc<RefCell<App>>) {
    if let Some(decline) = document.get_element_by_id(ids::PROMPT_DECLINE) {
        let app_enter = app.clone();
        listen(&decline, "pointerenter", None, move |ev: web::PointerEvent| {
            if !Proximity::tracks_hover(&ev.pointer_type()) {
                return;
            }
            app_enter.borrow_mut().on_proximity(Proximity::PointerEnter);
        });

        let app_touch = app.clone();
        listen(&decline, "touchstart", Some(false), move |ev: web::TouchEvent| {
            let res = app_touch.borrow_mut().on_proximity(Proximity::TouchStart);
            if res.prevent_default {
                ev.prevent_default();
            }
        });
    } else {
        log::warn!("[click] no #{} element", ids::PROMPT_DECLINE);
    }

    let app_move = app.clone();
    listen(document, "pointermove", None, move |ev: web::PointerEvent| {
        if !Proximity::tracks_hover(&ev.pointer_type()) {
            return;
        }
        let p = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        app_move.borrow_mut().on_proximity(Proximity::PointerMove(p));
    });

    if let Some(accept) = document.get_element_by_id(ids::PROMPT_ACCEPT) {
        let app_click = app.clone();
        listen(&accept, "click", None, move |_: web::MouseEvent| {
            log::info!("[click] accept");
            app_click.borrow_mut().on_accept();
        });
    }
}
