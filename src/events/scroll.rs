use super::listen;
use crate::app::App;
use crate::constants::WHEEL_RELEASE_SEC;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Scroll position, gesture start/end and viewport size.
///
/// Only user input cancels a snap; the `scroll` events a snap itself causes
/// just update the raw progress.
pub fn wire_scroll(window: &web::Window, app: &Rc<RefCell<App>>) {
    let a = app.clone();
    listen(window, "scroll", Some(true), move |_: web::Event| {
        a.borrow_mut().on_scroll();
    });

    // Wheel and keys have no end event: release after a short quiet period.
    let a = app.clone();
    listen(window, "wheel", Some(true), move |_: web::WheelEvent| {
        let mut app = a.borrow_mut();
        app.on_user_input();
        app.on_release(WHEEL_RELEASE_SEC);
    });
    let a = app.clone();
    listen(window, "keydown", None, move |_: web::KeyboardEvent| {
        let mut app = a.borrow_mut();
        app.on_user_input();
        app.on_release(WHEEL_RELEASE_SEC);
    });

    let a = app.clone();
    listen(window, "touchstart", Some(true), move |_: web::TouchEvent| {
        a.borrow_mut().on_user_input();
    });
    let a = app.clone();
    listen(window, "touchend", Some(true), move |_: web::TouchEvent| {
        a.borrow_mut().on_release(0.0);
    });

    let a = app.clone();
    listen(window, "resize", None, move |_: web::Event| {
        a.borrow_mut().on_resize();
    });
}
