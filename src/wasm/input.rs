use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

use super::js_err;
use super::schedule::FrameLoop;
use crate::error::Result;
use crate::path::ReleaseOutcome;
use crate::session::{MoveOutcome, Session};
use crate::signal::PointerSample;

type Playback = Rc<RefCell<Option<FrameLoop>>>;

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Registers a listener that may cancel its event. Chromium treats touch
/// listeners on the window as passive unless told otherwise.
fn listen_active(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Client coordinates of a mouse event or of the first touch point.
fn sample_of(event: &Event) -> Option<PointerSample> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(PointerSample::new(
            f64::from(mouse.client_x()),
            f64::from(mouse.client_y()),
        ));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(PointerSample::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

fn stop_playback(playback: &Playback) {
    if let Some(frame_loop) = playback.borrow_mut().take() {
        frame_loop.cancel();
    }
}

/// Pointer, touch and keyboard handlers feeding the session.
///
/// Presses are only taken from the canvas so widgets on top of it do not
/// start recordings; moves and releases are taken from the whole window.
pub fn attach(window: &Window, canvas: &HtmlCanvasElement, session: Rc<RefCell<Session>>) -> Result<()> {
    let playback: Playback = Rc::new(RefCell::new(None));

    for kind in ["mousemove", "touchmove"] {
        let session = session.clone();
        listen_active(window, kind, move |event| {
            let Some(sample) = sample_of(&event) else {
                return;
            };
            if session.borrow_mut().pointer_moved(sample) == MoveOutcome::Suppressed {
                event.prevent_default();
            }
        })?;
    }

    for kind in ["mousedown", "touchstart"] {
        let session = session.clone();
        let playback = playback.clone();
        listen(canvas, kind, move |_| {
            stop_playback(&playback);
            session.borrow_mut().press();
        })?;
    }

    for kind in ["mouseup", "touchend"] {
        let session = session.clone();
        let playback = playback.clone();
        listen(window, kind, move |_| {
            let outcome = session.borrow_mut().release();
            if let ReleaseOutcome::Looping { samples } = outcome {
                let session = session.clone();
                match FrameLoop::start(move || {
                    session.borrow_mut().advance_playback();
                }) {
                    Ok(frame_loop) => {
                        stop_playback(&playback);
                        *playback.borrow_mut() = Some(frame_loop);
                        log::info!("replaying recorded path of {samples} samples");
                    }
                    Err(err) => log::error!("failed to start playback: {err}"),
                }
            }
        })?;
    }

    listen(window, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.key() == "Escape" {
            stop_playback(&playback);
            session.borrow_mut().reset();
            log::info!("back to auto drift");
        }
    })?;

    Ok(())
}
