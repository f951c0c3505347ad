use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};

use super::js_err;
use crate::error::{Error, Result};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` chain that runs `tick` once per display frame.
///
/// The callback keeps itself alive after the handle is dropped; only
/// [`FrameLoop::cancel`] stops it. `cancel` must not be called from inside
/// the loop's own tick.
pub struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self> {
        // The closure needs a reference to itself to schedule the next frame,
        // so it is created first and then stored in the shared slot.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let next = callback.clone();
        let next_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            tick();
            match request_frame(next.borrow().as_ref()) {
                Ok(id) => next_handle.set(Some(id)),
                Err(err) => log::error!("failed to schedule next frame: {err}"),
            }
        }) as Box<dyn FnMut()>));

        let id = request_frame(callback.borrow().as_ref())?;
        handle.set(Some(id));
        Ok(Self { callback, handle })
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("failed to cancel frame {id}: {err:?}");
                }
            }
        }
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: Option<&Closure<dyn FnMut()>>) -> Result<i32> {
    let callback = callback.ok_or_else(|| Error::Js("frame loop already cancelled".into()))?;
    let window = web_sys::window().ok_or_else(|| Error::MissingElement("window".into()))?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(js_err)
}
