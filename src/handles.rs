//! Owned browser registrations.
//!
//! Every listener, timer and animation loop the front-end installs is held by
//! one of these handles. Dropping the handle unregisters or cancels it, which
//! is how `unmount` guarantees nothing fires against torn-down UI.

use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("add {} listener: {:?}", event, e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// One-shot `setTimeout` that is cleared when dropped.
pub struct Timeout {
    id: i32,
    cancelled: Rc<Cell<bool>>,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// `f` runs on a microtask after the timer callback returns, so it may
    /// freely replace or drop the handle that scheduled it.
    pub fn schedule(ms: i32, f: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let cancelled = Rc::new(Cell::new(false));
        let cancelled_cb = cancelled.clone();
        let mut f = Some(f);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(f) = f.take() {
                let cancelled = cancelled_cb.clone();
                spawn_local(async move {
                    if !cancelled.get() {
                        f();
                    }
                });
            }
        }) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            )
            .map_err(|e| anyhow!("setTimeout: {:?}", e))?;
        Ok(Self {
            id,
            cancelled,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancelled.set(true);
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop that runs `tick` until it returns `false`.
/// It can be restarted with [`FrameLoop::ensure_running`].
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new(mut tick: impl FnMut() -> bool + 'static) -> Self {
        let slot: TickSlot = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let slot_inner = Rc::downgrade(&slot);
        let pending_inner = pending.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_inner.set(None);
            if !tick() {
                return;
            }
            if let Some(slot) = slot_inner.upgrade() {
                pending_inner.set(request_frame(&slot));
            }
        }) as Box<dyn FnMut()>));
        Self { tick: slot, pending }
    }

    pub fn ensure_running(&self) {
        if self.pending.get().is_none() {
            self.pending.set(request_frame(&self.tick));
        }
    }
}

fn request_frame(slot: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let slot = slot.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}
