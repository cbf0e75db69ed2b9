//! Progress broadcast from the scroll tracker to mounted scenes.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<RefCell<dyn FnMut(f32)>>;

#[derive(Default)]
struct SignalInner {
    value: f32,
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Single-threaded progress signal. Cloning yields another handle to the same signal.
///
/// Listeners run in registration order. A listener removed while an emit is
/// in flight still sees that emit, but no later ones.
#[derive(Clone, Default)]
pub struct ProgressSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl ProgressSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().value
    }

    pub fn subscribe(&self, listener: impl FnMut(f32) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    /// Returns `false` if the listener was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Store `progress` (clamped to `[0, 1]`) and notify every listener.
    pub fn emit(&self, progress: f32) {
        let value = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let snapshot: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in snapshot {
            // A listener that re-enters its own signal is skipped rather than double-borrowed.
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(value);
            }
        }
    }
}

impl std::fmt::Debug for ProgressSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ProgressSignal")
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
