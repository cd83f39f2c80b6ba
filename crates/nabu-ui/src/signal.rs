//! Single-threaded observer list.
//!
//! Components own one `Signal` per event stream and call [`Signal::emit`]
//! synchronously from their handlers. Listeners run in connection order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Signal::connect`], used to disconnect.
    pub struct ConnectionId;
}

type Slot<T> = Rc<dyn Fn(&T)>;

pub struct Signal<T> {
    slots: RefCell<SlotMap<ConnectionId, Slot<T>>>,
    order: RefCell<Vec<ConnectionId>>,
    blocked: Cell<bool>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(SlotMap::with_key()),
            order: RefCell::new(Vec::new()),
            blocked: Cell::new(false),
        }
    }

    pub fn connect(&self, slot: impl Fn(&T) + 'static) -> ConnectionId {
        let id = self.slots.borrow_mut().insert(Rc::new(slot));
        self.order.borrow_mut().push(id);
        id
    }

    /// Returns `true` if `id` was connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.order.borrow_mut().retain(|c| *c != id);
        self.slots.borrow_mut().remove(id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.slots.borrow().len()
    }

    /// While blocked, `emit` does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.set(blocked);
    }

    /// Invokes every listener with `value`.
    ///
    /// Listeners may connect or disconnect during emission; changes apply
    /// from the next `emit`.
    pub fn emit(&self, value: &T) {
        if self.blocked.get() {
            return;
        }
        let snapshot: Vec<Slot<T>> = {
            let slots = self.slots.borrow();
            self.order.borrow().iter().filter_map(|id| slots.get(*id).cloned()).collect()
        };
        for slot in snapshot {
            slot(value);
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal").field("connections", &self.connection_count()).finish()
    }
}

/// Listener that appends every emitted value to a shared vector.
///
/// Convenient for hosts that drain events after dispatch, and for tests.
pub fn collect_into<T: Clone + 'static>(signal: &Signal<T>) -> Rc<RefCell<Vec<T>>> {
    let sink = Rc::new(RefCell::new(Vec::new()));
    let out = Rc::clone(&sink);
    signal.connect(move |v: &T| out.borrow_mut().push(v.clone()));
    sink
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_run_in_connection_order() {
        let signal = Signal::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        signal.connect(move |v| a.borrow_mut().push(("a", *v)));
        signal.connect(move |v| b.borrow_mut().push(("b", *v)));
        signal.emit(&7);
        assert_eq!(*log.borrow(), [("a", 7), ("b", 7)]);
    }

    #[test]
    fn disconnect_and_block() {
        let signal = Signal::<u32>::new();
        let seen = collect_into(&signal);
        let extra = signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);
        assert!(signal.disconnect(extra));
        assert!(!signal.disconnect(extra));

        signal.set_blocked(true);
        signal.emit(&1);
        signal.set_blocked(false);
        signal.emit(&2);
        assert_eq!(*seen.borrow(), [2]);
    }

    #[test]
    fn connecting_during_emit_is_deferred() {
        let signal = Rc::new(Signal::<u32>::new());
        let count = Rc::new(Cell::new(0));
        let (s, c) = (Rc::clone(&signal), Rc::clone(&count));
        signal.connect(move |_| {
            let c = Rc::clone(&c);
            s.connect(move |_| c.set(c.get() + 1));
        });
        signal.emit(&0);
        assert_eq!(count.get(), 0);
        signal.emit(&0);
        assert_eq!(count.get(), 1);
    }
}
