use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::Selection;

type Listener = Rc<dyn Fn(&Selection)>;

/// Publishes the current selection to code living outside the editor, such as host extensions.
///
/// Clones share the same state. Listeners stay registered for as long as the [`Registration`]
/// returned by [`SelectionPublisher::register`] is alive.
#[derive(Clone, Default)]
pub struct SelectionPublisher {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    current: Selection,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

impl fmt::Debug for SelectionPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SelectionPublisher")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Keeps a listener registered; dropping it unregisters.
#[must_use = "dropping the registration unregisters the listener"]
pub struct Registration {
    inner: Weak<RefCell<Inner>>,
    id: u64,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
            trace!("selection listener {} unregistered", self.id);
        }
    }
}

impl SelectionPublisher {
    /// Registers `listener` and calls it right away with the current selection.
    pub fn register(&self, listener: impl Fn(&Selection) + 'static) -> Registration {
        let listener: Listener = Rc::new(listener);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.listeners.push((id, listener.clone()));
            (id, inner.current.clone())
        };

        listener(&current);
        Registration {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn current(&self) -> Selection {
        self.inner.borrow().current.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Stores `selection` and notifies listeners if it changed.
    pub(super) fn publish(&self, selection: &Selection) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if &inner.current == selection {
                return;
            }
            inner.current = selection.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        // Called without the borrow held, so listeners may register or unregister.
        for listener in listeners {
            listener(selection);
        }
    }
}
