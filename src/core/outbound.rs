//! Cross-thread output delivery.
//!
//! `send` may be called from any thread; messages park in a pending queue
//! until the host's event thread drains them into the console. An optional
//! wake handler tells the host a drain is worthwhile.

use std::sync::{Arc, Mutex, MutexGuard};

pub type WakeHandler = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Inner {
    pending: Mutex<Vec<String>>,
    wake: Mutex<Option<WakeHandler>>,
}

/// Clonable, `Send` handle for producers (network readers, timers).
#[derive(Clone)]
pub struct ConsoleSender {
    inner: Arc<Inner>,
}

impl ConsoleSender {
    /// Enqueue a message for the next [`crate::widgets::Console::pump`] and
    /// fire the wake handler.
    pub fn send(&self, message: impl Into<String>) {
        lock_recovering(&self.inner.pending).push(message.into());
        // Run the handler outside the pending lock so a handler that pumps
        // synchronously doesn't deadlock.
        let wake = lock_recovering(&self.inner.wake);
        if let Some(handler) = wake.as_ref() {
            handler();
        }
    }

    /// Install the host's wake callback (e.g. post an event to the UI loop).
    pub fn set_wake_handler(&self, handler: Option<WakeHandler>) {
        *lock_recovering(&self.inner.wake) = handler;
    }
}

/// Console-side end of the queue.
#[derive(Default)]
pub struct OutboundQueue {
    inner: Arc<Inner>,
}

impl OutboundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(&self) -> ConsoleSender {
        ConsoleSender {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Take everything queued so far, in send order.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *lock_recovering(&self.inner.pending))
    }
}

/// A producer that panicked mid-send must not wedge the console.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::OutboundQueue;

    #[test]
    fn messages_drain_in_send_order() {
        let queue = OutboundQueue::new();
        let sender = queue.sender();
        sender.send("one");
        sender.send("two");
        assert_eq!(queue.drain(), vec!["one".to_string(), "two".to_string()]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn wake_handler_fires_per_send() {
        let queue = OutboundQueue::new();
        let sender = queue.sender();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        sender.set_wake_handler(Some(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })));

        sender.send("a");
        sender.send("b");
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn send_works_across_threads() {
        let queue = OutboundQueue::new();
        let sender = queue.sender();
        let handle = std::thread::spawn(move || {
            sender.send("from thread");
        });
        handle.join().expect("sender thread panicked");
        assert_eq!(queue.drain(), vec!["from thread".to_string()]);
    }
}
