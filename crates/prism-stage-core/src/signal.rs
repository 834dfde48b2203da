//! Signal/slot system for Prism Stage.
//!
//! This module provides a type-safe signal/slot mechanism for communicating
//! state changes between sprites, the audio engine, and application code.
//! Signals are emitted by objects when something happened (a click, a value
//! change, a playback transition) and connected slots (callbacks) are
//! invoked in response.
//!
//! Slots run directly on the emitting thread. The toolkit does not own an
//! event loop (the host render loop does), so there is no queued delivery;
//! a slot that needs to defer work is expected to hand it to whatever loop
//! the application runs.
//!
//! # Example
//!
//! ```
//! use prism_stage_core::Signal;
//!
//! let value_changed = Signal::<f32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("value is now {value}");
//! });
//!
//! value_changed.emit(0.75);
//! value_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, every connected slot is invoked with a
/// reference to the provided argument value. Connections can be added and
/// removed at any time, including from inside a slot that is currently
/// being invoked: emission snapshots the slot list first, so reentrant
/// `connect`/`disconnect` calls never deadlock (a slot connected during an
/// emission is first invoked on the *next* emission).
///
/// # Type Parameter
///
/// - `Args`: the argument type passed to connected slots. Use `()` for
///   signals with no payload, or a tuple for several values.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync` and can be shared between threads; slots
/// run on whichever thread calls [`emit`](Self::emit).
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    ///
    /// # Example
    ///
    /// ```
    /// use prism_stage_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("got: {s}"));
    /// signal.emit("hello".to_string());
    /// signal.disconnect(id);
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Connect a slot and receive an RAII guard that disconnects it when
    /// dropped.
    pub fn connect_guarded<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: Some(self.connect(slot)),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false`
    /// otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during batch
    /// updates to suppress cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots with `&args`.
    ///
    /// If the signal is blocked, this does nothing.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "prism_stage_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so reentrant connect/disconnect from inside a
        // slot cannot deadlock on the connection table.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.values().map(|c| c.slot.clone()).collect()
        };

        tracing::trace!(
            target: "prism_stage_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

/// RAII guard for a signal connection.
///
/// Returned by [`Signal::connect_guarded`]; the connection is disconnected
/// when the guard is dropped. Call [`release`](Self::release) to keep the
/// connection alive past the guard.
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: Option<ConnectionId>,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Detach the guard from the connection, leaving it connected.
    pub fn release(mut self) -> Option<ConnectionId> {
        self.id.take()
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.signal.disconnect(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_invokes_connected_slot() {
        let signal = Signal::<i32>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits2 = hits.clone();
        signal.connect(move |n| {
            assert_eq!(*n, 7);
            hits2.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(7);
        signal.emit(7);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn disconnect_removes_slot() {
        let signal = Signal::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits2 = hits.clone();
        let id = signal.connect(move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(signal.connection_count(), 1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        assert_eq!(signal.connection_count(), 0);

        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blocked_signal_does_not_emit() {
        let signal = Signal::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits2 = hits.clone();
        signal.connect(move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reentrant_disconnect_from_slot() {
        let signal = Arc::new(Signal::<()>::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let signal2 = signal.clone();
        let hits2 = hits.clone();
        let id = Arc::new(Mutex::new(None::<ConnectionId>));
        let id2 = id.clone();
        let conn = signal.connect(move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
            // A slot disconnecting itself mid-emission must not deadlock.
            if let Some(own) = *id2.lock() {
                signal2.disconnect(own);
            }
        });
        *id.lock() = Some(conn);

        signal.emit(());
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_disconnects_on_drop() {
        let signal = Signal::<()>::new();
        {
            let _guard = signal.connect_guarded(|_| {});
            assert_eq!(signal.connection_count(), 1);
        }
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn guard_release_keeps_connection() {
        let signal = Signal::<()>::new();
        let id = {
            let guard = signal.connect_guarded(|_| {});
            guard.release()
        };
        assert_eq!(signal.connection_count(), 1);
        assert!(signal.disconnect(id.unwrap()));
    }

    #[test]
    fn cross_thread_emit() {
        let signal = Arc::new(Signal::<u32>::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let hits2 = hits.clone();
        signal.connect(move |n| {
            hits2.fetch_add(*n as usize, Ordering::SeqCst);
        });

        let signal2 = signal.clone();
        let handle = std::thread::spawn(move || {
            signal2.emit(3);
        });
        handle.join().unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
