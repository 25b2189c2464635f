//! Frame scheduling seam between the engine and its host.
//!
//! The engine never owns a timer. After each frame it asks the scheduler for one more
//! callback and keeps the returned handle so `stop` can cancel it. The host decides what a
//! "frame" is (an animation frame, a terminal redraw, a test step) and calls
//! [`Game::on_frame`](super::engine::Game::on_frame) when a requested frame comes due.

/// Opaque token for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to request and cancel the next frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancelling a handle that already fired or was never issued is a no-op
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot scheduler for hosts that poll once per rendered frame.
///
/// At most one frame is outstanding at a time, matching the engine's one-tick-in-flight loop.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Option<FrameHandle>,
    next_id: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the outstanding request, if any. The host then delivers the frame.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_take() {
        let mut queue = FrameQueue::new();
        assert!(queue.take_due().is_none());

        let handle = queue.request_frame();
        assert!(queue.is_pending());
        assert_eq!(queue.take_due(), Some(handle));
        assert!(queue.take_due().is_none());
    }

    #[test]
    fn test_cancel_clears_matching_request() {
        let mut queue = FrameQueue::new();
        let handle = queue.request_frame();

        queue.cancel_frame(handle);
        assert!(!queue.is_pending());
    }

    #[test]
    fn test_stale_cancel_keeps_newer_request() {
        let mut queue = FrameQueue::new();
        let first = queue.request_frame();
        let second = queue.request_frame();
        assert_ne!(first, second);

        queue.cancel_frame(first);
        assert_eq!(queue.take_due(), Some(second));
    }
}
