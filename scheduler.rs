//! Frame scheduling capability and subscription bookkeeping
//!
//! The host supplies the refresh mechanism (a browser's
//! `requestAnimationFrame`, a desktop loop, a test queue). The animator only
//! asks for "one more frame" and, when stopping, cancels the outstanding one.

/// Host refresh capability. When a scheduled frame comes due, the host calls
/// [`Animator::paint_frame`](crate::Animator::paint_frame) with its timestamp.
pub trait FrameScheduler {
    type Handle: Copy;

    /// Request one callback on the next display refresh.
    fn schedule_next(&mut self) -> Self::Handle;

    /// Drop a request that has not fired yet.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Whether the loop is armed, and which request (if any) is outstanding.
/// At most one request is outstanding at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Subscription<H> {
    subscribed: bool,
    pending: Option<H>,
}

impl<H: Copy> Subscription<H> {
    pub fn new() -> Self {
        Self {
            subscribed: false,
            pending: None,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn pending(&self) -> Option<H> {
        self.pending
    }

    /// Arm the loop and request the first frame right away.
    pub fn arm<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        self.subscribed = true;
        if self.pending.is_none() {
            self.pending = Some(scheduler.schedule_next());
        }
    }

    /// Disarm and cancel the outstanding request. A no-op when already
    /// disarmed.
    pub fn disarm<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        self.subscribed = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }

    /// The outstanding request has fired and is no longer cancellable.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Request the next frame if still armed.
    pub fn rearm<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if self.subscribed && self.pending.is_none() {
            self.pending = Some(scheduler.schedule_next());
        }
    }
}

impl<H: Copy> Default for Subscription<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::QueueScheduler;

    #[test]
    fn arm_requests_one_frame() {
        let mut scheduler = QueueScheduler::default();
        let mut sub = Subscription::new();
        sub.arm(&mut scheduler);
        assert!(sub.is_subscribed());
        assert_eq!(sub.pending(), Some(1));
        // arming again does not stack a second request
        sub.arm(&mut scheduler);
        assert_eq!(scheduler.pending, vec![1]);
    }

    #[test]
    fn disarm_cancels_outstanding_request() {
        let mut scheduler = QueueScheduler::default();
        let mut sub = Subscription::new();
        sub.arm(&mut scheduler);
        sub.disarm(&mut scheduler);
        assert!(!sub.is_subscribed());
        assert_eq!(sub.pending(), None);
        assert!(scheduler.pending.is_empty());
        assert_eq!(scheduler.cancelled, vec![1]);
    }

    #[test]
    fn disarm_twice_is_a_no_op() {
        let mut scheduler = QueueScheduler::default();
        let mut sub: Subscription<u32> = Subscription::new();
        sub.disarm(&mut scheduler);
        sub.arm(&mut scheduler);
        sub.disarm(&mut scheduler);
        sub.disarm(&mut scheduler);
        assert_eq!(scheduler.cancelled, vec![1]);
        assert!(scheduler.pending.is_empty());
    }

    #[test]
    fn rearm_only_while_subscribed() {
        let mut scheduler = QueueScheduler::default();
        let mut sub = Subscription::new();
        sub.arm(&mut scheduler);
        scheduler.pending.clear();
        sub.fired();
        sub.rearm(&mut scheduler);
        assert_eq!(sub.pending(), Some(2));

        sub.disarm(&mut scheduler);
        sub.fired();
        sub.rearm(&mut scheduler);
        assert_eq!(sub.pending(), None);
        assert_eq!(scheduler.requested(), 2);
    }
}
