#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Running/Stopped bookkeeping for a self-rescheduling frame loop.
///
/// The scheduler handle (e.g. a `requestAnimationFrame` id) of the one
/// callback in flight is kept so `stop()` can cancel it. A callback that
/// still fires after `stop()` sees `Stopped` in `begin_frame()` and bails.
#[derive(Debug)]
pub struct FrameLoop<H = i32> {
    state: LoopState,
    pending: Option<H>,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self {
            state: LoopState::Stopped,
            pending: None,
        }
    }
}

impl<H> FrameLoop<H> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Stopped -> Running. Returns `false` when already running, in which
    /// case the caller must not schedule a second callback.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    pub fn arm(&mut self, handle: H) {
        self.pending = Some(handle);
    }

    // The fired callback is no longer pending.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.is_running()
    }

    pub fn stop(&mut self) -> Option<H> {
        self.state = LoopState::Stopped;
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&H> {
        self.pending.as_ref()
    }
}
