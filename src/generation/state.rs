//! Run state for the bulk orchestrator: an Idle/Running state machine behind a mutex.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::Level;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
}

/// Point-in-time view of the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorStatus {
    pub phase: RunPhase,
    pub is_running: bool,
    pub progress_percent: f64,
    pub current_level: Option<Level>,
    pub current_lesson_ordinal: u32,
    pub total_lessons: u32,
}

/// Cooperative cancellation flag, checked between items.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct StateInner {
    phase: RunPhase,
    progress_percent: f64,
    current_level: Option<Level>,
    current_lesson_ordinal: u32,
    total_lessons: u32,
    active_token: Option<CancellationToken>,
}

#[derive(Debug)]
pub(crate) struct RunState {
    inner: Mutex<StateInner>,
}

impl RunState {
    pub(crate) fn new(total_lessons: u32) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(StateInner {
                phase: RunPhase::Idle,
                progress_percent: 0.0,
                current_level: None,
                current_lesson_ordinal: 0,
                total_lessons,
                active_token: None,
            }),
        })
    }

    /// Transition Idle -> Running. The returned guard moves the state back to Idle when
    /// dropped, including during unwinding.
    pub(crate) fn start(self: &Arc<Self>, token: CancellationToken) -> Result<RunGuard, ApiError> {
        let mut inner = self.inner.lock();
        if inner.phase == RunPhase::Running {
            return Err(ApiError::AlreadyRunning);
        }
        inner.phase = RunPhase::Running;
        inner.progress_percent = 0.0;
        inner.current_level = None;
        inner.current_lesson_ordinal = 0;
        inner.active_token = Some(token);
        Ok(RunGuard {
            state: Arc::clone(self),
        })
    }

    pub(crate) fn set_current(&self, level: Level, ordinal: u32) {
        let mut inner = self.inner.lock();
        inner.current_level = Some(level);
        inner.current_lesson_ordinal = ordinal;
    }

    pub(crate) fn record_progress(&self, percent: f64) {
        let mut inner = self.inner.lock();
        if percent > inner.progress_percent {
            inner.progress_percent = percent.min(100.0);
        }
    }

    pub(crate) fn cancel_active(&self) -> bool {
        let inner = self.inner.lock();
        match &inner.active_token {
            Some(token) if inner.phase == RunPhase::Running => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn status(&self) -> OrchestratorStatus {
        let inner = self.inner.lock();
        OrchestratorStatus {
            phase: inner.phase,
            is_running: inner.phase == RunPhase::Running,
            progress_percent: inner.progress_percent,
            current_level: inner.current_level,
            current_lesson_ordinal: inner.current_lesson_ordinal,
            total_lessons: inner.total_lessons,
        }
    }
}

/// Held for the duration of a run.
#[derive(Debug)]
pub(crate) struct RunGuard {
    state: Arc<RunState>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut inner = self.state.inner.lock();
        inner.phase = RunPhase::Idle;
        inner.active_token = None;
    }
}
