//! The primary execution context.
//!
//! All state that a UI surface reads lives inside a [`PrimaryContext`] and is
//! only ever touched by whoever owns it. Background tasks never see that state:
//! they hold a [`MainHandle`] and post closures that the owner applies in FIFO
//! order on its next turn.

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

pub struct PrimaryContext<S> {
    state: S,
    tx: UnboundedSender<Job<S>>,
    rx: UnboundedReceiver<Job<S>>,
}

/// Cloneable sender side of a [`PrimaryContext`].
pub struct MainHandle<S> {
    tx: UnboundedSender<Job<S>>,
}

impl<S> Clone for MainHandle<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S> MainHandle<S> {
    /// Queue `job` for the primary context. Returns `false` if the context is gone.
    pub fn dispatch<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            debug!("Primary context dropped, discarding job");
            return false;
        }
        true
    }
}

impl<S> PrimaryContext<S> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        PrimaryContext { state, tx, rx }
    }

    pub fn handle(&self) -> MainHandle<S> {
        MainHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// Apply every job already queued without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job(&mut self.state);
            ran += 1;
        }
        ran
    }

    /// Wait for at least one job, then drain whatever else is queued.
    pub async fn run_next(&mut self) -> usize {
        // The context holds a sender itself, so the channel never closes here.
        let Some(job) = self.rx.recv().await else {
            return 0;
        };
        job(&mut self.state);
        1 + self.run_pending()
    }

    /// Keep taking turns until `done` holds for the state.
    pub async fn run_until<F>(&mut self, mut done: F)
    where
        F: FnMut(&S) -> bool,
    {
        self.run_pending();
        while !done(&self.state) {
            self.run_next().await;
        }
    }
}
