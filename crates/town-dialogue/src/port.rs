//! The seam between the tick loop and the dialogue service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use town_core::TicketId;

use crate::backend::{create_backend, DialogueBackend};
use crate::{DialogueConfig, DialogueError, DialogueRequest, DialogueResult, Prompt};

/// A finished request.
#[derive(Debug)]
pub struct DialogueReply {
    pub ticket: TicketId,
    pub result: DialogueResult<String>,
}

/// Non-blocking request queue drained once per tick.
///
/// `submit` must return immediately.  `poll` hands back every reply that
/// has arrived since the last call, in arrival order; a ticket is answered
/// at most once.
pub trait DialoguePort: Send {
    fn submit(&mut self, ticket: TicketId, request: DialogueRequest);
    fn poll(&mut self) -> Vec<DialogueReply>;
}

// ── Async port ────────────────────────────────────────────────────────────────

/// Runs each request as a task on a tokio runtime.
///
/// Results come back over an unbounded mpsc channel; `poll` only calls
/// `try_recv`, so the tick loop never blocks on the network.
pub struct AsyncDialoguePort {
    runtime:   Handle,
    backend:   Arc<DialogueBackend>,
    timeout:   Duration,
    tx:        mpsc::UnboundedSender<DialogueReply>,
    rx:        mpsc::UnboundedReceiver<DialogueReply>,
    in_flight: usize,
}

impl AsyncDialoguePort {
    pub fn new(backend: DialogueBackend, timeout: Duration, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { runtime, backend: Arc::new(backend), timeout, tx, rx, in_flight: 0 }
    }

    pub fn from_config(config: &DialogueConfig, runtime: Handle) -> Self {
        Self::new(create_backend(config), config.timeout, runtime)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Requests submitted whose reply has not been polled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl DialoguePort for AsyncDialoguePort {
    fn submit(&mut self, ticket: TicketId, request: DialogueRequest) {
        let prompt  = Prompt::render(&request);
        let params  = request.params();
        let kind    = request.kind();
        let backend = Arc::clone(&self.backend);
        let tx      = self.tx.clone();
        let timeout = self.timeout;

        tracing::debug!(%ticket, %kind, backend = backend.name(), "dialogue request submitted");
        self.in_flight += 1;

        self.runtime.spawn(async move {
            let result = match tokio::time::timeout(timeout, backend.complete(&prompt, params)).await {
                Ok(result) => result,
                Err(_) => Err(DialogueError::Timeout(
                    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                )),
            };
            if tx.send(DialogueReply { ticket, result }).is_err() {
                tracing::debug!(%ticket, "dialogue port dropped before reply arrived");
            }
        });
    }

    fn poll(&mut self) -> Vec<DialogueReply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            replies.push(reply);
        }
        replies
    }
}

// ── Scripted port ─────────────────────────────────────────────────────────────

type Responder = Box<dyn FnMut(&DialogueRequest) -> DialogueResult<String> + Send>;

/// Every request submitted to a [`ScriptedDialogue`], shared with the caller.
pub type RequestLog = Arc<Mutex<Vec<(TicketId, DialogueRequest)>>>;

/// Deterministic in-process port for tests and offline runs.
///
/// The responder is called at submit time; the reply is released after
/// `latency` further polls (0 means the very next poll).
pub struct ScriptedDialogue {
    responder: Responder,
    latency:   usize,
    pending:   VecDeque<(usize, DialogueReply)>,
    log:       RequestLog,
}

impl ScriptedDialogue {
    pub fn new<F>(responder: F) -> Self
    where
        F: FnMut(&DialogueRequest) -> DialogueResult<String> + Send + 'static,
    {
        Self {
            responder: Box::new(responder),
            latency:   0,
            pending:   VecDeque::new(),
            log:       Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request fails, so callers always use the fallback.
    pub fn failing() -> Self {
        Self::new(|_| Err(DialogueError::Offline))
    }

    /// Answer requests with `replies` in order, then fail.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue: VecDeque<String> = replies.into_iter().map(Into::into).collect();
        Self::new(move |_| queue.pop_front().ok_or(DialogueError::Offline))
    }

    /// Hold each reply for `polls` additional polls.
    pub fn with_latency(mut self, polls: usize) -> Self {
        self.latency = polls;
        self
    }

    /// Handle to the submitted-request log; stays valid after the port moves.
    pub fn log(&self) -> RequestLog {
        Arc::clone(&self.log)
    }
}

impl DialoguePort for ScriptedDialogue {
    fn submit(&mut self, ticket: TicketId, request: DialogueRequest) {
        let result = (self.responder)(&request);
        if let Ok(mut log) = self.log.lock() {
            log.push((ticket, request));
        }
        self.pending.push_back((self.latency, DialogueReply { ticket, result }));
    }

    fn poll(&mut self) -> Vec<DialogueReply> {
        let mut ready = Vec::new();
        let mut waiting = VecDeque::with_capacity(self.pending.len());
        for (remaining, reply) in self.pending.drain(..) {
            if remaining == 0 {
                ready.push(reply);
            } else {
                waiting.push_back((remaining - 1, reply));
            }
        }
        self.pending = waiting;
        ready
    }
}
