use std::sync::Mutex;

use tokio::sync::oneshot;

/// What a parked request receives when the cycle settles: the fresh access
/// credential, or the refresh failure detail.
pub(crate) type RefreshOutcome = Result<String, String>;

/// Where a 401-interrupted request stands relative to the current cycle.
pub(crate) enum RefreshTicket {
    /// No refresh was in flight; this request drives the refresh call.
    Leader,
    /// A refresh is already in flight; park until it settles.
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

/// Single-flight refresh gate. `refreshing` is true exactly while one refresh
/// call is in flight; the waiter queue grows during that window and is drained
/// once, in enqueue order, when the call settles. Outside a cycle the queue is
/// empty and the flag is false.
pub(crate) struct RefreshGate {
    state: Mutex<GateState>,
}

#[derive(Default)]
struct GateState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

impl RefreshGate {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(GateState::default()),
        }
    }

    pub(crate) fn join(&self) -> RefreshTicket {
        let mut state = self.state.lock().expect("refresh gate poisoned");
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            RefreshTicket::Waiter(rx)
        } else {
            state.refreshing = true;
            RefreshTicket::Leader
        }
    }

    /// Reset the flag and release every waiter, in the order they queued.
    pub(crate) fn settle(&self, outcome: &RefreshOutcome) {
        let waiters = {
            let mut state = self.state.lock().expect("refresh gate poisoned");
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}
