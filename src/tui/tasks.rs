//! Background requests.
//!
//! Each `Request` runs on its own tokio task and reports back through the
//! completion channel, tagged with the id it was spawned under. The event
//! loop keeps the abort handles so Esc can cancel whatever is still in
//! flight. A cancelled request's id is forgotten, so a result it managed to
//! send before the abort is dropped instead of applied.

use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::api::{PersonaApi, perform};
use crate::core::action::{Action, Operation, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// A finished request's terminal action.
#[derive(Debug)]
pub struct Completed {
    pub id: RequestId,
    pub action: Action,
}

/// Spawn `request` and forward its terminal action to `tx`.
pub fn spawn_request(
    api: Arc<dyn PersonaApi>,
    id: RequestId,
    request: Request,
    downloads_dir: PathBuf,
    tx: mpsc::Sender<Completed>,
) -> AbortHandle {
    let operation = request.operation();
    info!("Spawning {operation:?} request ({id:?})");

    let handle = tokio::spawn(async move {
        let action = perform(api.as_ref(), request, &downloads_dir).await;
        if tx.send(Completed { id, action }).is_err() {
            warn!("Failed to send {operation:?} result: receiver dropped");
        }
    });
    handle.abort_handle()
}

/// Requests that have been spawned and whose result has not been accepted.
#[derive(Default)]
pub struct InFlight {
    next_id: u64,
    tasks: Vec<(RequestId, Operation, AbortHandle)>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `request` under a fresh id and track it.
    pub fn spawn(
        &mut self,
        api: Arc<dyn PersonaApi>,
        request: Request,
        downloads_dir: PathBuf,
        tx: mpsc::Sender<Completed>,
    ) -> RequestId {
        let id = self.allocate();
        let operation = request.operation();
        let handle = spawn_request(api, id, request, downloads_dir, tx);
        self.tasks.push((id, operation, handle));
        id
    }

    fn allocate(&mut self) -> RequestId {
        self.next_id += 1;
        RequestId(self.next_id)
    }

    /// The action of a finished request, or `None` if it was cancelled.
    pub fn accept(&mut self, completed: Completed) -> Option<Action> {
        let Some(index) = self.tasks.iter().position(|(id, ..)| *id == completed.id) else {
            debug!("Dropping result of cancelled request {:?}", completed.id);
            return None;
        };
        self.tasks.remove(index);
        Some(completed.action)
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Abort every pending task, returning the operations that were cut short.
    pub fn cancel_all(&mut self) -> Vec<Operation> {
        self.tasks
            .drain(..)
            .map(|(_, operation, handle)| {
                handle.abort();
                operation
            })
            .collect()
    }
}
