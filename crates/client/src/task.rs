//! Work submitted to the session from other threads.

use std::{cell::Cell, io, sync::Arc};

use flume::{Receiver, Sender};

use crate::{actions::Context, conn::Closer, error::HandleError};

/// A unit of work run on the session thread between packets.
pub type Task = Box<dyn FnOnce(&mut Context) -> anyhow::Result<()> + Send>;

thread_local! {
    static IN_SESSION: Cell<bool> = Cell::new(false);
}

/// Marks the current thread as running a session until dropped.
pub(crate) struct SessionThreadGuard {
    previous: bool,
}

impl SessionThreadGuard {
    pub fn enter() -> Self {
        let previous = IN_SESSION.with(|flag| flag.replace(true));
        Self { previous }
    }
}

impl Drop for SessionThreadGuard {
    fn drop(&mut self) {
        IN_SESSION.with(|flag| flag.set(self.previous));
    }
}

fn in_session() -> bool {
    IN_SESSION.with(Cell::get)
}

pub(crate) fn queue() -> (Sender<Task>, Receiver<Task>) {
    flume::unbounded()
}

/// A cloneable handle for interacting with a running session
/// from other threads.
///
/// All access to the game state and the connection goes through
/// the session's task queue. Tasks run in submission order and
/// always before the session reads its next packet.
#[derive(Clone)]
pub struct SessionHandle {
    tasks: Sender<Task>,
    closer: Arc<dyn Closer>,
}

impl SessionHandle {
    pub(crate) fn new(tasks: Sender<Task>, closer: Arc<dyn Closer>) -> Self {
        Self { tasks, closer }
    }

    /// Queues `task` without waiting for it to run.
    ///
    /// If the task returns an error, the session fails with it.
    pub fn submit(
        &self,
        task: impl FnOnce(&mut Context) -> anyhow::Result<()> + Send + 'static,
    ) -> Result<(), HandleError> {
        self.tasks
            .send(Box::new(task))
            .map_err(|_| HandleError::SessionClosed)
    }

    /// Runs `f` on the session thread and waits for its result.
    ///
    /// Must not be called from the session thread itself (for
    /// example from an event handler), where it would wait on
    /// itself forever.
    pub fn call<R>(
        &self,
        f: impl FnOnce(&mut Context) -> R + Send + 'static,
    ) -> Result<R, HandleError>
    where
        R: Send + 'static,
    {
        if in_session() {
            return Err(HandleError::Reentrant);
        }

        let (reply, result) = flume::bounded(1);
        self.submit(move |cx| {
            // the caller may have stopped waiting
            let _ = reply.send(f(cx));
            Ok(())
        })?;
        result.recv().map_err(|_| HandleError::SessionClosed)
    }

    /// Closes the transport. A read in progress on the session
    /// thread fails, ending the session.
    pub fn close(&self) -> io::Result<()> {
        self.closer.close()
    }

    /// Returns whether the session has ended.
    pub fn is_closed(&self) -> bool {
        self.tasks.is_disconnected()
    }
}
