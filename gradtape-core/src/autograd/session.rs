//! Scoped recording sessions.
//!
//! At most one tape records per thread. [`session`] installs a fresh tape in
//! the thread-local slot and returns a guard; dropping the guard (normally or
//! while unwinding) clears the slot. Primitives query [`active_tape`] and skip
//! all bookkeeping when it returns `None`.

use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::autograd::tape::Tape;
use crate::error::GradTapeError;
use crate::value::Value;
use std::cell::{Ref, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
    static ACTIVE_TAPE: RefCell<Option<TapeHandle>> = const { RefCell::new(None) };
}

/// Shared handle to a tape installed by a session.
#[derive(Debug, Clone)]
pub struct TapeHandle {
    tape: Rc<RefCell<Tape>>,
}

impl TapeHandle {
    fn new() -> Self {
        TapeHandle {
            tape: Rc::new(RefCell::new(Tape::new())),
        }
    }

    fn with_tape_mut<R>(
        &self,
        f: impl FnOnce(&mut Tape) -> Result<R, GradTapeError>,
    ) -> Result<R, GradTapeError> {
        let mut tape = self
            .tape
            .try_borrow_mut()
            .map_err(|_| GradTapeError::TapeBusy)?;
        f(&mut tape)
    }

    /// See [`Tape::add_partial_derivative`].
    ///
    /// # Errors
    /// `TapeBusy` if called from inside a traversal of the same tape, and the
    /// errors of [`Tape::add_partial_derivative`].
    pub fn add_partial_derivative<B>(
        &self,
        grad_func: B,
        owner: Node,
        result: Node,
    ) -> Result<(), GradTapeError>
    where
        B: BackwardOp + 'static,
    {
        self.with_tape_mut(|tape| tape.add_partial_derivative(grad_func, owner, result))
    }

    /// See [`Tape::set_gradient_target`].
    pub fn set_gradient_target(&self, target: &Node) -> Result<(), GradTapeError> {
        self.with_tape_mut(|tape| tape.set_gradient_target(target))
    }

    /// See [`Tape::get_gradient`].
    pub fn get_gradient(&self, origin: &Value) -> Result<Value, GradTapeError> {
        self.with_tape_mut(|tape| tape.get_gradient(origin))
    }

    /// Read access to the underlying tape, for inspection.
    pub fn borrow(&self) -> Ref<'_, Tape> {
        self.tape.borrow()
    }

    pub fn ptr_eq(&self, other: &TapeHandle) -> bool {
        Rc::ptr_eq(&self.tape, &other.tape)
    }
}

/// Guard for a recording session. The tape stays active on this thread until
/// the guard is dropped.
#[derive(Debug)]
pub struct TapeSession {
    handle: TapeHandle,
    // Tied to the thread whose slot it owns.
    _not_send: PhantomData<*const ()>,
}

impl TapeSession {
    pub fn tape(&self) -> &TapeHandle {
        &self.handle
    }
}

impl Drop for TapeSession {
    fn drop(&mut self) {
        ACTIVE_TAPE.with(|slot| {
            slot.borrow_mut().take();
        });
        log::debug!("Recording session closed");
    }
}

/// Opens a recording session with a fresh tape.
///
/// # Errors
/// `SessionAlreadyActive` if this thread already has an active session; the
/// existing tape is left untouched.
pub fn session() -> Result<TapeSession, GradTapeError> {
    ACTIVE_TAPE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(GradTapeError::SessionAlreadyActive);
        }
        let handle = TapeHandle::new();
        *slot = Some(handle.clone());
        log::debug!("Recording session opened");
        Ok(TapeSession {
            handle,
            _not_send: PhantomData,
        })
    })
}

/// Returns the tape of the current thread's session, if any.
pub fn active_tape() -> Option<TapeHandle> {
    ACTIVE_TAPE.with(|slot| slot.borrow().clone())
}

/// True while a session is open on this thread.
pub fn is_recording() -> bool {
    ACTIVE_TAPE.with(|slot| slot.borrow().is_some())
}

/// Runs `f` inside a fresh session and closes it afterwards, whatever `f`
/// returns.
pub fn with_session<R>(
    f: impl FnOnce(&TapeHandle) -> Result<R, GradTapeError>,
) -> Result<R, GradTapeError> {
    let session = session()?;
    f(session.tape())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
