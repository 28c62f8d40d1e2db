//! Transactional scopes over a sub-structure of the problem model.
//!
//! A scope snapshots its target on entry and puts the snapshot back on every
//! failing exit. Only the outermost scope of a turn recovers from store and
//! modeling errors: it prints the rephrase message once and swallows the
//! error. Nested scopes restore their own target and re-raise, so the
//! outermost scope sees the failure too.
//!
//! Declarations that the store accepted before the failure stay on the store.

use std::any;
use std::ops::{Deref, DerefMut};

use crate::{StageCtx, TurnError};

/// Restores the snapshot when dropped without [`Transaction::commit`].
pub struct Transaction<'a, T: Clone> {
    target: &'a mut T,
    snapshot: Option<T>,
}

impl<'a, T: Clone> Transaction<'a, T> {
    pub fn begin(target: &'a mut T) -> Self {
        let snapshot = Some(target.clone());
        Self { target, snapshot }
    }

    /// Keep the mutations made through this transaction.
    pub fn commit(mut self) {
        self.snapshot = None;
    }
}

impl<T: Clone> Deref for Transaction<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: Clone> DerefMut for Transaction<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Clone> Drop for Transaction<'_, T> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.target = snapshot;
        }
    }
}

/// Run `body` as the outermost scope of a turn.
///
/// Returns `Ok(None)` when a store or modeling error was recovered.
pub fn outermost<T, R>(
    target: &mut T,
    ctx: &mut StageCtx<'_>,
    body: impl FnOnce(&mut T, &mut StageCtx<'_>) -> Result<R, TurnError>,
) -> Result<Option<R>, TurnError>
where
    T: Clone,
{
    match run(target, ctx, body) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_recoverable() => {
            ctx.out.please_repeat(&err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Run `body` inside an enclosing scope. Errors always propagate.
pub fn nested<T, R>(
    target: &mut T,
    ctx: &mut StageCtx<'_>,
    body: impl FnOnce(&mut T, &mut StageCtx<'_>) -> Result<R, TurnError>,
) -> Result<R, TurnError>
where
    T: Clone,
{
    run(target, ctx, body)
}

fn run<T, R>(
    target: &mut T,
    ctx: &mut StageCtx<'_>,
    body: impl FnOnce(&mut T, &mut StageCtx<'_>) -> Result<R, TurnError>,
) -> Result<R, TurnError>
where
    T: Clone,
{
    let mut transaction = Transaction::begin(target);
    match body(&mut *transaction, ctx) {
        Ok(value) => {
            transaction.commit();
            Ok(value)
        }
        Err(err) => {
            drop(transaction);
            tracing::debug!(
                target_type = any::type_name::<T>(),
                recoverable = err.is_recoverable(),
                "rolled back: {err}"
            );
            Err(err)
        }
    }
}
