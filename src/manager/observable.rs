// SPDX-License-Identifier: MPL-2.0
//! Multi-subscriber broadcast with replay of the latest value.
//!
//! Every subscriber owns an unbounded queue, so a slow consumer sees every
//! published value in order: nothing is coalesced and nothing is dropped.
//! The latest value and the subscriber list sit behind one mutex, which
//! makes "replay current value, then register" atomic with respect to
//! `publish`.

use futures_util::Stream;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::mpsc;

struct Inner<T> {
    latest: T,
    senders: Vec<mpsc::UnboundedSender<T>>,
}

pub(crate) struct Broadcast<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> Broadcast<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                latest: initial,
                senders: Vec::new(),
            }),
        }
    }

    /// Registers a subscriber whose queue already holds the latest value.
    pub(crate) fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // Cannot fail: `rx` is alive.
        let _ = tx.send(inner.latest.clone());
        inner.senders.push(tx);
        Subscription { rx }
    }

    /// Records `value` as latest and queues it for every live subscriber.
    pub(crate) fn publish(&self, value: T) {
        let mut inner = self.lock();
        inner.senders.retain(|tx| tx.send(value.clone()).is_ok());
        inner.latest = value;
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.senders.retain(|tx| !tx.is_closed());
        inner.senders.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receiving end of an observed value.
///
/// The first item is the value current at subscription time; each later item
/// is one committed change, in commit order. The stream only ends once the
/// owning [`LocaleManager`](super::LocaleManager) is dropped.
///
/// Implements [`Stream`], so it can be driven with `StreamExt::next`, or
/// polled directly with [`recv`](Self::recv) / [`try_recv`](Self::try_recv).
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Waits for the next value. `None` means the manager is gone.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Takes the next queued value without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Takes every value queued so far without waiting.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Ok(value) = self.rx.try_recv() {
            values.push(value);
        }
        values
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}
