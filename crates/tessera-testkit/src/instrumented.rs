//! Instrumented handlers
//!
//! Wrappers that observe how a service drives its dependencies. Tests use them
//! to assert that rejected calls never reach the authorizer or the store.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tessera_authorization::AuthorizationEffects;
use tessera_core::{Permission, Result};
use tessera_store::{EntityManager, EntitySession};
use tokio::sync::Mutex;

/// Authorizer that records every permission it is asked about
#[derive(Debug)]
pub struct RecordingAuthorizer<A> {
    inner: A,
    checked: Mutex<Vec<Permission>>,
}

impl<A> RecordingAuthorizer<A> {
    /// Wrap an authorizer
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            checked: Mutex::new(Vec::new()),
        }
    }

    /// Permissions checked so far, oldest first
    pub async fn checked(&self) -> Vec<Permission> {
        self.checked.lock().await.clone()
    }

    /// Number of permission checks so far
    pub async fn check_count(&self) -> usize {
        self.checked.lock().await.len()
    }
}

#[async_trait]
impl<A: AuthorizationEffects> AuthorizationEffects for RecordingAuthorizer<A> {
    async fn is_permitted(&self, permission: &Permission) -> Result<bool> {
        self.checked.lock().await.push(permission.clone());
        self.inner.is_permitted(permission).await
    }
}

/// Session that counts how often it is entered
#[derive(Debug, Default)]
pub struct CountingSession<S> {
    inner: S,
    calls: AtomicUsize,
}

impl<S> CountingSession<S> {
    /// Wrap a session
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of session calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The wrapped session
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: EntitySession> EntitySession for CountingSession<S> {
    async fn on_result<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&dyn EntityManager) -> Result<T> + Send,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.on_result(f).await
    }

    async fn on_transacted_insert<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn EntityManager) -> Result<T> + Send,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.on_transacted_insert(f).await
    }

    async fn on_transacted_action<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut dyn EntityManager) -> Result<()> + Send,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.on_transacted_action(f).await
    }
}
