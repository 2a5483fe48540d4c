//! Lazily initialised, shared embedding provider handle.
//!
//! Building a provider can be expensive (reading a vector table, setting up
//! an HTTP client), so [`ModelCache`] runs its loader at most once. Callers
//! that arrive while the load is running wait for the same result. A failed
//! load leaves the cache empty and the next caller tries again.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::error::GameResult;
use crate::providers::create_provider;

/// Future returned by a provider loader.
pub type ProviderFuture = BoxFuture<'static, GameResult<Arc<dyn EmbeddingProvider>>>;

type Loader = Box<dyn Fn() -> ProviderFuture + Send + Sync>;

/// Lifecycle of the cached provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Nobody has asked for the provider yet, or the last load failed.
    Uninitialized,
    /// A load is in flight.
    Loading,
    /// The provider is available.
    Ready,
}

/// At-most-once holder of an [`EmbeddingProvider`].
pub struct ModelCache {
    cell: OnceCell<Arc<dyn EmbeddingProvider>>,
    loading: AtomicBool,
    loader: Loader,
}

impl ModelCache {
    /// Cache whose provider is produced by `loader` on first use.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> ProviderFuture + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loading: AtomicBool::new(false),
            loader: Box::new(loader),
        }
    }

    /// Cache that builds its provider from `config` on first use.
    pub fn from_config(config: Config) -> Self {
        Self::new(move || {
            let config = config.clone();
            async move { create_provider(&config) }.boxed()
        })
    }

    /// Cache that is already holding `provider`.
    pub fn ready(provider: Arc<dyn EmbeddingProvider>) -> Self {
        let cached = Arc::clone(&provider);
        Self {
            cell: OnceCell::new_with(Some(provider)),
            loading: AtomicBool::new(false),
            loader: Box::new(move || {
                let provider = Arc::clone(&cached);
                async move { Ok(provider) }.boxed()
            }),
        }
    }

    /// The provider, loading it first if needed.
    pub async fn get(&self) -> GameResult<Arc<dyn EmbeddingProvider>> {
        let provider = self
            .cell
            .get_or_try_init(|| async {
                let _guard = LoadingGuard::enter(&self.loading);
                tracing::debug!("loading embedding provider");
                (self.loader)().await
            })
            .await?;
        Ok(Arc::clone(provider))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModelState {
        if self.cell.initialized() {
            ModelState::Ready
        } else if self.loading.load(Ordering::Acquire) {
            ModelState::Loading
        } else {
            ModelState::Uninitialized
        }
    }

    /// Whether the provider has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("state", &self.state())
            .field("provider", &self.cell.get().map(|p| p.name()))
            .finish_non_exhaustive()
    }
}

/// Clears the loading flag even if the load future is dropped midway.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
