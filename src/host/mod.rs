//! Hosting of the wrapped application.
//!
//! The application is built on the first invocation that needs it and then
//! kept for the lifetime of the execution context, so warm invocations skip
//! its start-up cost. It is dropped only when Lambda recycles the context.

pub mod echo;

pub use echo::EchoApplication;

use lambda_runtime::tracing::{error, info};
use tokio::sync::OnceCell;

use crate::models::error::Result;
use crate::models::{AdapterError, CanonicalRequest, CanonicalResponse};

/// Synchronous request/response interface implemented by wrapped applications.
pub trait Application: Send + Sync {
    /// Handles a single request.
    ///
    /// # Errors
    ///
    /// Any error is reported to the client as a `500` response.
    fn call(&self, request: CanonicalRequest) -> anyhow::Result<CanonicalResponse>;
}

impl<F> Application for F
where
    F: Fn(CanonicalRequest) -> anyhow::Result<CanonicalResponse> + Send + Sync,
{
    fn call(&self, request: CanonicalRequest) -> anyhow::Result<CanonicalResponse> {
        self(request)
    }
}

type Loader<A> = Box<dyn Fn() -> anyhow::Result<A> + Send + Sync>;

/// Lazily loaded, reused application instance.
pub struct ApplicationHost<A> {
    app: OnceCell<A>,
    loader: Loader<A>,
}

impl<A: Application> ApplicationHost<A> {
    /// Creates a host that builds its application with `loader` on first use.
    pub fn new(loader: impl Fn() -> anyhow::Result<A> + Send + Sync + 'static) -> Self {
        Self {
            app: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// Creates a host around an application that is already built.
    pub fn with_application(app: A) -> Self {
        Self {
            app: OnceCell::new_with(Some(app)),
            loader: Box::new(|| Err(anyhow::anyhow!("application is preloaded"))),
        }
    }

    /// Returns the application, loading it if this is the first use.
    ///
    /// Concurrent first calls share a single load. A failed load leaves the
    /// host empty so the next invocation tries again.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Load`] if the loader fails.
    pub async fn application(&self) -> Result<&A> {
        self.app
            .get_or_try_init(|| async {
                info!(message = "Loading application");
                (self.loader)().map_err(|e| {
                    error!(error = %format!("{e:#}"), "Application failed to load");
                    AdapterError::Load(e)
                })
            })
            .await
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.app.initialized()
    }
}
