//! Model catalog resolution.
//!
//! [`ModelCatalogResolver`] turns {vendor, credential, optional endpoint} into a
//! [`ModelQueryResult`] by running the vendor's probe strategy with a bounded
//! timeout. Every failure is converted into a [`QueryError`]; nothing escapes
//! as a panic or raw transport error.
//!
//! Calls are independent: the resolver holds only immutable configuration, so
//! one instance can be shared behind an `Arc` and used concurrently.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use apikeep_models::registry::VendorRegistry;
//! use apikeep_models::resolver::ModelCatalogResolver;
//!
//! # async fn example() {
//! let resolver = ModelCatalogResolver::new(Arc::new(VendorRegistry::builtin()));
//! match resolver.resolve_models("OpenAI", "sk-...", None).await {
//!     Ok(catalog) => println!("{} models", catalog.len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

mod listing;
pub mod transport;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::auth::ApiKey;
use crate::query::{CatalogSource, ModelCatalog, ModelQueryResult, QueryError, QueryErrorKind};
use crate::registry::{
    AuthStyle, ListingProbe, ProbeStrategy, SyntheticProbe, VendorProfile, VendorRegistry,
};

pub use transport::{
    HttpTransport, ProbeMethod, ProbeRequest, ProbeResponse, ProbeTransport, TransportError,
};

/// Default bound for a single probe attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Hint attached to manual-entry catalogs.
pub const MANUAL_ENTRY_HINT: &str = "enter the model name manually";

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Upper bound for one probe, connection and body included.
    pub timeout: Duration,
    /// Sent as `User-Agent` on every probe.
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("apikeep/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// What a resolution needs after the pre-flight checks.
enum Plan<'a> {
    /// Answered without network I/O.
    Done(ModelCatalog),
    Listing(&'a VendorProfile, &'a ListingProbe, ProbeRequest),
    Synthetic(&'a VendorProfile, &'a SyntheticProbe, ProbeRequest),
}

/// Resolves the models available to a credential, per vendor strategy.
pub struct ModelCatalogResolver {
    registry: Arc<VendorRegistry>,
    transport: Arc<dyn ProbeTransport>,
    config: ResolverConfig,
}

impl ModelCatalogResolver {
    /// Create a resolver using the HTTP transport and default settings.
    pub fn new(registry: Arc<VendorRegistry>) -> Self {
        Self {
            registry,
            transport: Arc::new(HttpTransport::new()),
            config: ResolverConfig::default(),
        }
    }

    /// Replace the transport (stubs, custom clients).
    pub fn with_transport(mut self, transport: Arc<dyn ProbeTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &VendorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the model catalog for a vendor and credential.
    ///
    /// `endpoint_override` replaces the registry's default endpoint when it is
    /// non-blank.
    pub async fn resolve_models(
        &self,
        vendor: &str,
        credential: &str,
        endpoint_override: Option<&str>,
    ) -> ModelQueryResult {
        let never = CancellationToken::new();
        self.resolve_models_cancellable(vendor, credential, endpoint_override, &never)
            .await
    }

    /// Like [`resolve_models`](Self::resolve_models), but returns
    /// `Cancelled` as soon as `cancel` fires.
    pub async fn resolve_models_cancellable(
        &self,
        vendor: &str,
        credential: &str,
        endpoint_override: Option<&str>,
        cancel: &CancellationToken,
    ) -> ModelQueryResult {
        if cancel.is_cancelled() {
            return Err(QueryError::cancelled());
        }

        match self.plan(vendor, credential, endpoint_override)? {
            Plan::Done(catalog) => Ok(catalog),
            Plan::Listing(profile, probe, request) => {
                let response = self.execute(&profile.name, request, cancel).await?;
                interpret_listing(profile, probe, response)
            }
            Plan::Synthetic(profile, probe, request) => {
                let response = self.execute(&profile.name, request, cancel).await?;
                interpret_synthetic(profile, probe, response)
            }
        }
    }

    /// Run a resolution on the tokio runtime and return a handle the caller
    /// can await or cancel.
    pub fn spawn(
        self: &Arc<Self>,
        vendor: &str,
        credential: &ApiKey,
        endpoint_override: Option<&str>,
    ) -> ResolveHandle {
        let cancel = CancellationToken::new();
        let resolver = Arc::clone(self);
        let vendor = vendor.to_string();
        let credential = credential.clone();
        let endpoint = endpoint_override.map(str::to_string);
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            resolver
                .resolve_models_cancellable(
                    &vendor,
                    credential.expose_secret(),
                    endpoint.as_deref(),
                    &token,
                )
                .await
        });

        ResolveHandle { task, cancel }
    }

    fn plan<'a>(
        &'a self,
        vendor: &str,
        credential: &str,
        endpoint_override: Option<&str>,
    ) -> Result<Plan<'a>, QueryError> {
        let Some(profile) = self.registry.profile(vendor) else {
            debug!(vendor, "vendor not registered");
            return Err(QueryError::unsupported_vendor(vendor));
        };

        let credential = credential.trim();
        let endpoint = endpoint_override.map(str::trim).filter(|e| !e.is_empty());

        match &profile.probe {
            ProbeStrategy::ManualEntry => Ok(Plan::Done(ModelCatalog::manual(MANUAL_ENTRY_HINT))),
            ProbeStrategy::StaticOnly => Ok(Plan::Done(ModelCatalog::from_presets(
                &profile.preset_models,
                CatalogSource::Preset,
            ))),
            ProbeStrategy::Listing(probe) => {
                require_credential(credential)?;
                if probe.requires_endpoint && endpoint.is_none() {
                    return Err(QueryError::missing_credential(format!(
                        "endpoint required for {}",
                        profile.name
                    )));
                }
                let base = endpoint.unwrap_or(&profile.default_endpoint);
                let mut request = self.request(ProbeMethod::Get, base, &probe.path);
                attach_auth(&mut request, &probe.auth, credential);
                Ok(Plan::Listing(profile, probe, request))
            }
            ProbeStrategy::Synthetic(probe) => {
                require_credential(credential)?;
                let base = endpoint.unwrap_or(&profile.default_endpoint);
                let mut request = self.request(ProbeMethod::Post, base, &probe.path);
                attach_auth(&mut request, &probe.auth, credential);
                request.headers.extend(probe.headers.iter().cloned());
                request.body = Some(probe.body.clone());
                Ok(Plan::Synthetic(profile, probe, request))
            }
        }
    }

    fn request(&self, method: ProbeMethod, base: &str, path: &str) -> ProbeRequest {
        ProbeRequest {
            method,
            url: join_url(base, path),
            headers: vec![("User-Agent".to_string(), self.config.user_agent.clone())],
            query: Vec::new(),
            body: None,
            timeout: self.config.timeout,
        }
    }

    async fn execute(
        &self,
        vendor: &str,
        request: ProbeRequest,
        cancel: &CancellationToken,
    ) -> Result<ProbeResponse, QueryError> {
        let timeout = self.config.timeout;
        debug!(vendor, method = ?request.method, url = %request.url, "probing vendor");

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(vendor, "probe cancelled");
                return Err(QueryError::cancelled());
            }
            outcome = tokio::time::timeout(timeout, self.transport.send(request)) => outcome,
        };

        match outcome {
            Err(_) | Ok(Err(TransportError::Timeout)) => Err(QueryError::new(
                QueryErrorKind::Timeout,
                format!("no response from {vendor} within {}s", timeout.as_secs_f32()),
            )),
            Ok(Err(TransportError::Unreachable(reason))) => Err(QueryError::new(
                QueryErrorKind::NetworkUnreachable,
                format!("could not reach {vendor}: {reason}"),
            )),
            Ok(Err(TransportError::Other(reason))) => Err(QueryError::internal(reason)),
            Ok(Ok(response)) => {
                debug!(vendor, status = response.status, "probe response");
                Ok(response)
            }
        }
    }
}

/// Handle to a spawned resolution.
#[derive(Debug)]
pub struct ResolveHandle {
    task: JoinHandle<ModelQueryResult>,
    cancel: CancellationToken,
}

impl ResolveHandle {
    /// Abort the in-flight probe; [`join`](Self::join) then yields `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this resolution, for wiring into other signals.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the result.
    pub async fn join(self) -> ModelQueryResult {
        match self.task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(QueryError::cancelled()),
            Err(err) => Err(QueryError::internal(format!("probe task failed: {err}"))),
        }
    }
}

fn require_credential(credential: &str) -> Result<(), QueryError> {
    if credential.is_empty() {
        Err(QueryError::missing_credential("credential required"))
    } else {
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn attach_auth(request: &mut ProbeRequest, auth: &AuthStyle, credential: &str) {
    match auth {
        AuthStyle::Bearer => request
            .headers
            .push(("Authorization".to_string(), format!("Bearer {credential}"))),
        AuthStyle::Header(name) => request
            .headers
            .push((name.clone(), credential.to_string())),
        AuthStyle::QueryParam(name) => request
            .query
            .push((name.clone(), credential.to_string())),
    }
}

fn is_unauthorized(status: u16, extra: &[u16]) -> bool {
    status == 401 || status == 403 || extra.contains(&status)
}

fn status_error(vendor: &str, status: u16, extra_unauthorized: &[u16]) -> QueryError {
    if is_unauthorized(status, extra_unauthorized) {
        QueryError::new(
            QueryErrorKind::InvalidCredential,
            format!("{vendor} rejected the API key (HTTP {status})"),
        )
    } else {
        QueryError::new(
            QueryErrorKind::UpstreamUnavailable { status },
            format!("{vendor} returned HTTP {status}"),
        )
    }
}

fn interpret_listing(
    profile: &VendorProfile,
    probe: &ListingProbe,
    response: ProbeResponse,
) -> ModelQueryResult {
    if !response.is_success() {
        return Err(status_error(&profile.name, response.status, &probe.unauthorized));
    }

    match listing::parse_listing(probe, &response.body) {
        Ok(models) => {
            let catalog = ModelCatalog::listed(models);
            debug!(vendor = %profile.name, count = catalog.len(), "listed models");
            Ok(catalog)
        }
        Err(err) => {
            warn!(vendor = %profile.name, error = %err, "unparseable models listing");
            Err(QueryError::internal(format!(
                "unexpected models listing from {}: {err}",
                profile.name
            )))
        }
    }
}

fn interpret_synthetic(
    profile: &VendorProfile,
    probe: &SyntheticProbe,
    response: ProbeResponse,
) -> ModelQueryResult {
    if probe.accepted.contains(&response.status) || response.is_success() {
        debug!(vendor = %profile.name, status = response.status, "credential accepted");
        return Ok(ModelCatalog::from_presets(
            &profile.preset_models,
            CatalogSource::Verified,
        ));
    }
    Err(status_error(&profile.name, response.status, &[]))
}
