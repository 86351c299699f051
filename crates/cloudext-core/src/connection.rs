// ── Connection ──
//
// One authenticated session plus a lazily resolved binding per service.
// Nothing talks to the network until a caller asks for a session or a
// proxy; each binding is resolved at most once per connection.

use std::sync::Arc;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

use cloudext_api::services::apig::v2::ApigProxy;
use cloudext_api::services::modelarts::ModelArtsProxy;
use cloudext_api::services::nat::v2::NatProxy;
use cloudext_api::services::vlb::v3::VlbProxy;
use cloudext_api::services::{apig, modelarts, nat, vlb};
use cloudext_api::{
    ApiVersion, Proxy, ProxyBinding, ServiceClient, ServiceDescriptor, ServiceProxy, Session,
};

use crate::config::ConnectionConfig;
use crate::error::CoreError;

// ── ServiceKind ──────────────────────────────────────────────────────

/// The services a connection can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Apig,
    Vlb,
    Nat,
    Modelarts,
}

impl ServiceKind {
    pub fn descriptor(self) -> ServiceDescriptor {
        match self {
            Self::Apig => apig::DESCRIPTOR,
            Self::Vlb => vlb::DESCRIPTOR,
            Self::Nat => nat::DESCRIPTOR,
            Self::Modelarts => modelarts::DESCRIPTOR,
        }
    }

    pub fn service_type(self) -> &'static str {
        self.descriptor().service_type
    }
}

// ── Resolution report ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Typed proxy available.
    Bound,
    /// Raw client only.
    Degraded,
    /// Resolution failed outright.
    Unavailable,
}

/// How one service resolved on this connection.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub service: ServiceKind,
    pub status: ResolutionStatus,
    pub version: Option<ApiVersion>,
    pub endpoint: Option<Url>,
    pub reason: Option<String>,
}

impl Resolution {
    fn from_binding<P: Proxy>(service: ServiceKind, binding: &ProxyBinding<P>) -> Self {
        Self {
            service,
            status: if binding.is_degraded() {
                ResolutionStatus::Degraded
            } else {
                ResolutionStatus::Bound
            },
            version: binding.version(),
            endpoint: Some(binding.client().endpoint().clone()),
            reason: binding.degraded_reason().map(ToString::to_string),
        }
    }
}

// ── Connection ───────────────────────────────────────────────────────

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<ConnectionInner>`.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

struct ConnectionInner {
    config: ConnectionConfig,
    session: OnceCell<Arc<Session>>,
    apig: OnceCell<ProxyBinding<ApigProxy>>,
    vlb: OnceCell<ProxyBinding<VlbProxy>>,
    nat: OnceCell<ProxyBinding<NatProxy>>,
    modelarts: OnceCell<ProxyBinding<ModelArtsProxy>>,
}

impl Connection {
    /// Create a connection. Does NOT authenticate until first use.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_session_cell(config, OnceCell::new())
    }

    /// Create a connection around an already-authenticated session.
    pub fn from_session(config: ConnectionConfig, session: Arc<Session>) -> Self {
        Self::with_session_cell(config, OnceCell::new_with(Some(session)))
    }

    fn with_session_cell(config: ConnectionConfig, session: OnceCell<Arc<Session>>) -> Self {
        Self {
            inner: Arc::new(ConnectionInner {
                config,
                session,
                apig: OnceCell::new(),
                vlb: OnceCell::new(),
                nat: OnceCell::new(),
                modelarts: OnceCell::new(),
            }),
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.inner.config
    }

    /// The authenticated session, authenticating on first call.
    pub async fn session(&self) -> Result<&Arc<Session>, CoreError> {
        let config = &self.inner.config;
        self.inner
            .session
            .get_or_try_init(|| async {
                debug!(auth_url = %config.auth_url, region = %config.region, "authenticating");
                let session = Session::connect(
                    &config.credentials(),
                    config.region.clone(),
                    config.interface,
                    &config.transport(),
                )
                .await
                .map_err(|e| self.with_timeout(e.into()))?;
                info!(project = ?session.project_id(), "authenticated");
                Ok::<_, CoreError>(session)
            })
            .await
    }

    // ── Bindings ─────────────────────────────────────────────────────

    pub async fn apig_binding(&self) -> Result<&ProxyBinding<ApigProxy>, CoreError> {
        self.bind(&self.inner.apig, apig::service).await
    }

    pub async fn vlb_binding(&self) -> Result<&ProxyBinding<VlbProxy>, CoreError> {
        self.bind(&self.inner.vlb, vlb::service).await
    }

    pub async fn nat_binding(&self) -> Result<&ProxyBinding<NatProxy>, CoreError> {
        self.bind(&self.inner.nat, nat::service).await
    }

    pub async fn modelarts_binding(&self) -> Result<&ProxyBinding<ModelArtsProxy>, CoreError> {
        self.bind(&self.inner.modelarts, modelarts::service).await
    }

    // ── Typed proxies ────────────────────────────────────────────────

    pub async fn apig(&self) -> Result<&ApigProxy, CoreError> {
        typed(ServiceKind::Apig, self.apig_binding().await?)
    }

    pub async fn vlb(&self) -> Result<&VlbProxy, CoreError> {
        typed(ServiceKind::Vlb, self.vlb_binding().await?)
    }

    pub async fn nat(&self) -> Result<&NatProxy, CoreError> {
        typed(ServiceKind::Nat, self.nat_binding().await?)
    }

    pub async fn modelarts(&self) -> Result<&ModelArtsProxy, CoreError> {
        typed(ServiceKind::Modelarts, self.modelarts_binding().await?)
    }

    /// The client behind a binding, typed or degraded.
    pub async fn raw_client(&self, kind: ServiceKind) -> Result<ServiceClient, CoreError> {
        Ok(match kind {
            ServiceKind::Apig => self.apig_binding().await?.client().clone(),
            ServiceKind::Vlb => self.vlb_binding().await?.client().clone(),
            ServiceKind::Nat => self.nat_binding().await?.client().clone(),
            ServiceKind::Modelarts => self.modelarts_binding().await?.client().clone(),
        })
    }

    // ── Reporting ────────────────────────────────────────────────────

    /// Resolve one service and describe the outcome.
    ///
    /// Authentication failures propagate; per-service failures are reported
    /// as `Unavailable`.
    pub async fn resolution(&self, kind: ServiceKind) -> Result<Resolution, CoreError> {
        self.session().await?;
        let resolved = match kind {
            ServiceKind::Apig => self
                .apig_binding()
                .await
                .map(|b| Resolution::from_binding(kind, b)),
            ServiceKind::Vlb => self
                .vlb_binding()
                .await
                .map(|b| Resolution::from_binding(kind, b)),
            ServiceKind::Nat => self
                .nat_binding()
                .await
                .map(|b| Resolution::from_binding(kind, b)),
            ServiceKind::Modelarts => self
                .modelarts_binding()
                .await
                .map(|b| Resolution::from_binding(kind, b)),
        };
        Ok(resolved.unwrap_or_else(|e| Resolution {
            service: kind,
            status: ResolutionStatus::Unavailable,
            version: None,
            endpoint: None,
            reason: Some(e.to_string()),
        }))
    }

    /// `resolution` for every known service.
    pub async fn resolution_report(&self) -> Result<Vec<Resolution>, CoreError> {
        let mut report = Vec::new();
        for kind in ServiceKind::iter() {
            report.push(self.resolution(kind).await?);
        }
        Ok(report)
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn bind<'a, P: Proxy>(
        &'a self,
        cell: &'a OnceCell<ProxyBinding<P>>,
        service: fn() -> ServiceProxy<P>,
    ) -> Result<&'a ProxyBinding<P>, CoreError> {
        let session = self.session().await?;
        cell.get_or_try_init(|| async {
            let service = service();
            let service_type = service.descriptor().service_type;
            let options = self.inner.config.service_options(service_type);
            let binding = service
                .create_proxy(session, &options)
                .await
                .map_err(|e| self.with_timeout(e.into()))?;
            if let Some(reason) = binding.degraded_reason() {
                warn!(service = service_type, %reason, "service degraded");
            }
            Ok::<_, CoreError>(binding)
        })
        .await
    }

    fn with_timeout(&self, err: CoreError) -> CoreError {
        match err {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.inner.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

fn typed<P: Proxy>(kind: ServiceKind, binding: &ProxyBinding<P>) -> Result<&P, CoreError> {
    match binding {
        ProxyBinding::Bound { proxy, .. } => Ok(proxy),
        ProxyBinding::Degraded { reason, .. } => Err(CoreError::Degraded {
            service: kind.to_string(),
            reason: reason.to_string(),
        }),
    }
}
