use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::tenancy::{
    domain::model::{
        enums::{persistence_error::PersistenceError, provider_type::ProviderType},
        value_objects::tenant_id::TenantId,
    },
    infrastructure::persistence::connections::provider_connector::ProviderConnector,
};

/// A tenant's connection cell. `closed` is claimed by whichever caller
/// closes the connection, so eviction and a racing construction never
/// close it twice.
struct Slot<C> {
    cell: OnceCell<Arc<C>>,
    closed: AtomicBool,
}

impl<C> Slot<C> {
    fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }
}

type ConnectionSlot<C> = Arc<Slot<C>>;

/// Per-provider cache of live connections keyed by tenant.
///
/// Each tenant gets a slot whose cell is initialised at most once, so
/// concurrent first requests share a single construction. A failed
/// construction leaves the cell empty and the next request tries again.
/// A construction that finishes after its slot was evicted closes the new
/// connection and reports a retryable connection error.
pub struct ProviderConnectionManager<P: ProviderConnector> {
    connector: P,
    connections: RwLock<HashMap<TenantId, ConnectionSlot<P::Connection>>>,
}

impl<P: ProviderConnector> ProviderConnectionManager<P> {
    pub fn new(connector: P) -> Self {
        Self {
            connector,
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        self.connector.provider_type()
    }

    pub async fn get_connection(
        &self,
        tenant_id: &TenantId,
        provider_params: &Value,
    ) -> Result<Arc<P::Connection>, PersistenceError> {
        let slot = self.slot(tenant_id).await;

        if let Some(connection) = slot.cell.get() {
            debug!(tenant_id = %tenant_id, provider = %self.provider_type(), "connection cache hit");
            return Ok(connection.clone());
        }

        let connection = slot
            .cell
            .get_or_try_init(|| async {
                info!(
                    tenant_id = %tenant_id,
                    provider = %self.provider_type(),
                    "opening tenant connection"
                );
                self.connector
                    .connect(tenant_id, provider_params)
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(|error| {
                warn!(
                    tenant_id = %tenant_id,
                    provider = %self.provider_type(),
                    error = %error,
                    "tenant connection could not be opened"
                );
                error
            })?
            .clone();

        if !self.is_current(tenant_id, &slot).await {
            warn!(
                tenant_id = %tenant_id,
                provider = %self.provider_type(),
                "tenant connection was invalidated while opening"
            );
            self.close_slot(tenant_id, &slot).await;
            return Err(PersistenceError::Connection(format!(
                "connection for tenant {tenant_id} was invalidated while opening"
            )));
        }

        Ok(connection)
    }

    /// Tenants with an open connection.
    pub async fn cached_tenants(&self) -> Vec<TenantId> {
        let read_guard = self.connections.read().await;
        let mut tenants = read_guard
            .iter()
            .filter(|(_, slot)| slot.cell.initialized())
            .map(|(tenant_id, _)| tenant_id.clone())
            .collect::<Vec<_>>();
        tenants.sort();
        tenants
    }

    async fn slot(&self, tenant_id: &TenantId) -> ConnectionSlot<P::Connection> {
        {
            let read_guard = self.connections.read().await;
            if let Some(slot) = read_guard.get(tenant_id) {
                return slot.clone();
            }
        }

        let mut write_guard = self.connections.write().await;
        write_guard
            .entry(tenant_id.clone())
            .or_insert_with(|| Arc::new(Slot::new()))
            .clone()
    }

    async fn is_current(
        &self,
        tenant_id: &TenantId,
        slot: &ConnectionSlot<P::Connection>,
    ) -> bool {
        self.connections
            .read()
            .await
            .get(tenant_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    async fn close_slot(&self, tenant_id: &TenantId, slot: &ConnectionSlot<P::Connection>) {
        let Some(connection) = slot.cell.get() else {
            return;
        };
        if slot.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        info!(tenant_id = %tenant_id, provider = %self.provider_type(), "closing tenant connection");
        self.connector.close(connection).await;
    }
}

/// Provider-erased handle used to evict and tear down connections.
#[async_trait]
pub trait ConnectionLifecycle: Send + Sync {
    fn provider_type(&self) -> ProviderType;

    /// Drops the tenant's connection. Returns whether one was open.
    async fn invalidate(&self, tenant_id: &TenantId) -> bool;

    async fn shutdown(&self);
}

#[async_trait]
impl<P> ConnectionLifecycle for ProviderConnectionManager<P>
where
    P: ProviderConnector + 'static,
{
    fn provider_type(&self) -> ProviderType {
        self.connector.provider_type()
    }

    async fn invalidate(&self, tenant_id: &TenantId) -> bool {
        let removed = self.connections.write().await.remove(tenant_id);
        match removed {
            Some(slot) => {
                let was_open = slot.cell.initialized();
                self.close_slot(tenant_id, &slot).await;
                was_open
            }
            None => false,
        }
    }

    async fn shutdown(&self) {
        let drained = self
            .connections
            .write()
            .await
            .drain()
            .collect::<Vec<_>>();

        for (tenant_id, slot) in drained {
            self.close_slot(&tenant_id, &slot).await;
        }
    }
}
