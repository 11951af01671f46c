use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    tenancy::{
        domain::{
            model::{
                entities::record_filter::RecordFilter, enums::entity_type::EntityType,
                value_objects::tenant_id::TenantId,
            },
            services::{
                repository_factory_service::RepositoryFactoryService,
                tenant_config_resolver_service::TenantConfigResolverService,
            },
        },
        infrastructure::persistence::repositories::entity_repository::EntityRepository,
    },
    trips::domain::{
        model::{
            entities::trip::{ORGANIZATION_ID_FIELD, PARENT_TRIP_ID_FIELD, STATUS_FIELD, Trip},
            enums::trip_domain_error::TripDomainError,
            queries::{
                get_trip_query::GetTripQuery, list_sub_trips_query::ListSubTripsQuery,
                list_trips_query::ListTripsQuery,
            },
        },
        services::trip_query_service::TripQueryService,
    },
};

pub struct TripQueryServiceImpl {
    tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
    repository_factory: Arc<dyn RepositoryFactoryService>,
}

impl TripQueryServiceImpl {
    pub fn new(
        tenant_config_resolver: Arc<dyn TenantConfigResolverService>,
        repository_factory: Arc<dyn RepositoryFactoryService>,
    ) -> Self {
        Self {
            tenant_config_resolver,
            repository_factory,
        }
    }

    async fn trip_repository(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Arc<dyn EntityRepository>, TripDomainError> {
        let tenant_config = self.tenant_config_resolver.resolve(tenant_id).await?;
        Ok(self
            .repository_factory
            .get_repository(EntityType::Trip, &tenant_config)
            .await?)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: RecordFilter,
    ) -> Result<Vec<Trip>, TripDomainError> {
        self.trip_repository(tenant_id)
            .await?
            .find_all(Some(filter))
            .await?
            .into_iter()
            .map(Trip::from_record)
            .collect()
    }
}

#[async_trait]
impl TripQueryService for TripQueryServiceImpl {
    async fn handle_get(
        &self,
        tenant_id: &TenantId,
        query: GetTripQuery,
    ) -> Result<Trip, TripDomainError> {
        let repository = self.trip_repository(tenant_id).await?;
        match repository.find_by_id(query.trip_id()).await {
            Ok(record) => Trip::from_record(record),
            Err(error) if error.is_not_found() => {
                Err(TripDomainError::TripNotFound(query.trip_id().to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn handle_list(
        &self,
        tenant_id: &TenantId,
        query: ListTripsQuery,
    ) -> Result<Vec<Trip>, TripDomainError> {
        let mut filter = RecordFilter::new();
        if let Some(status) = query.status() {
            filter = filter.where_eq(STATUS_FIELD, status.as_str());
        }
        if let Some(organization_id) = query.organization_id() {
            filter = filter.where_eq(ORGANIZATION_ID_FIELD, organization_id);
        }
        if !query.include_sub_trips() {
            filter = filter.where_eq(PARENT_TRIP_ID_FIELD, Value::Null);
        }

        self.list(tenant_id, filter).await
    }

    async fn handle_list_sub_trips(
        &self,
        tenant_id: &TenantId,
        query: ListSubTripsQuery,
    ) -> Result<Vec<Trip>, TripDomainError> {
        self.list(
            tenant_id,
            RecordFilter::new().where_eq(PARENT_TRIP_ID_FIELD, query.parent_trip_id().to_string()),
        )
        .await
    }
}
