use async_trait::async_trait;

use crate::{
    tenancy::domain::model::value_objects::tenant_id::TenantId,
    trips::domain::model::{
        entities::trip::Trip,
        enums::trip_domain_error::TripDomainError,
        queries::{
            get_trip_query::GetTripQuery, list_sub_trips_query::ListSubTripsQuery,
            list_trips_query::ListTripsQuery,
        },
    },
};

#[async_trait]
pub trait TripQueryService: Send + Sync {
    async fn handle_get(
        &self,
        tenant_id: &TenantId,
        query: GetTripQuery,
    ) -> Result<Trip, TripDomainError>;

    async fn handle_list(
        &self,
        tenant_id: &TenantId,
        query: ListTripsQuery,
    ) -> Result<Vec<Trip>, TripDomainError>;

    async fn handle_list_sub_trips(
        &self,
        tenant_id: &TenantId,
        query: ListSubTripsQuery,
    ) -> Result<Vec<Trip>, TripDomainError>;
}
