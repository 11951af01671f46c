use crate::tenancy::domain::model::enums::{entity_type::EntityType, field_kind::FieldKind};

/// One semantic field and the relational column that stores it.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, column: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, column, kind }
}

/// Storage layout of an entity: the collection/table it lives in and the
/// fields the relational provider defines columns for. Document providers
/// accept fields beyond this list.
#[derive(Clone, Copy, Debug)]
pub struct EntitySchema {
    pub entity: EntityType,
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
}

const TENANT_FIELDS: &[FieldSpec] = &[
    field("name", "name", FieldKind::Text),
    field("providerType", "provider_type", FieldKind::Text),
    field("providerParams", "provider_params", FieldKind::Json),
    field("featureFlags", "feature_flags", FieldKind::Json),
    field("subscriptionPlan", "subscription_plan", FieldKind::Text),
    field("status", "status", FieldKind::Text),
];

const ORGANIZATION_FIELDS: &[FieldSpec] = &[
    field("type", "org_type", FieldKind::Text),
    field("parentOrgId", "parent_org_id", FieldKind::Text),
    field("name", "name", FieldKind::Text),
    field("shortCode", "short_code", FieldKind::Text),
];

const PARTNERSHIP_FIELDS: &[FieldSpec] = &[
    field("schoolOrgId", "school_org_id", FieldKind::Text),
    field("busCompanyOrgId", "bus_company_org_id", FieldKind::Text),
    field("status", "status", FieldKind::Text),
];

const USER_FIELDS: &[FieldSpec] = &[
    field("email", "email", FieldKind::Text),
    field("displayName", "display_name", FieldKind::Text),
    field("role", "role", FieldKind::Text),
    field("approvalStatus", "approval_status", FieldKind::Text),
    field("organizationId", "organization_id", FieldKind::Text),
    field("assignedSchools", "assigned_schools", FieldKind::Json),
    field("allowedOrgIds", "allowed_org_ids", FieldKind::Json),
];

const TRIP_FIELDS: &[FieldSpec] = &[
    field("destination", "destination", FieldKind::Text),
    field("scheduledAt", "scheduled_at", FieldKind::Timestamp),
    field("returnAt", "return_at", FieldKind::Timestamp),
    field("passengerCount", "passenger_count", FieldKind::Integer),
    field("status", "status", FieldKind::Text),
    field("buses", "buses", FieldKind::Json),
    field("parentTripId", "parent_trip_id", FieldKind::Text),
    field("organizationId", "organization_id", FieldKind::Text),
    field("busCompanyOrgId", "bus_company_org_id", FieldKind::Text),
    field("createdByUserId", "created_by_user_id", FieldKind::Text),
    field("createdByName", "created_by_name", FieldKind::Text),
    field("createdByEmail", "created_by_email", FieldKind::Text),
    field("statusChangedBy", "status_changed_by", FieldKind::Text),
    field("statusNote", "status_note", FieldKind::Text),
];

const SETTINGS_FIELDS: &[FieldSpec] = &[
    field("organizationId", "organization_id", FieldKind::Text),
    field("values", "settings_values", FieldKind::Json),
];

static TENANT_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityType::Tenant,
    collection: "tenants",
    fields: TENANT_FIELDS,
};

static ORGANIZATION_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityType::Organization,
    collection: "organizations",
    fields: ORGANIZATION_FIELDS,
};

static PARTNERSHIP_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityType::Partnership,
    collection: "partnerships",
    fields: PARTNERSHIP_FIELDS,
};

static USER_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityType::User,
    collection: "users",
    fields: USER_FIELDS,
};

static TRIP_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityType::Trip,
    collection: "trips",
    fields: TRIP_FIELDS,
};

static SETTINGS_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityType::Settings,
    collection: "settings",
    fields: SETTINGS_FIELDS,
};

impl EntitySchema {
    pub fn for_entity(entity: EntityType) -> &'static EntitySchema {
        match entity {
            EntityType::Tenant => &TENANT_SCHEMA,
            EntityType::Organization => &ORGANIZATION_SCHEMA,
            EntityType::Partnership => &PARTNERSHIP_SCHEMA,
            EntityType::User => &USER_SCHEMA,
            EntityType::Trip => &TRIP_SCHEMA,
            EntityType::Settings => &SETTINGS_SCHEMA,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn field_by_column(&self, column: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.column == column)
    }
}
