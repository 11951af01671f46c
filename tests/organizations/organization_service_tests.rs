use polyglot_tenancy::organizations::domain::{
    model::{
        commands::{
            create_organization_command::CreateOrganizationCommand,
            rename_organization_command::RenameOrganizationCommand,
        },
        enums::{
            organization_domain_error::OrganizationDomainError,
            organization_type::OrganizationType,
        },
        queries::{
            get_organization_query::GetOrganizationQuery,
            list_organizations_query::ListOrganizationsQuery,
        },
    },
    services::{
        organization_command_service::OrganizationCommandService,
        organization_query_service::OrganizationQueryService,
    },
};

use crate::support::{create_harness, create_organization};

#[test]
fn create_command_normalises_and_checks_short_codes() {
    let command = CreateOrganizationCommand::new(
        OrganizationType::BusCompany,
        "  Blue Line Coaches ".to_string(),
        Some("blue-7".to_string()),
        None,
    )
    .expect("valid command");
    assert_eq!(command.name(), "Blue Line Coaches");
    assert_eq!(command.short_code(), Some("BLUE-7"));

    let invalid = CreateOrganizationCommand::new(
        OrganizationType::BusCompany,
        "Blue Line".to_string(),
        Some("-bad code".to_string()),
        None,
    );
    assert!(matches!(invalid, Err(OrganizationDomainError::InvalidCommand(_))));
}

#[test]
fn only_schools_may_name_a_parent() {
    for org_type in [OrganizationType::ParentGroup, OrganizationType::BusCompany] {
        let result = CreateOrganizationCommand::new(
            org_type,
            "Somewhere".to_string(),
            None,
            Some("group-1".to_string()),
        );
        assert!(matches!(result, Err(OrganizationDomainError::ParentNotAllowed(t)) if t == org_type));
    }
}

#[tokio::test]
async fn school_under_a_parent_group_is_stored_with_its_parent() {
    let harness = create_harness();
    let group = harness
        .organization(&harness.north, OrganizationType::ParentGroup, "Lakeside Trust")
        .await;
    let parent_id = group.id().to_string();

    let school = harness
        .organizations
        .handle_create(
            &harness.north,
            create_organization(OrganizationType::School, "Lakeside Primary", Some(parent_id.as_str())),
        )
        .await
        .expect("school is created");

    assert_eq!(school.org_type(), OrganizationType::School);
    assert_eq!(school.name(), Some("Lakeside Primary"));
    assert_eq!(school.parent_org_id(), Some(parent_id.as_str()));
    assert_eq!(school.record().tenant_id, "north");

    harness.context.shutdown().await;
}

#[tokio::test]
async fn school_parent_must_be_an_existing_parent_group_of_the_tenant() {
    let harness = create_harness();
    let bus_company = harness
        .organization(&harness.north, OrganizationType::BusCompany, "Blue Line")
        .await;
    let foreign_group = harness
        .organization(&harness.south, OrganizationType::ParentGroup, "South Trust")
        .await;

    let wrong_type = harness
        .organizations
        .handle_create(
            &harness.north,
            create_organization(
                OrganizationType::School,
                "Hill School",
                Some(bus_company.id().to_string().as_str()),
            ),
        )
        .await;
    assert!(matches!(
        wrong_type,
        Err(OrganizationDomainError::InvalidParentType { actual: OrganizationType::BusCompany, .. })
    ));

    let other_tenant = harness
        .organizations
        .handle_create(
            &harness.north,
            create_organization(
                OrganizationType::School,
                "Hill School",
                Some(foreign_group.id().to_string().as_str()),
            ),
        )
        .await;
    assert!(matches!(other_tenant, Err(OrganizationDomainError::OrganizationNotFound(_))));

    harness.context.shutdown().await;
}

#[tokio::test]
async fn rename_updates_the_name_and_keeps_the_type() {
    let harness = create_harness();
    let school = harness
        .organization(&harness.north, OrganizationType::School, "Old Name")
        .await;

    let renamed = harness
        .organizations
        .handle_rename(
            &harness.north,
            RenameOrganizationCommand::new(school.id().clone(), "New Name".to_string())
                .expect("valid command"),
        )
        .await
        .expect("rename succeeds");
    assert_eq!(renamed.id(), school.id());
    assert_eq!(renamed.name(), Some("New Name"));
    assert_eq!(renamed.org_type(), OrganizationType::School);

    let missing = harness
        .organizations
        .handle_rename(
            &harness.north,
            RenameOrganizationCommand::new("missing", "Anything".to_string())
                .expect("valid command"),
        )
        .await;
    assert!(matches!(missing, Err(OrganizationDomainError::OrganizationNotFound(id)) if id == "missing"));

    assert!(matches!(
        RenameOrganizationCommand::new(school.id().clone(), "   ".to_string()),
        Err(OrganizationDomainError::InvalidCommand(_))
    ));

    harness.context.shutdown().await;
}

#[tokio::test]
async fn queries_get_and_filter_organizations() {
    let harness = create_harness();
    let group = harness
        .organization(&harness.north, OrganizationType::ParentGroup, "Lakeside Trust")
        .await;
    let group_id = group.id().to_string();
    for name in ["Lakeside Primary", "Lakeside Secondary"] {
        harness
            .organizations
            .handle_create(
                &harness.north,
                create_organization(OrganizationType::School, name, Some(group_id.as_str())),
            )
            .await
            .expect("school is created");
    }
    harness
        .organization(&harness.north, OrganizationType::School, "Independent School")
        .await;
    harness
        .organization(&harness.north, OrganizationType::BusCompany, "Blue Line")
        .await;

    let found = harness
        .organization_queries
        .handle_get(&harness.north, GetOrganizationQuery::new(group.id().clone()))
        .await
        .expect("organization exists");
    assert_eq!(found.name(), Some("Lakeside Trust"));

    let everything = harness
        .organization_queries
        .handle_list(&harness.north, ListOrganizationsQuery::new())
        .await
        .expect("list succeeds");
    assert_eq!(everything.len(), 5);

    let schools = harness
        .organization_queries
        .handle_list(
            &harness.north,
            ListOrganizationsQuery::new().with_type(OrganizationType::School),
        )
        .await
        .expect("list succeeds");
    assert_eq!(schools.len(), 3);

    let lakeside = harness
        .organization_queries
        .handle_list(&harness.north, ListOrganizationsQuery::new().with_parent(group_id))
        .await
        .expect("list succeeds");
    assert_eq!(
        lakeside.iter().filter_map(|school| school.name()).collect::<Vec<_>>(),
        vec!["Lakeside Primary", "Lakeside Secondary"]
    );

    let south = harness
        .organization_queries
        .handle_list(&harness.south, ListOrganizationsQuery::new())
        .await
        .expect("list succeeds");
    assert!(south.is_empty());

    harness.context.shutdown().await;
}
