use dotenvy::dotenv;
use polyglot_tenancy::{
    config::{app_config::AppConfig, logging::init_tracing},
    tenancy::{
        build_persistence_context, domain::model::value_objects::tenant_id::TenantId,
    },
};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.log_filter);

    let context = build_persistence_context(&config)
        .await
        .expect("failed to build persistence context");

    for raw_tenant_id in &config.warmup_tenant_ids {
        let tenant_id = match TenantId::new(raw_tenant_id.clone()) {
            Ok(tenant_id) => tenant_id,
            Err(error) => {
                warn!(tenant_id = %raw_tenant_id, %error, "skipping warm-up");
                continue;
            }
        };

        match context.warm_up(&tenant_id).await {
            Ok(()) => info!(tenant_id = %tenant_id, "tenant connection ready"),
            Err(error) => warn!(tenant_id = %tenant_id, %error, "tenant warm-up failed"),
        }
    }

    info!("persistence core running; press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");

    context.shutdown().await;
    info!("persistence core stopped");
}
