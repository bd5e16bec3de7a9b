use anyhow::Result;
use userbase_http::UserResponse;
use uuid::Uuid;

use crate::{build_service, connect, load_config};

pub(crate) async fn run(id: Uuid) -> Result<()> {
    let config = load_config()?;
    let service = build_service(connect(&config).await?);

    let lookup = tokio::time::timeout(config.request_timeout, service.get_user(id)).await;
    service.close().await?;

    let user = lookup.map_err(|_| anyhow::anyhow!("request deadline exceeded"))??;
    println!("{}", serde_json::to_string_pretty(&UserResponse::from(user))?);
    Ok(())
}
