//! Schema setup command.
//!
//! Connecting runs the backend's idempotent migrations; nothing else is
//! touched.

use anyhow::Result;
use userbase_storage::UserStore;

use crate::{connect, load_config};

pub(crate) async fn run() -> Result<()> {
    let config = load_config()?;
    let storage = connect(&config).await?;
    storage.close().await?;
    println!("Schema is up to date ({})", storage.kind());
    Ok(())
}
