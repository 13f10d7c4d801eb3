//! CLI entry-point for applying the database schema.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, db};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let pool = db::connect_required(&settings).await?;
    db::migrate::apply(&pool).await
}
