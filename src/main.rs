/*
 * Responsibility
 * - tokio runtime
 * - app::run() (no logic here)
 */
use anyhow::Result;

use rbac_auth::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
