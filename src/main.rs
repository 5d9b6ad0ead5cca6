use anyhow::Result;
use job_apply_agent::{App, Config};
use job_apply_agent::logging;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();

    let _stats = App::initialize(config).await?.run().await?;

    Ok(())
}
