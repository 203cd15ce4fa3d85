use color_eyre::eyre::Result;
use corpus_core::Client;
use tracing::info;

pub(crate) async fn logout(client: Client) -> Result<()> {
    client.logout().await;
    info!("Logged out");
    Ok(())
}
