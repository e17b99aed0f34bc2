#[tokio::main]
async fn main() -> anyhow::Result<()> {
    voicecart::run().await
}
