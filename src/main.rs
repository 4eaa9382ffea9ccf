#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    informes_server::run().await
}
