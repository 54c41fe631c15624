use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(mentorship_migration::Migrator).await;
}
