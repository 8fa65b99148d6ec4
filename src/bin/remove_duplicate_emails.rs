use dotenv::dotenv;

use employee_reviews::services::remove_duplicate_emails;
use employee_reviews::{db, AppConfig, AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let pool = db::create_pool(&config.database_url, 1).await?;

    remove_duplicate_emails(&pool).await?;
    pool.close().await;

    println!("Successfully removed duplicate emails");
    Ok(())
}
