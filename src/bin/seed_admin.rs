//! One-shot admin provisioning. There is no signup route; dashboard accounts
//! are created from the command line:
//!
//!     seed_admin <name> <email> <password>

use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;

use estatedesk::{
    db::{admindb::AdminExt, db::DBClient},
    utils::password,
};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (name, email, plain_password) = match (args.next(), args.next(), args.next()) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => {
            eprintln!("Usage: seed_admin <name> <email> <password>");
            std::process::exit(2);
        }
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to the database");

    let db_client = DBClient::new(pool);

    match db_client.get_admin_user(None, Some(&email)).await {
        Ok(Some(existing)) => {
            eprintln!("Admin {} already exists ({})", existing.email, existing.id);
            std::process::exit(1);
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("🔥 Lookup failed: {}", err);
            std::process::exit(1);
        }
    }

    let hashed = password::hash(plain_password).expect("Password could not be hashed");

    let admin = db_client
        .save_admin_user(&name, &email, &hashed)
        .await
        .expect("Failed to save the admin user");

    println!("✅ Admin {} created with id {}", admin.email, admin.id);
}
