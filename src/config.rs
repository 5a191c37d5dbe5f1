#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Object storage (Supabase Storage compatible)
    pub storage_url: String,
    pub storage_api_key: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        // Storage configuration (with local-stack defaults)
        let storage_url = std::env::var("STORAGE_URL")
            .unwrap_or_else(|_| "http://localhost:54321/storage/v1".to_string());
        let storage_api_key = std::env::var("STORAGE_API_KEY").unwrap_or_else(|_| "".to_string());

        Config {
            database_url,
            frontend_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().expect("JWT_MAXAGE must be an integer"),
            port,
            storage_url,
            storage_api_key,
        }
    }
}
