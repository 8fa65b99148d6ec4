use std::env;

/// Runtime settings read from the environment (after `.env` is loaded).
///
/// | Env Var                    | Default                 |
/// |----------------------------|-------------------------|
/// | `DATABASE_URL`             | `sqlite://employees.db` |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                     |
/// | `HOST`                     | `127.0.0.1`             |
/// | `PORT`                     | `8080`                  |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://employees.db".into());

        let max_connections: u32 = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        Self {
            database_url,
            max_connections,
            host,
            port,
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
