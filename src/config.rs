#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let port = std::env::var("PORT")
            .ok()
            .map(|value| value.parse::<u16>().expect("PORT must be a number"))
            .unwrap_or(8000);

        Config { database_url, port }
    }
}
