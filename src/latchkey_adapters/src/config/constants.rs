pub mod env {
    pub const CONFIG_FILE_ENV_VAR: &str = "LATCHKEY_CONFIG";
    pub const ENV_PREFIX: &str = "LATCHKEY";
    pub const ENV_SEPARATOR: &str = "__";

    // Variables understood by earlier deployments of the service
    pub const SECRET_KEY_ENV_VAR: &str = "SECRET_KEY";
    pub const REDIS_HOST_ENV_VAR: &str = "REDIS_HOST";
    pub const REDIS_PORT_ENV_VAR: &str = "REDIS_PORT";
}

pub const DEFAULT_CONFIG_FILE: &str = "settings.json";

pub const SESSION_TTL_SECONDS: i64 = 30 * 60;
pub const LOGIN_TOKEN_TTL_SECONDS: u64 = 10 * 60;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8000";
    pub const VERIFY_URL: &str = "http://localhost:8000/verify";

    pub mod redis {
        pub const HOST_NAME: &str = "redis";
        pub const PORT: u16 = 6379;
    }

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "noreply@yourdomain.com";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
