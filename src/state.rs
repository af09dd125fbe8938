use std::sync::Arc;

use vape_config::{CorsConfig, EmailConfig, JwtConfig};
use vape_db::{PgPool, PgUserDirectory, UserDirectory};

use crate::utils::email::{EmailService, Mailer};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectory>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub fn init_app_state(pool: PgPool) -> AppState {
    AppState {
        directory: Arc::new(PgUserDirectory::new(pool)),
        mailer: Arc::new(EmailService::new(EmailConfig::from_env())),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
