use registrar_config::{BcryptConfig, DatabaseConfig};
use registrar_db::{PgPool, init_db_pool};

use crate::store::{PgDepartmentStore, PgStudentStore, PgUserStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub bcrypt_config: BcryptConfig,
}

impl AppState {
    pub fn departments(&self) -> PgDepartmentStore {
        PgDepartmentStore::new(self.db.clone())
    }

    pub fn students(&self) -> PgStudentStore {
        PgStudentStore::new(self.db.clone())
    }

    pub fn users(&self) -> PgUserStore {
        PgUserStore::new(self.db.clone())
    }
}

pub async fn init_app_state(database: &DatabaseConfig) -> anyhow::Result<AppState> {
    Ok(AppState {
        db: init_db_pool(database).await?,
        bcrypt_config: BcryptConfig::from_env(),
    })
}
