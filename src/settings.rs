use thiserror::Error;

const DEFAULT_DB_PATH: &str = "db.sqlite";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Bot settings, read from the environment (and `.env`, when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub db_path: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        if let Err(err) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", err);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("TELOXIDE_TOKEN").ok_or(SettingsError::Missing("TELOXIDE_TOKEN"))?;
        if token.trim().is_empty() {
            return Err(SettingsError::Empty("TELOXIDE_TOKEN"));
        }

        let db_path = match lookup("DIALOGUE_DB_PATH") {
            Some(path) if path.trim().is_empty() => {
                return Err(SettingsError::Empty("DIALOGUE_DB_PATH"))
            }
            Some(path) => path,
            None => DEFAULT_DB_PATH.to_string(),
        };

        Ok(Self { token, db_path })
    }
}
