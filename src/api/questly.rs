//! Questly backend API client.
//!
//! Authentication is a session cookie obtained from `auth/login` and cached
//! on disk; a 401 on any request invalidates the cached session and retries
//! with a fresh login, up to a small retry budget. The account password
//! itself is cached encrypted (see `libs::secret`).

use crate::libs::config::ConfigModule;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use crate::libs::session::{SessionSink, Subject};
use crate::msg_error_anyhow;
use anyhow::Result;
use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const MAX_RETRY_COUNT: i32 = 3;
const COOKIE_KEY: &str = "sid=";
const SESSION_ID_FILE: &str = ".questly_session";
const SECRET_FILE: &str = ".questly_secret";
const LOGIN_URL: &str = "auth/login";
const SESSIONS_URL: &str = "sessions";
const SUMMARY_URL: &str = "sessions/summary";

#[derive(Serialize)]
struct LoginCredentials {
    email: String,
    password: String,
}

/// One row of today's per-subject focus.
#[derive(Debug, Clone, Deserialize)]
pub struct TodayEntry {
    pub name: String,
    #[serde(default)]
    pub duration: u64,
}

/// One row of the all-time per-subject totals.
#[derive(Debug, Clone, Deserialize)]
pub struct TotalEntry {
    pub subject_name: String,
    #[serde(default)]
    pub total_focus: u64,
}

/// Response of `GET sessions/summary`.
///
/// Every field defaults so a partial payload from an older server version
/// still deserializes; the summary is display data, not coordination state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSummary {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub today_sessions: Vec<TodayEntry>,
    #[serde(default)]
    pub total_focus: Vec<TotalEntry>,
    #[serde(default)]
    pub today_total: u64,
    #[serde(default)]
    pub today_sessions_count: u64,
}

pub struct Questly {
    client: Client,
    config: QuestlyConfig,
    secret: Secret,
    retries: i32,
}

impl Questly {
    pub fn new(config: &QuestlyConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            secret: Secret::new(SECRET_FILE, &Message::PromptQuestlyPassword.to_string()),
            retries: 0,
        }
    }

    /// Posts one completed focus session.
    pub async fn create_focus_session(&mut self, subject_id: i64, duration_minutes: u64) -> Result<()> {
        loop {
            let session_id = self.get_session_id().await?;
            let url = format!("{}/{}", self.config.api_url, SESSIONS_URL);
            let body = json!({ "subject_id": subject_id, "duration": duration_minutes });

            let mut headers = HeaderMap::new();
            headers.insert(COOKIE, HeaderValue::from_str(&format!("{}{}", COOKIE_KEY, session_id))?);

            let res = self.client.post(url).headers(headers).json(&body).send().await?;

            match res.status() {
                StatusCode::UNAUTHORIZED if self.retries < MAX_RETRY_COUNT => {
                    self.delete_session_id()?;
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                    self.retries += 1;
                    continue;
                }
                status if status.is_success() => return Ok(()),
                status => return Err(msg_error_anyhow!(Message::ApiRequestFailed(status.to_string()))),
            }
        }
    }

    /// Fetches today's and all-time focus totals, plus the subject list.
    pub async fn summary(&mut self) -> Result<FocusSummary> {
        loop {
            let session_id = self.get_session_id().await?;
            let url = format!("{}/{}", self.config.api_url, SUMMARY_URL);

            let mut headers = HeaderMap::new();
            headers.insert(COOKIE, HeaderValue::from_str(&format!("{}{}", COOKIE_KEY, session_id))?);

            let res = self.client.get(url).headers(headers).send().await?;

            match res.status() {
                StatusCode::UNAUTHORIZED if self.retries < MAX_RETRY_COUNT => {
                    self.delete_session_id()?;
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                    self.retries += 1;
                    continue;
                }
                status if status.is_success() => return Ok(res.json::<FocusSummary>().await?),
                status => return Err(msg_error_anyhow!(Message::ApiRequestFailed(status.to_string()))),
            }
        }
    }

    /// The account's subjects, as reported by the summary endpoint.
    pub async fn subjects(&mut self) -> Result<Vec<Subject>> {
        Ok(self.summary().await?.subjects)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<String> {
        let login_url = format!("{}/{}", self.config.api_url, LOGIN_URL);
        let login_res = self.client.post(login_url).json(credentials).send().await?;

        if let Some(cookie) = login_res.headers().get("Set-Cookie") {
            if let Ok(cookie_val) = cookie.to_str() {
                if let Some(sid) = cookie_val.split(';').find(|c| c.trim_start().starts_with(COOKIE_KEY)) {
                    let session_id = sid.trim_start().trim_start_matches(COOKIE_KEY);
                    return Ok(session_id.to_string());
                }
            }
        }

        Err(msg_error_anyhow!(Message::LoginFailed))
    }

    async fn get_session_id(&mut self) -> Result<String> {
        let session_id_file_path = DataStorage::new().get_path(SESSION_ID_FILE)?;
        if let Ok(session_id) = fs::read_to_string(&session_id_file_path) {
            return Ok(session_id);
        }
        loop {
            let password: String = match self.retries > 0 {
                true => self.secret.prompt()?,
                false => self.secret.get_or_prompt()?,
            };
            let login_credentials = LoginCredentials {
                email: self.config.email.to_string(),
                password,
            };
            match self.login(&login_credentials).await {
                Ok(session_id) => {
                    let _ = Self::write_session_id(&session_id_file_path, &session_id);
                    return Ok(session_id);
                }
                Err(_) => {
                    if self.retries < MAX_RETRY_COUNT {
                        self.retries += 1;
                        continue;
                    }
                    return Err(msg_error_anyhow!(Message::WrongPasswordTimes(MAX_RETRY_COUNT)));
                }
            }
        }
    }

    fn write_session_id(path: &Path, session_id: &str) -> io::Result<()> {
        let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        file.write_all(session_id.as_bytes())
    }

    fn delete_session_id(&self) -> Result<()> {
        let session_id_file_path = DataStorage::new().get_path(SESSION_ID_FILE)?;
        fs::remove_file(session_id_file_path)?;
        Ok(())
    }
}

/// Sink implementation used by the completion protocol.
///
/// Each save builds a fresh client; login state is shared through the
/// on-disk session cookie cache, so consecutive saves still reuse one
/// session.
pub struct QuestlySink {
    config: QuestlyConfig,
}

impl QuestlySink {
    pub fn new(config: &QuestlyConfig) -> Self {
        QuestlySink { config: config.clone() }
    }
}

#[async_trait]
impl SessionSink for QuestlySink {
    async fn create_session(&self, subject_id: i64, duration_minutes: u64) -> Result<()> {
        Questly::new(&self.config).create_focus_session(subject_id, duration_minutes).await
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuestlyConfig {
    pub email: String,
    pub api_url: String,
}

impl QuestlyConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "questly".to_string(),
            name: "Questly account".to_string(),
        }
    }

    pub fn init(config: &Option<QuestlyConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            email: "".to_string(),
            api_url: "".to_string(),
        });
        println!("{}", Message::ConfigModuleQuestly);
        Ok(Self {
            email: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptQuestlyEmail.to_string())
                .default(config.email)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptQuestlyApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        })
    }
}
