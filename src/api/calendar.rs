//! Release oracle backed by the builds & releases calendar.
//!
//! The calendar lists one "Release Target" event per upcoming release, titled
//! with the short release name (`24-3 Release Target`). The oracle looks a
//! fixed number of weeks ahead and takes the first such event.
//!
//! Obtaining the access token is outside lbi: the token file is produced by
//! whatever sign-in flow the team uses and only read here.

use super::ReleaseOracle;
use crate::libs::error::{LbiError, Result};
use crate::libs::release::Release;
use chrono::{Duration, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_LOOKAHEAD_WEEKS: i64 = 15;
pub const RELEASE_TARGET_QUERY: &str = "Release Target";
const CREDENTIALS_HELP: &str =
    "Create a token file containing {\"access_token\": \"...\"} for an account with read access to the release calendar, \
     see https://developers.google.com/calendar/api/quickstart, and pass it with --token";

#[derive(Deserialize)]
struct StoredToken {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub summary: String,
}

impl EventList {
    /// First event, in calendar order, whose title starts with a release name.
    pub fn first_release(&self) -> Option<Release> {
        self.items.iter().find_map(|event| Release::from_event_title(&event.summary))
    }
}

#[derive(Debug, Clone)]
pub struct CalendarOracle {
    client: Client,
    api_url: String,
    calendar_id: String,
    token_path: PathBuf,
    lookahead_weeks: i64,
}

impl CalendarOracle {
    pub fn new(calendar_id: &str, token_path: &Path) -> Self {
        Self {
            client: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            calendar_id: calendar_id.to_string(),
            token_path: token_path.to_path_buf(),
            lookahead_weeks: DEFAULT_LOOKAHEAD_WEEKS,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_lookahead_weeks(mut self, weeks: i64) -> Self {
        self.lookahead_weeks = weeks;
        self
    }

    fn unavailable(reason: impl Into<String>) -> LbiError {
        LbiError::OracleUnavailable {
            reason: reason.into(),
            remedy: CREDENTIALS_HELP.to_string(),
        }
    }

    fn read_token(&self) -> Result<String> {
        let content = fs::read_to_string(&self.token_path)
            .map_err(|e| Self::unavailable(format!("cannot read credential file {}: {}", self.token_path.display(), e)))?;
        let token: StoredToken = serde_json::from_str(&content)
            .map_err(|e| Self::unavailable(format!("credential file {} is not valid: {}", self.token_path.display(), e)))?;

        if token.access_token.trim().is_empty() {
            return Err(Self::unavailable(format!("credential file {} has an empty access token", self.token_path.display())));
        }
        Ok(token.access_token)
    }

    /// Fetches upcoming release-target events inside the lookahead window.
    pub async fn upcoming_events(&self) -> Result<EventList> {
        let token = self.read_token()?;
        let now = Utc::now();
        let time_min = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let time_max = (now + Duration::weeks(self.lookahead_weeks)).to_rfc3339_opts(SecondsFormat::Secs, true);
        let url = format!("{}/calendars/{}/events", self.api_url, self.calendar_id);

        debug!(%url, %time_min, %time_max, "Querying release calendar");
        let res = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("q", RELEASE_TARGET_QUERY),
            ])
            .send()
            .await?;

        match res.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Self::unavailable(format!("calendar rejected the stored credentials ({})", res.status())))
            }
            status if !status.is_success() => Err(LbiError::transfer(url, format!("server responded with {}", status))),
            _ => Ok(res.json::<EventList>().await?),
        }
    }
}

impl ReleaseOracle for CalendarOracle {
    async fn current_release(&self) -> Result<Release> {
        self.upcoming_events()
            .await?
            .first_release()
            .ok_or(LbiError::NoReleaseFound {
                weeks: self.lookahead_weeks,
            })
    }
}
