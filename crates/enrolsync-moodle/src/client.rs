//! Blocking Moodle REST client.
//!
//! Moodle's web service protocol is GET with query parameters:
//! `wstoken`, `wsfunction`, `moodlewsrestformat=json` plus
//! function-specific arguments. Errors come back as HTTP 200 with an
//! `exception` field in the JSON body, so every response is inspected
//! before deserialization.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use enrolsync_model::{CourseId, Email, ShortName};

use crate::config::MoodleConfig;
use crate::directory::{CourseDirectory, UserId};
use crate::error::{MoodleError, Result};

const FN_COURSES_BY_FIELD: &str = "core_course_get_courses_by_field";
const FN_ENROLLED_USERS: &str = "core_enrol_get_enrolled_users";
const FN_USERS_BY_FIELD: &str = "core_user_get_users_by_field";

pub struct MoodleClient {
    http: reqwest::blocking::Client,
    config: MoodleConfig,
    /// End of the previous call; guards the fixed inter-call delay.
    last_call: Mutex<Option<Instant>>,
}

impl MoodleClient {
    pub fn new(config: MoodleConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            config,
            last_call: Mutex::new(None),
        })
    }

    /// Sleep out the remainder of the configured inter-call delay.
    fn throttle(&self) {
        let mut last_call = match self.last_call.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.config.call_delay {
                std::thread::sleep(self.config.call_delay - elapsed);
            }
        }
        *last_call = Some(Instant::now());
    }

    fn call(&self, function: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.throttle();
        debug!(function, "moodle web service call");
        let mut query: Vec<(&str, &str)> = vec![
            ("wstoken", self.config.token.as_str()),
            ("wsfunction", function),
            ("moodlewsrestformat", "json"),
        ];
        query.extend_from_slice(params);

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&query)
            .send()?
            .error_for_status()?;
        let body: Value = response.json()?;

        if body.get("exception").is_some() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown web service exception")
                .to_string();
            return Err(MoodleError::Api {
                function: function.to_string(),
                message,
            });
        }
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct CoursesByField {
    #[serde(default)]
    courses: Vec<CourseRecord>,
}

#[derive(Debug, Deserialize)]
struct CourseRecord {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: u64,
    #[serde(default)]
    email: Option<String>,
}

impl CourseDirectory for MoodleClient {
    fn course_id_by_shortname(&self, shortname: &ShortName) -> Result<Option<CourseId>> {
        let body = self.call(
            FN_COURSES_BY_FIELD,
            &[("field", "shortname"), ("value", shortname.as_str())],
        )?;
        let found: CoursesByField = serde_json::from_value(body).map_err(|error| {
            MoodleError::Api {
                function: FN_COURSES_BY_FIELD.to_string(),
                message: format!("unexpected response shape: {error}"),
            }
        })?;
        Ok(found.courses.first().map(|course| CourseId(course.id)))
    }

    fn enrolled_user_emails(&self, course_id: CourseId) -> Result<BTreeSet<Email>> {
        let courseid = course_id.value().to_string();
        let body = self.call(FN_ENROLLED_USERS, &[("courseid", courseid.as_str())])?;
        let users: Vec<UserRecord> = serde_json::from_value(body).map_err(|error| {
            MoodleError::Api {
                function: FN_ENROLLED_USERS.to_string(),
                message: format!("unexpected response shape: {error}"),
            }
        })?;
        // Accounts without a visible email cannot take part in
        // reconciliation; skip them.
        Ok(users
            .into_iter()
            .filter_map(|user| user.email)
            .filter_map(|email| Email::new(email).ok())
            .collect())
    }

    fn user_id_by_email(&self, email: &Email) -> Result<Option<UserId>> {
        let body = self.call(
            FN_USERS_BY_FIELD,
            &[("field", "email"), ("values[0]", email.as_str())],
        )?;
        let users: Vec<UserRecord> = serde_json::from_value(body).map_err(|error| {
            MoodleError::Api {
                function: FN_USERS_BY_FIELD.to_string(),
                message: format!("unexpected response shape: {error}"),
            }
        })?;
        Ok(users.first().map(|user| user.id))
    }
}
