//! HTTP client for the COSI record service.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Backend, Credentials, Oid, OidRef, Table};
use crate::error::{ImportError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Deserialize)]
struct FindResponse {
    data: Vec<FoundDocument>,
}

#[derive(Debug, Deserialize)]
struct FoundDocument {
    #[serde(rename = "_id")]
    id: OidRef,
}

/// Blocking client holding one cookie-authenticated session.
pub struct CosiClient {
    client: Client,
    base_url: String,
}

impl CosiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|source| ImportError::Transport {
                endpoint: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String> {
        debug!("GET {} {:?}", endpoint, query);
        let response = self
            .client
            .get(self.url(endpoint))
            .query(query)
            .send()
            .map_err(|source| transport(endpoint, source))?;
        read_body(endpoint, response)
    }

    fn post(&self, endpoint: &str, form: &[(&str, String)]) -> Result<String> {
        debug!("POST {} {:?}", endpoint, form);
        let response = self
            .client
            .post(self.url(endpoint))
            .form(form)
            .send()
            .map_err(|source| transport(endpoint, source))?;
        read_body(endpoint, response)
    }
}

fn transport(endpoint: &str, source: reqwest::Error) -> ImportError {
    ImportError::Transport {
        endpoint: endpoint.to_string(),
        source,
    }
}

fn read_body(endpoint: &str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().map_err(|source| transport(endpoint, source))?;
    if !status.is_success() {
        // Rejected inserts come back as 400 with an `err` field
        if let Ok(value) = serde_json::from_str::<Value>(&body) {
            check_err(endpoint, &value)?;
        }
        return Err(ImportError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Parse a JSON body, surfacing an `err` field as a service error.
fn parse_json(endpoint: &str, body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|_| ImportError::Malformed {
        endpoint: endpoint.to_string(),
        body: body.to_string(),
    })?;
    check_err(endpoint, &value)?;
    Ok(value)
}

fn check_err(endpoint: &str, value: &Value) -> Result<()> {
    match value.get("err") {
        Some(err) => Err(ImportError::Backend {
            endpoint: endpoint.to_string(),
            message: err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string()),
        }),
        None => Ok(()),
    }
}

/// The login and drop endpoints answer with loose `{err: ...}` text that is
/// not always valid JSON.
fn check_loose_body(endpoint: &str, body: &str) -> Result<()> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return check_err(endpoint, &value);
    }
    let trimmed = body.trim_start_matches(|c: char| c == '{' || c.is_whitespace());
    if trimmed.starts_with("err") || trimmed.starts_with("\"err\"") {
        return Err(ImportError::Backend {
            endpoint: endpoint.to_string(),
            message: body.to_string(),
        });
    }
    Ok(())
}

impl Backend for CosiClient {
    fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let form = [
            ("email", credentials.email.clone()),
            ("token", credentials.password.clone()),
        ];
        let body = self.post("login", &form)?;
        check_loose_body("login", &body)
    }

    fn logout(&mut self) -> Result<()> {
        self.post("logout", &[])?;
        Ok(())
    }

    fn drop_table(&mut self, table: Table) -> Result<()> {
        let endpoint = format!("drop_{}", table);
        let body = self.get(&endpoint, &[])?;
        check_loose_body(&endpoint, &body)
    }

    fn find(&mut self, table: Table, filter: &[(&str, String)], page: u64) -> Result<Vec<Oid>> {
        let endpoint = format!("find_{}", table);
        let mut query = filter.to_vec();
        query.push(("page", page.to_string()));

        let body = self.get(&endpoint, &query)?;
        let value = parse_json(&endpoint, &body)?;
        let found: FindResponse =
            serde_json::from_value(value).map_err(|_| ImportError::Malformed {
                endpoint: endpoint.clone(),
                body,
            })?;
        Ok(found.data.into_iter().map(|d| d.id.oid).collect())
    }

    fn insert(&mut self, table: Table, fields: &[(&'static str, String)]) -> Result<Oid> {
        let endpoint = format!("insert_{}", table);
        let body = self.post(&endpoint, fields)?;
        let value = parse_json(&endpoint, &body)?;
        let created: OidRef = serde_json::from_value(value).map_err(|_| ImportError::Malformed {
            endpoint: endpoint.clone(),
            body,
        })?;
        Ok(created.oid)
    }
}
