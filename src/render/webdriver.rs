// src/render/webdriver.rs
//
// W3C WebDriver client that attaches to an already-running, debuggable
// browser through a driver endpoint (e.g. chromedriver on :9515).

use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::consts::HTTP_TIMEOUT_SECS;
use crate::core::TableProbe;
use crate::error::RenderError;

use super::Renderer;

/// Counts rows/td/th of the first table in one round trip.
const PROBE_SCRIPT: &str = "const t = document.querySelector('table');\
    if (!t) { return null; }\
    return [t.querySelectorAll('tr').length,\
            t.querySelectorAll('td').length,\
            t.querySelectorAll('th').length];";

const PROBE_RETRY_MS: u64 = 250;

#[derive(Debug, Deserialize)]
struct Envelope {
    value: Value,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

pub struct WebDriverRenderer {
    client: reqwest::blocking::Client,
    base: String,
    session: Option<String>,
}

impl WebDriverRenderer {
    /// Open a session attached to the browser listening at `debugger_address`.
    pub fn connect(webdriver_url: &str, debugger_address: &str) -> Result<Self, RenderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        let mut this = Self {
            client,
            base: webdriver_url.trim_end_matches('/').to_string(),
            session: None,
        };

        let caps = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "debuggerAddress": debugger_address }
                }
            }
        });
        let value = this.call(reqwest::Method::POST, "/session", Some(caps), "new session")?;
        let created: NewSession = serde_json::from_value(value).map_err(|e| RenderError::Protocol {
            command: "new session",
            message: e.to_string(),
        })?;

        logf!("WebDriver: session {} via {}", created.session_id, this.base);
        this.session = Some(created.session_id);
        Ok(this)
    }

    /// End the driver session. The attached browser keeps running.
    pub fn disconnect(&mut self) {
        if self.session.is_some() {
            if let Err(e) = self.session_call(reqwest::Method::DELETE, "", None, "delete session") {
                logw!("WebDriver: delete session failed: {e}");
            }
            self.session = None;
        }
    }

    fn session_call(
        &self,
        method: reqwest::Method,
        suffix: &str,
        body: Option<Value>,
        command: &'static str,
    ) -> Result<Value, RenderError> {
        let id = self.session.as_deref().ok_or(RenderError::NoSession)?;
        self.call(method, &format!("/session/{id}{suffix}"), body, command)
    }

    fn call(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Value>,
        command: &'static str,
    ) -> Result<Value, RenderError> {
        let url = join!(&self.base, path);
        let mut req = self.client.request(method, &url);
        if let Some(b) = body {
            req = req.json(&b);
        }
        let resp = req.send()?;
        let status = resp.status();
        let env: Envelope = resp.json().map_err(|e| RenderError::Protocol {
            command,
            message: format!("HTTP {status}: unreadable body: {e}"),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_value::<WireError>(env.value) {
                Ok(w) => join!(&w.error, ": ", &w.message),
                Err(_) => format!("HTTP {status}"),
            };
            return Err(RenderError::Protocol { command, message });
        }
        Ok(env.value)
    }

    fn probe_once(&self) -> Result<Option<TableProbe>, RenderError> {
        let value = self.session_call(
            reqwest::Method::POST,
            "/execute/sync",
            Some(json!({ "script": PROBE_SCRIPT, "args": [] })),
            "execute script",
        )?;
        Ok(parse_probe(&value))
    }
}

fn parse_probe(value: &Value) -> Option<TableProbe> {
    let arr = value.as_array()?;
    let n = |i: usize| arr.get(i).and_then(Value::as_u64).unwrap_or(0) as usize;
    Some(TableProbe { rows: n(0), data_cells: n(1), header_cells: n(2) })
}

impl Drop for WebDriverRenderer {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Renderer for WebDriverRenderer {
    fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        logd!("WebDriver: navigate {url}");
        self.session_call(reqwest::Method::POST, "/url", Some(json!({ "url": url })), "navigate")?;
        Ok(())
    }

    fn probe_table(&mut self, wait: Duration) -> Result<Option<TableProbe>, RenderError> {
        let deadline = Instant::now() + wait;
        loop {
            if let Some(p) = self.probe_once()? {
                return Ok(Some(p));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep((deadline - now).min(Duration::from_millis(PROBE_RETRY_MS)));
        }
    }

    fn page_source(&mut self) -> Result<Option<String>, RenderError> {
        let value = self.session_call(reqwest::Method::GET, "/source", None, "get page source")?;
        Ok(value.as_str().map(str::to_string))
    }
}
