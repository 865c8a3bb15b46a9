/// Request executor for the Pardot API.
///
/// Every call is a form-encoded POST with `Accept: application/json`.
/// Connection-level failures are retried with Fibonacci backoff; API-level
/// failures are not, except that an expired `api_key` triggers exactly one
/// re-login and replay of the request.
use log::{debug, warn};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::errors::PardotError;
use crate::models::{check_api_status, LoginResponse};
use crate::session::{Credentials, Relogin, Session};

/// Form payload sent with a request.
pub type Payload = Vec<(String, String)>;

/// Fields every operation request carries; caller params of these names
/// replace the default instead of repeating it.
const STANDARD_FIELDS: &[&str] = &["email", "user_key", "format", "api_key"];

/// Low-level executor owning the transport, credentials and session.
#[derive(Debug, Clone)]
pub struct PardotApi {
    client: Client,
    config: ClientConfig,
    credentials: Credentials,
    session: Session,
}

impl PardotApi {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            credentials,
            session: Session::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Full URL for a path relative to the API base.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base, path.trim_start_matches('/'))
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// POST login/version/N - exchange credentials for an `api_key`.
    pub async fn login(&mut self) -> Result<(), PardotError> {
        debug!(
            "api.login email={} api_version={}",
            self.credentials.email, self.config.api_version
        );
        let url = self.url(&format!("login/version/{}", self.config.api_version));
        let payload: Payload = vec![
            ("email".into(), self.credentials.email.clone()),
            ("password".into(), self.credentials.password.clone()),
            ("user_key".into(), self.credentials.user_key.clone()),
            ("format".into(), "json".into()),
        ];
        let (status, content) = self.post(&url, &payload).await?;
        let login: LoginResponse =
            serde_json::from_value(content).map_err(|e| PardotError::MalformedResponse {
                status,
                request: describe(&url),
                message: format!("login response without api_key: {e}"),
            })?;
        self.session.authenticate(login.api_key);
        debug!("api.login authenticated");
        Ok(())
    }

    /// Run an operation request, logging in first if needed.
    ///
    /// `params` override the standard fields of the same name; any other
    /// pairs are sent as given, repeats included.
    pub async fn request(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, PardotError> {
        let url = self.url(path);
        if !self.session.is_authenticated() {
            self.login().await?;
        }

        let mut relogin = Relogin::Available;
        loop {
            let payload = self.payload(params);
            let result = self.post(&url, &payload).await;
            match result {
                Err(e) if e.is_token_expired() && relogin.take() => {
                    debug!("api.request token_expired url={} relogin=true", url);
                    self.session.invalidate();
                    self.login().await?;
                }
                result => return result.map(|(_, content)| content),
            }
        }
    }

    /// Standard fields merged with operation-specific ones.
    fn payload(&self, params: &[(&str, &str)]) -> Payload {
        let mut payload: Payload = vec![
            ("email".into(), self.credentials.email.clone()),
            ("user_key".into(), self.credentials.user_key.clone()),
            ("format".into(), "json".into()),
        ];
        if let Some(api_key) = self.session.api_key() {
            payload.push(("api_key".into(), api_key.to_string()));
        }
        for (key, value) in params {
            let standard = STANDARD_FIELDS.contains(key);
            match payload.iter_mut().find(|(k, _)| standard && k == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => payload.push((key.to_string(), value.to_string())),
            }
        }
        payload
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// POST a form, retrying transport failures, then decode the envelope.
    ///
    /// Returns the HTTP status alongside the checked body.
    async fn post(
        &self,
        url: &str,
        payload: &Payload,
    ) -> Result<(u16, serde_json::Value), PardotError> {
        let request = describe(url);
        let retry = &self.config.retry;
        let mut retried = 0;
        let (status, text) = loop {
            debug!("api.post url={} attempt={}", url, retried + 1);
            match self.send(url, payload).await {
                Ok(response) => break response,
                Err(e) if e.is_transport() && retried < retry.max_retries => {
                    retried += 1;
                    let delay = retry.delay_for(retried);
                    warn!(
                        "api.post transport_error url={} retry={}/{} delay_ms={} error={}",
                        url,
                        retried,
                        retry.max_retries,
                        delay.as_millis(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        };

        debug!("api.post status={} body_len={}", status, text.len());
        let body: serde_json::Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => {
                debug!("api.post decode_failed status={} error={}", status, e);
                return Err(PardotError::MalformedResponse {
                    status,
                    request,
                    message: e.to_string(),
                });
            }
        };
        check_api_status(body, &request).map(|content| (status, content))
    }

    async fn send(&self, url: &str, payload: &Payload) -> Result<(u16, String), PardotError> {
        let resp = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .form(payload)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        Ok((status, text))
    }
}

fn describe(url: &str) -> String {
    format!("POST {url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> PardotApi {
        PardotApi::new(
            Credentials::new("me@example.com", "pw", "uk"),
            ClientConfig::default(),
        )
    }

    fn get<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
        payload
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_url_joins_base_and_path() {
        assert_eq!(
            api().url("prospect/version/3/do/query/"),
            "https://pi.pardot.com/api/prospect/version/3/do/query/"
        );
    }

    #[test]
    fn test_payload_before_login_has_no_api_key() {
        let payload = api().payload(&[]);
        assert_eq!(get(&payload, "email"), Some("me@example.com"));
        assert_eq!(get(&payload, "user_key"), Some("uk"));
        assert_eq!(get(&payload, "format"), Some("json"));
        assert_eq!(get(&payload, "api_key"), None);
        assert_eq!(get(&payload, "password"), None);
    }

    #[test]
    fn test_payload_merges_params() {
        let mut api = api();
        api.session.authenticate("key".into());
        let payload = api.payload(&[("limit", "200"), ("format", "xml")]);
        assert_eq!(get(&payload, "api_key"), Some("key"));
        assert_eq!(get(&payload, "limit"), Some("200"));
        assert_eq!(get(&payload, "format"), Some("xml"));
        assert_eq!(payload.iter().filter(|(k, _)| k == "format").count(), 1);
    }

    #[test]
    fn test_payload_keeps_repeated_params() {
        let payload = api().payload(&[("list_ids[]", "1"), ("list_ids[]", "2")]);
        let lists: Vec<&str> = payload
            .iter()
            .filter(|(k, _)| k == "list_ids[]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(lists, ["1", "2"]);
    }
}
