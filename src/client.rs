/// High-level PardotClient: the entry point for SDK users.
///
/// Resolves resource names against the registry and hands out [`Resource`]
/// proxies that share the client's credentials, retry policy and session.
use log::debug;
use serde_json::Value;

use crate::api::PardotApi;
use crate::config::ClientConfig;
use crate::errors::PardotError;
use crate::registry::{self, ResourceSpec};
use crate::resource::Resource;
use crate::session::{Credentials, Session};

/// The high-level Pardot client.
#[derive(Debug, Clone)]
pub struct PardotClient {
    pub api: PardotApi,
}

impl PardotClient {
    /// Create a client for the production endpoint with no transport retries.
    pub fn new(email: &str, password: &str, user_key: &str) -> Self {
        Self::with_config(
            Credentials::new(email, password, user_key),
            ClientConfig::default(),
        )
    }

    /// Create a client with a custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Self {
        Self {
            api: PardotApi::new(credentials, config),
        }
    }

    /// Set the number of transport retries.
    ///
    /// The session, transport and remaining configuration are kept.
    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.api.config_mut().retry.max_retries = max_retries;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    /// Log in eagerly; calls otherwise log in on first use.
    pub async fn login(&mut self) -> Result<(), PardotError> {
        self.api.login().await
    }

    // -----------------------------------------------------------------------
    // Resource Resolution
    // -----------------------------------------------------------------------

    /// Get a resource by provider name (`dynamicContent`) or snake_case alias
    /// (`dynamic_content`).
    pub fn resource(&mut self, name: &str) -> Result<Resource<'_>, PardotError> {
        let spec = resolve_resource(name)?;
        Ok(Resource::new(&mut self.api, spec))
    }

    /// Invoke `operation` on `resource` in one step.
    pub async fn invoke(
        &mut self,
        resource: &str,
        operation: &str,
        args: &[Value],
        params: &[(&str, &str)],
    ) -> Result<Value, PardotError> {
        self.resource(resource)?.call(operation, args, params).await
    }
}

/// Find the registry entry for a provider name or snake_case alias.
pub fn resolve_resource(name: &str) -> Result<&'static ResourceSpec, PardotError> {
    let api_name = api_resource_name(name);
    debug!("client.resolve_resource name={} api_name={}", name, api_name);
    registry::resource(&api_name)
}

/// Convert a snake_case alias to the provider's camelCase name.
///
/// The first word is kept as written and each later word is capitalized
/// with the rest lowercased, so `email_template` becomes `emailTemplate`.
/// Names without underscores pass through unchanged.
pub fn api_resource_name(name: &str) -> String {
    if !name.contains('_') {
        return name.to_string();
    }
    let mut parts = name.split('_');
    let mut api_name = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            api_name.extend(first.to_uppercase());
            api_name.push_str(&chars.as_str().to_lowercase());
        }
    }
    api_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_resource_name() {
        assert_eq!(api_resource_name("prospect"), "prospect");
        assert_eq!(api_resource_name("dynamicContent"), "dynamicContent");
        assert_eq!(api_resource_name("dynamic_content"), "dynamicContent");
        assert_eq!(api_resource_name("visitor_activity"), "visitorActivity");
        assert_eq!(api_resource_name("list_MEMBERSHIP"), "listMembership");
    }

    #[test]
    fn test_alias_resolves_to_same_resource() {
        let by_alias = resolve_resource("dynamic_content").unwrap();
        let by_name = resolve_resource("dynamicContent").unwrap();
        assert!(std::ptr::eq(by_alias, by_name));
    }

    #[test]
    fn test_unknown_resource_fails_at_access() {
        let mut client = PardotClient::new("me@example.com", "pw", "uk");
        let err = client.resource("not_a_thing").unwrap_err();
        assert_eq!(err.to_string(), "Resource \"notAThing\" not supported");
    }

    #[test]
    fn test_with_retries_keeps_other_settings() {
        let client = PardotClient::with_config(
            Credentials::new("me@example.com", "pw", "uk"),
            ClientConfig::with_api_base("http://localhost:9999/api"),
        )
        .with_retries(4);
        assert_eq!(client.config().retry.max_retries, 4);
        assert_eq!(client.config().api_base, "http://localhost:9999/api");
        assert!(!client.session().is_authenticated());
    }
}
