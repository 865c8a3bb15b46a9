/// Resource proxy: dispatches named operations on one Pardot resource.
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::PardotApi;
use crate::errors::PardotError;
use crate::params::{encode_argument, match_identifiers};
use crate::registry::ResourceSpec;

/// A resource bound to a client's session.
///
/// Borrowing the executor mutably keeps at most one request in flight per
/// session, so login and re-login never race.
#[derive(Debug)]
pub struct Resource<'a> {
    api: &'a mut PardotApi,
    spec: &'static ResourceSpec,
}

impl<'a> Resource<'a> {
    pub(crate) fn new(api: &'a mut PardotApi, spec: &'static ResourceSpec) -> Self {
        Self { api, spec }
    }

    /// Provider-side resource name, e.g. `dynamicContent`.
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        self.spec
    }

    /// Build the request path for `operation` with positional `args`.
    ///
    /// `prospect.read("a@b.com")` becomes
    /// `prospect/version/3/do/read/email/a%40b.com/`.
    pub fn path(&self, operation: &str, args: &[Value]) -> Result<String, PardotError> {
        build_path(self.spec, self.api.config().api_version, operation, args)
    }

    /// Invoke `operation` with identifier `args` and extra payload `params`.
    pub async fn call(
        &mut self,
        operation: &str,
        args: &[Value],
        params: &[(&str, &str)],
    ) -> Result<Value, PardotError> {
        let path = self.path(operation, args)?;
        debug!(
            "resource.call resource={} operation={} path={}",
            self.spec.name, operation, path
        );
        self.api.request(&path, params).await
    }

    /// Like [`Resource::call`], deserializing the response into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &mut self,
        operation: &str,
        args: &[Value],
        params: &[(&str, &str)],
    ) -> Result<T, PardotError> {
        let content = self.call(operation, args, params).await?;
        Ok(serde_json::from_value(content)?)
    }
}

/// Resolve identifiers for `args` and lay out the operation path.
pub fn build_path(
    spec: &ResourceSpec,
    api_version: u32,
    operation: &str,
    args: &[Value],
) -> Result<String, PardotError> {
    let op = spec.operation(operation)?;
    let identifiers = match_identifiers(op.identifiers, args).unwrap_or_default();
    if identifiers.len() != args.len() {
        return Err(PardotError::ArgumentMismatch {
            resource: spec.name.to_string(),
            operation: operation.to_string(),
            arguments: args.len(),
            identifiers: identifiers.len(),
        });
    }

    let mut path = format!("{}/version/{}/do/{}/", spec.name, api_version, operation);
    for (identifier, arg) in identifiers.iter().zip(args) {
        path.push_str(identifier);
        path.push('/');
        path.push_str(&encode_argument(arg));
        path.push('/');
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::resource;
    use serde_json::json;

    fn path(resource_name: &str, operation: &str, args: &[Value]) -> Result<String, PardotError> {
        build_path(resource(resource_name).unwrap(), 3, operation, args)
    }

    #[test]
    fn test_path_without_identifiers() {
        assert_eq!(
            path("prospect", "query", &[]).unwrap(),
            "prospect/version/3/do/query/"
        );
    }

    #[test]
    fn test_path_with_email() {
        assert_eq!(
            path("prospect", "read", &[json!("a@b.com")]).unwrap(),
            "prospect/version/3/do/read/email/a%40b.com/"
        );
    }

    #[test]
    fn test_path_with_id() {
        assert_eq!(
            path("prospect", "read", &[json!(42)]).unwrap(),
            "prospect/version/3/do/read/id/42/"
        );
    }

    #[test]
    fn test_path_with_multiple_identifiers() {
        assert_eq!(
            path("listMembership", "read", &[json!(5), json!(9)]).unwrap(),
            "listMembership/version/3/do/read/list_id/5/prospect_id/9/"
        );
        assert_eq!(
            path("opportunity", "create", &[json!("a@b.com"), json!("Big Deal"), json!(100), json!(0.5)])
                .unwrap(),
            "opportunity/version/3/do/create/prospect_email/a%40b.com/name/Big+Deal/value/100/probability/0.5/"
        );
    }

    #[test]
    fn test_upsert_with_and_without_email() {
        assert_eq!(
            path("prospect", "upsert", &[]).unwrap(),
            "prospect/version/3/do/upsert/"
        );
        assert_eq!(
            path("prospect", "upsert", &[json!("a@b.com")]).unwrap(),
            "prospect/version/3/do/upsert/email/a%40b.com/"
        );
    }

    #[test]
    fn test_unsupported_operation() {
        let err = path("tag", "delete", &[json!(1)]).unwrap_err();
        assert!(matches!(err, PardotError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = path("campaign", "read", &[json!(1), json!(2)]).unwrap_err();
        match err {
            PardotError::ArgumentMismatch {
                arguments,
                identifiers,
                ..
            } => {
                assert_eq!(arguments, 2);
                assert_eq!(identifiers, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_argument() {
        let err = path("campaign", "read", &[]).unwrap_err();
        assert!(matches!(
            err,
            PardotError::ArgumentMismatch {
                arguments: 0,
                identifiers: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_no_identifiers_resolved() {
        let err = path("prospect", "read", &[json!(1.5)]).unwrap_err();
        assert!(matches!(
            err,
            PardotError::ArgumentMismatch {
                arguments: 1,
                identifiers: 0,
                ..
            }
        ));
    }
}
