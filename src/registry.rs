/// Static table of Pardot API v3 resources, their operations and the
/// identifier tuples each operation accepts.
///
/// Rows were extracted from the provider's published operation tables
/// ("Operation", "URL Format", "Required Parameters"), dropping `user_key`
/// and `api_key` which every request carries anyway.
use crate::errors::PardotError;

/// Ordered parameter names that together identify the target of an operation.
pub type IdentifierTuple = &'static [&'static str];

/// An operation and the argument shapes it accepts, in declaration order.
#[derive(Debug)]
pub struct OperationSpec {
    pub name: &'static str,
    pub identifiers: &'static [IdentifierTuple],
}

/// A resource and its supported operations.
#[derive(Debug)]
pub struct ResourceSpec {
    pub name: &'static str,
    pub operations: &'static [OperationSpec],
}

impl ResourceSpec {
    /// Look up an operation, failing for anything not registered on this resource.
    pub fn operation(&self, name: &str) -> Result<&'static OperationSpec, PardotError> {
        self.operations
            .iter()
            .find(|op| op.name == name)
            .ok_or_else(|| PardotError::UnsupportedOperation {
                resource: self.name.to_string(),
                operation: name.to_string(),
            })
    }

    pub fn supports(&self, name: &str) -> bool {
        self.operations.iter().any(|op| op.name == name)
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &'static str> {
        self.operations.iter().map(|op| op.name)
    }
}

/// Look up a resource by its exact provider-side name.
pub fn resource(name: &str) -> Result<&'static ResourceSpec, PardotError> {
    RESOURCES
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| PardotError::UnsupportedResource(name.to_string()))
}

pub fn resource_names() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|r| r.name)
}

const NONE: &[IdentifierTuple] = &[&[]];
const BY_ID: &[IdentifierTuple] = &[&["id"]];
const BY_EMAIL_OR_ID: &[IdentifierTuple] = &[&["email"], &["id"]];
const BY_CRITERIA: &[IdentifierTuple] = &[&["search_criteria", "result_set_criteria"]];
const BY_ID_OR_MEMBERSHIP: &[IdentifierTuple] = &[&["id"], &["list_id", "prospect_id"]];
const BY_PROSPECTS: &[IdentifierTuple] = &[&["prospects"]];

macro_rules! op {
    ($name:literal => $identifiers:expr) => {
        OperationSpec {
            name: $name,
            identifiers: $identifiers,
        }
    };
}

pub static RESOURCES: &[ResourceSpec] = &[
    ResourceSpec {
        name: "account",
        operations: &[op!("read" => NONE)],
    },
    ResourceSpec {
        name: "campaign",
        operations: &[
            op!("create" => NONE),
            op!("query" => NONE),
            op!("read" => BY_ID),
            op!("update" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "customField",
        operations: &[
            op!("create" => NONE),
            op!("delete" => BY_ID),
            op!("query" => NONE),
            op!("read" => BY_ID),
            op!("update" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "customRedirect",
        operations: &[op!("query" => NONE), op!("read" => BY_ID)],
    },
    ResourceSpec {
        name: "dynamicContent",
        operations: &[op!("query" => NONE), op!("read" => BY_ID)],
    },
    ResourceSpec {
        name: "email",
        operations: &[
            op!("read" => &[&["email"]]),
            op!("send" => &[
                &["campaign_id", "name", "subject"],
                &["list_ids[]", "campaign_id", "name", "subject"],
            ]),
            op!("stats" => &[&["email"]]),
        ],
    },
    ResourceSpec {
        name: "emailClick",
        operations: &[op!("query" => BY_CRITERIA)],
    },
    ResourceSpec {
        name: "emailTemplate",
        operations: &[
            op!("listOneToOne" => NONE),
            op!("read" => &[&["emailTemplateId"]]),
        ],
    },
    ResourceSpec {
        name: "form",
        operations: &[op!("query" => NONE), op!("read" => BY_ID)],
    },
    ResourceSpec {
        name: "lifecycleHistory",
        operations: &[op!("query" => NONE), op!("read" => BY_ID)],
    },
    ResourceSpec {
        name: "lifecycleStage",
        operations: &[op!("query" => NONE)],
    },
    ResourceSpec {
        name: "list",
        operations: &[
            op!("create" => NONE),
            op!("delete" => BY_ID),
            op!("query" => NONE),
            op!("read" => BY_ID),
            op!("update" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "listMembership",
        operations: &[
            op!("create" => &[&["list_id", "prospect_id"]]),
            op!("delete" => BY_ID_OR_MEMBERSHIP),
            op!("query" => NONE),
            op!("read" => BY_ID_OR_MEMBERSHIP),
            op!("update" => BY_ID_OR_MEMBERSHIP),
        ],
    },
    ResourceSpec {
        name: "opportunity",
        operations: &[
            op!("query" => NONE),
            op!("create" => &[
                &["prospect_email", "name", "value", "probability"],
                &["prospect_id", "name", "value", "probability"],
            ]),
            op!("delete" => BY_ID),
            op!("read" => BY_ID),
            op!("undelete" => BY_ID),
            op!("update" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "prospect",
        operations: &[
            op!("query" => NONE),
            op!("assign" => BY_EMAIL_OR_ID),
            op!("batchCreate" => BY_PROSPECTS),
            op!("batchUpdate" => BY_PROSPECTS),
            op!("batchUpsert" => BY_PROSPECTS),
            op!("create" => &[&["email"]]),
            op!("delete" => BY_EMAIL_OR_ID),
            op!("read" => BY_EMAIL_OR_ID),
            op!("unassign" => BY_EMAIL_OR_ID),
            op!("update" => BY_EMAIL_OR_ID),
            op!("upsert" => &[&["email"], &[]]),
        ],
    },
    ResourceSpec {
        name: "prospectAccount",
        operations: &[
            op!("assign" => &[&["id", "user_id"]]),
            op!("create" => NONE),
            op!("describe" => NONE),
            op!("query" => NONE),
            op!("read" => BY_ID),
            op!("update" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "tag",
        operations: &[op!("query" => NONE), op!("read" => BY_ID)],
    },
    ResourceSpec {
        name: "tagObject",
        operations: &[op!("query" => NONE), op!("read" => BY_ID)],
    },
    ResourceSpec {
        name: "user",
        operations: &[op!("query" => NONE), op!("read" => BY_EMAIL_OR_ID)],
    },
    ResourceSpec {
        name: "visit",
        operations: &[
            op!("query" => &[&["visitor_ids", "prospect_ids"]]),
            op!("read" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "visitor",
        operations: &[
            op!("assign" => BY_ID),
            op!("query" => NONE),
            op!("read" => BY_ID),
        ],
    },
    ResourceSpec {
        name: "visitorActivity",
        operations: &[op!("query" => BY_CRITERIA), op!("read" => BY_ID)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_resource_and_operation() {
        let prospect = resource("prospect").unwrap();
        let read = prospect.operation("read").unwrap();
        assert_eq!(read.identifiers, &[&["email"][..], &["id"][..]]);
        assert!(prospect.supports("batchUpsert"));
    }

    #[test]
    fn test_unknown_resource_is_unsupported() {
        let err = resource("dynamic_content").unwrap_err();
        assert!(matches!(err, PardotError::UnsupportedResource(ref name) if name == "dynamic_content"));
    }

    #[test]
    fn test_unknown_operation_is_unsupported() {
        let err = resource("account").unwrap().operation("delete").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation \"delete\" not supported for \"account\""
        );
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = resource_names().collect();
        assert_eq!(names.len(), RESOURCES.len());
        for spec in RESOURCES {
            let ops: HashSet<_> = spec.operation_names().collect();
            assert_eq!(ops.len(), spec.operations.len(), "duplicate op in {}", spec.name);
        }
    }

    #[test]
    fn test_every_operation_has_a_shape() {
        for spec in RESOURCES {
            for op in spec.operations {
                assert!(
                    !op.identifiers.is_empty(),
                    "{}.{} has no identifier tuples",
                    spec.name,
                    op.name
                );
            }
        }
    }
}
