/// Identifier matching for loosely-typed positional arguments.
///
/// Several operations accept more than one identifier shape, e.g.
/// `prospect.read` takes either an email or an id. The matcher guesses which
/// one the caller meant from the argument values. The predicates are
/// heuristics: a numeric string is not an id, and an integer passed where an
/// email is expected simply fails to match. Resolution is first full match in
/// declaration order, never "most specific".
use log::debug;
use serde_json::Value;

use crate::registry::IdentifierTuple;

/// A named shape check over (parameter name, argument value).
///
/// `governs` decides whether the test has an opinion about a parameter name
/// at all; `accepts` then checks the value.
#[derive(Debug, Clone, Copy)]
pub struct ParameterTypeTest {
    pub name: &'static str,
    governs: fn(&str) -> bool,
    accepts: fn(&Value) -> bool,
}

impl ParameterTypeTest {
    pub fn governs(&self, parameter: &str) -> bool {
        (self.governs)(parameter)
    }

    pub fn test(&self, parameter: &str, value: &Value) -> bool {
        self.governs(parameter) && (self.accepts)(value)
    }
}

fn is_integral(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

pub static PARAMETER_TYPE_TESTS: &[ParameterTypeTest] = &[
    ParameterTypeTest {
        name: "ids",
        governs: |p| p == "id" || p.ends_with("_id"),
        accepts: is_integral,
    },
    ParameterTypeTest {
        name: "emails",
        governs: |p| p == "email" || p.ends_with("_email"),
        accepts: Value::is_string,
    },
    ParameterTypeTest {
        name: "lists",
        governs: |p| p.ends_with("[]"),
        accepts: Value::is_array,
    },
];

/// Whether `value` is plausible for `parameter`.
///
/// Names no test governs (`name`, `subject`, `prospects`...) carry no shape
/// information and accept any value.
pub fn position_matches(parameter: &str, value: &Value) -> bool {
    let mut governed = false;
    for test in PARAMETER_TYPE_TESTS {
        if test.test(parameter, value) {
            return true;
        }
        governed |= test.governs(parameter);
    }
    !governed
}

/// Pick the identifier tuple for `arguments` out of `candidates`.
///
/// A lone candidate is returned as-is; the caller validates arity. Otherwise
/// only candidates with one identifier per argument are considered. Returns
/// `None` when no candidate matches.
pub fn match_identifiers(
    candidates: &[IdentifierTuple],
    arguments: &[Value],
) -> Option<IdentifierTuple> {
    if let [only] = candidates {
        return Some(*only);
    }

    let matched = candidates.iter().copied().find(|identifiers| {
        identifiers.len() == arguments.len()
            && identifiers
                .iter()
                .zip(arguments)
                .all(|(parameter, value)| position_matches(parameter, value))
    });
    debug!(
        "params.match_identifiers candidates={} arguments={} matched={:?}",
        candidates.len(),
        arguments.len(),
        matched
    );
    matched
}

/// Form-encode a single argument for use as a URL path segment.
///
/// Strings are encoded verbatim, arrays become comma-joined items and
/// anything else uses its JSON rendering.
pub fn encode_argument(value: &Value) -> String {
    let raw = render(value);
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
