//! Restricted environment expansion for user-supplied text.
//!
//! Context, target URL and comment text may reference a handful of build
//! variables (`$BUILD_ID`, `${BUILD_PIPELINE_NAME}`, ...). Only names on
//! [`EXPANDABLE_VARS`] are substituted; every other reference is copied
//! through verbatim so comment files cannot read arbitrary process
//! environment.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Variables that may be substituted into outgoing text.
pub const EXPANDABLE_VARS: &[&str] = &[
    "BUILD_ID",
    "BUILD_NAME",
    "BUILD_JOB_NAME",
    "BUILD_PIPELINE_NAME",
    "BUILD_TEAM_NAME",
    "ATC_EXTERNAL_URL",
];

/// Whether `name` is on the expansion allow-list.
pub fn is_expandable(name: &str) -> bool {
    EXPANDABLE_VARS.contains(&name)
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))")
            .expect("regex for variable references")
    })
}

/// Expand allow-listed `$NAME` / `${NAME}` references using `lookup`.
///
/// An allow-listed name that `lookup` cannot resolve expands to the empty
/// string. Anything else, including a lone `$`, is left untouched.
pub fn expand_with<F>(text: &str, lookup: F) -> Cow<'_, str>
where
    F: Fn(&str) -> Option<String>,
{
    reference_pattern().replace_all(text, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if is_expandable(name) {
            lookup(name).unwrap_or_default()
        } else {
            caps[0].to_owned()
        }
    })
}

/// Lookup over the live process environment, for use with [`expand_with`].
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
