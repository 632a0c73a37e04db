//! Test cases - named, zero-argument test bodies

use crate::assert::Checker;
use std::fmt;
use std::sync::Arc;

/// Error type a test body may return to signal an unexpected fault.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of a test body.
pub type CaseResult = Result<(), BoxError>;

type Body = Arc<dyn Fn(&mut Checker) -> CaseResult + Send + Sync>;

/// A named test case
///
/// Identity is the fully qualified name (`scope::name`). The body gets a fresh
/// [`Checker`] on every run and may be run any number of times.
#[derive(Clone)]
pub struct TestCase {
    name: String,
    scope: String,
    body: Body,
}

impl TestCase {
    /// Create a test case with no scope
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Checker) -> CaseResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            scope: String::new(),
            body: Arc::new(body),
        }
    }

    /// Place this case in a `::`-separated scope
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// `scope::name`, or just `name` for unscoped cases
    pub fn full_name(&self) -> String {
        join_name(&self.scope, &self.name)
    }

    /// Whether this case lives in `scope` or in a scope nested inside it.
    pub fn is_in_scope(&self, scope: &str) -> bool {
        scope.is_empty()
            || self.scope == scope
            || self
                .scope
                .strip_prefix(scope)
                .is_some_and(|rest| rest.starts_with("::"))
    }

    pub(crate) fn call(&self, checker: &mut Checker) -> CaseResult {
        (self.body)(checker)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

pub(crate) fn join_name(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", scope, name)
    }
}
