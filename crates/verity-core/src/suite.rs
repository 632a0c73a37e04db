//! Test suites - registration and discovery of test cases

use crate::assert::Checker;
use crate::case::{join_name, CaseResult, TestCase};
use thiserror::Error;

/// Errors raised while registering test cases
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuiteError {
    #[error("test case name must not be empty")]
    EmptyName,

    #[error("duplicate test case: {0}")]
    DuplicateName(String),
}

/// A set of uniquely named test cases
///
/// Cases are kept sorted by full name so discovery order is deterministic
/// regardless of registration order.
#[derive(Debug, Default, Clone)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test case
    pub fn add(&mut self, case: TestCase) -> Result<(), SuiteError> {
        if case.name().is_empty() {
            return Err(SuiteError::EmptyName);
        }
        let full_name = case.full_name();
        match self
            .cases
            .binary_search_by(|existing| existing.full_name().cmp(&full_name))
        {
            Ok(_) => Err(SuiteError::DuplicateName(full_name)),
            Err(index) => {
                self.cases.insert(index, case);
                Ok(())
            }
        }
    }

    /// Register a group of cases under `scope`
    ///
    /// ```
    /// use verity_core::{check_eq, TestSuite};
    ///
    /// let mut suite = TestSuite::new();
    /// suite
    ///     .scope("math", |s| {
    ///         s.case("addition", |t| {
    ///             check_eq!(t, 2, 1 + 1);
    ///             Ok(())
    ///         })
    ///     })
    ///     .unwrap();
    /// assert_eq!(suite.names(), vec!["math::addition"]);
    /// ```
    pub fn scope<F>(&mut self, scope: &str, register: F) -> Result<(), SuiteError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), SuiteError>,
    {
        let mut group = Scope {
            suite: self,
            path: scope.to_string(),
        };
        register(&mut group)
    }

    /// Merge every case of `other` into this suite
    pub fn extend(&mut self, other: TestSuite) -> Result<(), SuiteError> {
        for case in other.cases {
            self.add(case)?;
        }
        Ok(())
    }

    /// Keep only cases whose full name contains `pattern`
    pub fn filter(&self, pattern: &str) -> Self {
        self.retain(|case| case.full_name().contains(pattern))
    }

    /// Keep only cases in `scope` or in scopes nested inside it
    pub fn in_scope(&self, scope: &str) -> Self {
        self.retain(|case| case.is_in_scope(scope))
    }

    fn retain(&self, keep: impl Fn(&TestCase) -> bool) -> Self {
        TestSuite {
            cases: self.cases.iter().filter(|&case| keep(case)).cloned().collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Full names of all cases, in discovery order
    pub fn names(&self) -> Vec<String> {
        self.cases.iter().map(TestCase::full_name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }
}

impl<'a> IntoIterator for &'a TestSuite {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

/// Registration handle for one scope, see [`TestSuite::scope`]
pub struct Scope<'s> {
    suite: &'s mut TestSuite,
    path: String,
}

impl Scope<'_> {
    /// Register a case in this scope
    pub fn case<F>(&mut self, name: &str, body: F) -> Result<(), SuiteError>
    where
        F: Fn(&mut Checker) -> CaseResult + Send + Sync + 'static,
    {
        self.suite
            .add(TestCase::new(name, body).in_scope(self.path.clone()))
    }

    /// Register a nested scope
    pub fn scope<F>(&mut self, name: &str, register: F) -> Result<(), SuiteError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), SuiteError>,
    {
        let mut nested = Scope {
            suite: &mut *self.suite,
            path: join_name(&self.path, name),
        };
        register(&mut nested)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
