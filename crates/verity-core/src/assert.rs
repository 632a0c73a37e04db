//! Assertion primitives for test bodies
//!
//! A test body receives a [`Checker`] and makes its assertions through it.
//! Assertions never stop the body: every call is recorded, passing or not,
//! and the runner decides the outcome once the body returns.
//!
//! # API
//!
//! ## Basic
//! - `check(condition, message)` - assert condition is true
//! - `check_false(condition, message)` - assert condition is false
//!
//! ## Equality
//! - `equal(expected, actual, message)` - assert `expected == actual`
//! - `not_equal(expected, actual, message)` - assert `expected != actual`
//!
//! ## Collections
//! - `len(collection, expected, message)` - assert element count
//! - `contains(collection, item, message)` - assert collection contains item
//! - `not_contains(collection, item, message)` - assert item is absent
//! - `empty(collection, message)` - assert collection has no elements
//!
//! ## Result / Option
//! - `ok(result, message)` / `err(result, message)`
//! - `some(option, message)` / `none(option, message)`
//!
//! Each method has a macro counterpart (`check_eq!`, `check_len!`, ...) that
//! borrows its operands and takes an optional `format!`-style message.

use serde::Serialize;
use std::fmt::{self, Debug};
use std::panic::Location;

/// The form of an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    True,
    False,
    Equal,
    NotEqual,
    Length,
    Contains,
    NotContains,
    Empty,
    Ok,
    Err,
    Some,
    None,
}

impl AssertionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionKind::True => "true",
            AssertionKind::False => "false",
            AssertionKind::Equal => "equal",
            AssertionKind::NotEqual => "not_equal",
            AssertionKind::Length => "length",
            AssertionKind::Contains => "contains",
            AssertionKind::NotContains => "not_contains",
            AssertionKind::Empty => "empty",
            AssertionKind::Ok => "ok",
            AssertionKind::Err => "err",
            AssertionKind::Some => "some",
            AssertionKind::None => "none",
        }
    }

    /// One-line description of what went wrong when this kind fails.
    fn failure_summary(&self) -> &'static str {
        match self {
            AssertionKind::True => "condition is false",
            AssertionKind::False => "condition is true (expected false)",
            AssertionKind::Equal => "values not equal",
            AssertionKind::NotEqual => "values are equal (expected them to differ)",
            AssertionKind::Length => "unexpected length",
            AssertionKind::Contains => "collection does not contain the element",
            AssertionKind::NotContains => "collection contains the element",
            AssertionKind::Empty => "collection is not empty",
            AssertionKind::Ok => "expected Ok, got Err",
            AssertionKind::Err => "expected Err, got Ok",
            AssertionKind::Some => "expected Some, got None",
            AssertionKind::None => "expected None, got Some",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an assertion was made
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single recorded assertion
///
/// `expected` and `actual` hold the `Debug` rendering of the compared values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assertion {
    pub kind: AssertionKind,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub location: SourceLocation,
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            return write!(f, "{}: ok", self.kind);
        }
        write!(
            f,
            "{}: {}\n  Actual:   {}\n  Expected: {}",
            self.kind,
            self.kind.failure_summary(),
            self.actual,
            self.expected
        )?;
        if let Some(message) = &self.message {
            write!(f, "\n  Message:  {}", message)?;
        }
        Ok(())
    }
}

/// Records the assertions made by one test body
#[derive(Debug, Default)]
pub struct Checker {
    assertions: Vec<Assertion>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// All assertions recorded so far, in call order.
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn into_assertions(self) -> Vec<Assertion> {
        self.assertions
    }

    /// Whether any recorded assertion failed
    pub fn has_failures(&self) -> bool {
        self.assertions.iter().any(|a| !a.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter().filter(|a| !a.passed)
    }

    #[track_caller]
    fn record(
        &mut self,
        kind: AssertionKind,
        passed: bool,
        expected: String,
        actual: String,
        message: Option<String>,
    ) -> bool {
        let location = SourceLocation::from(Location::caller());
        if !passed {
            tracing::debug!(%kind, %location, "assertion failed");
        }
        self.assertions.push(Assertion {
            kind,
            passed,
            expected,
            actual,
            message,
            location,
        });
        passed
    }

    // ------------------------------------------------------------------------
    // Basic assertions
    // ------------------------------------------------------------------------

    /// Passes if `condition` is true.
    #[track_caller]
    pub fn check(&mut self, condition: bool, message: Option<String>) -> bool {
        self.record(
            AssertionKind::True,
            condition,
            "true".to_string(),
            condition.to_string(),
            message,
        )
    }

    /// Passes if `condition` is false.
    #[track_caller]
    pub fn check_false(&mut self, condition: bool, message: Option<String>) -> bool {
        self.record(
            AssertionKind::False,
            !condition,
            "false".to_string(),
            condition.to_string(),
            message,
        )
    }

    // ------------------------------------------------------------------------
    // Equality assertions
    // ------------------------------------------------------------------------

    /// Passes if `expected == actual`.
    #[track_caller]
    pub fn equal<E, A>(&mut self, expected: E, actual: A, message: Option<String>) -> bool
    where
        E: PartialEq<A> + Debug,
        A: Debug,
    {
        let passed = expected == actual;
        self.record(
            AssertionKind::Equal,
            passed,
            format!("{:?}", expected),
            format!("{:?}", actual),
            message,
        )
    }

    /// Passes if `expected != actual`.
    #[track_caller]
    pub fn not_equal<E, A>(&mut self, expected: E, actual: A, message: Option<String>) -> bool
    where
        E: PartialEq<A> + Debug,
        A: Debug,
    {
        let passed = expected != actual;
        self.record(
            AssertionKind::NotEqual,
            passed,
            format!("not {:?}", expected),
            format!("{:?}", actual),
            message,
        )
    }

    // ------------------------------------------------------------------------
    // Collection assertions
    // ------------------------------------------------------------------------

    /// Passes if iterating `collection` yields exactly `expected` elements.
    #[track_caller]
    pub fn len<'a, C>(&mut self, collection: &'a C, expected: usize, message: Option<String>) -> bool
    where
        C: Debug + ?Sized,
        &'a C: IntoIterator,
    {
        let actual = collection.into_iter().count();
        self.record(
            AssertionKind::Length,
            actual == expected,
            expected.to_string(),
            format!("{} {:?}", actual, collection),
            message,
        )
    }

    /// Passes if some element of `collection` equals `item`.
    #[track_caller]
    pub fn contains<'a, C, T>(&mut self, collection: &'a C, item: &T, message: Option<String>) -> bool
    where
        C: Debug + ?Sized,
        &'a C: IntoIterator<Item = &'a T>,
        T: PartialEq + Debug + 'a,
    {
        let found = collection.into_iter().any(|element| element == item);
        self.record(
            AssertionKind::Contains,
            found,
            format!("{:?}", item),
            format!("{:?}", collection),
            message,
        )
    }

    /// Passes if no element of `collection` equals `item`.
    #[track_caller]
    pub fn not_contains<'a, C, T>(
        &mut self,
        collection: &'a C,
        item: &T,
        message: Option<String>,
    ) -> bool
    where
        C: Debug + ?Sized,
        &'a C: IntoIterator<Item = &'a T>,
        T: PartialEq + Debug + 'a,
    {
        let found = collection.into_iter().any(|element| element == item);
        self.record(
            AssertionKind::NotContains,
            !found,
            format!("no {:?}", item),
            format!("{:?}", collection),
            message,
        )
    }

    /// Passes if `collection` yields no elements.
    #[track_caller]
    pub fn empty<'a, C>(&mut self, collection: &'a C, message: Option<String>) -> bool
    where
        C: Debug + ?Sized,
        &'a C: IntoIterator,
    {
        let is_empty = collection.into_iter().next().is_none();
        self.record(
            AssertionKind::Empty,
            is_empty,
            "empty".to_string(),
            format!("{:?}", collection),
            message,
        )
    }

    // ------------------------------------------------------------------------
    // Result / Option assertions
    // ------------------------------------------------------------------------

    #[track_caller]
    pub fn ok<T: Debug, E: Debug>(&mut self, result: &Result<T, E>, message: Option<String>) -> bool {
        self.record(
            AssertionKind::Ok,
            result.is_ok(),
            "Ok(..)".to_string(),
            format!("{:?}", result),
            message,
        )
    }

    #[track_caller]
    pub fn err<T: Debug, E: Debug>(&mut self, result: &Result<T, E>, message: Option<String>) -> bool {
        self.record(
            AssertionKind::Err,
            result.is_err(),
            "Err(..)".to_string(),
            format!("{:?}", result),
            message,
        )
    }

    #[track_caller]
    pub fn some<T: Debug>(&mut self, option: &Option<T>, message: Option<String>) -> bool {
        self.record(
            AssertionKind::Some,
            option.is_some(),
            "Some(..)".to_string(),
            format!("{:?}", option),
            message,
        )
    }

    #[track_caller]
    pub fn none<T: Debug>(&mut self, option: &Option<T>, message: Option<String>) -> bool {
        self.record(
            AssertionKind::None,
            option.is_none(),
            "None".to_string(),
            format!("{:?}", option),
            message,
        )
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Asserts a condition is true: `check!(t, cond)` or `check!(t, cond, "msg {}", x)`.
#[macro_export]
macro_rules! check {
    ($checker:expr, $cond:expr $(,)?) => {
        $checker.check($cond, ::core::option::Option::None)
    };
    ($checker:expr, $cond:expr, $($arg:tt)+) => {
        $checker.check($cond, ::core::option::Option::Some(::std::format!($($arg)+)))
    };
}

#[macro_export]
macro_rules! check_false {
    ($checker:expr, $cond:expr $(,)?) => {
        $checker.check_false($cond, ::core::option::Option::None)
    };
    ($checker:expr, $cond:expr, $($arg:tt)+) => {
        $checker.check_false($cond, ::core::option::Option::Some(::std::format!($($arg)+)))
    };
}

/// Asserts `expected == actual`. Operands are borrowed, not moved.
#[macro_export]
macro_rules! check_eq {
    ($checker:expr, $expected:expr, $actual:expr $(,)?) => {
        $checker.equal(&$expected, &$actual, ::core::option::Option::None)
    };
    ($checker:expr, $expected:expr, $actual:expr, $($arg:tt)+) => {
        $checker.equal(
            &$expected,
            &$actual,
            ::core::option::Option::Some(::std::format!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! check_ne {
    ($checker:expr, $expected:expr, $actual:expr $(,)?) => {
        $checker.not_equal(&$expected, &$actual, ::core::option::Option::None)
    };
    ($checker:expr, $expected:expr, $actual:expr, $($arg:tt)+) => {
        $checker.not_equal(
            &$expected,
            &$actual,
            ::core::option::Option::Some(::std::format!($($arg)+)),
        )
    };
}

/// Asserts the element count of a collection: `check_len!(t, vec, 3)`.
#[macro_export]
macro_rules! check_len {
    ($checker:expr, $collection:expr, $expected:expr $(,)?) => {
        $checker.len(&$collection, $expected, ::core::option::Option::None)
    };
    ($checker:expr, $collection:expr, $expected:expr, $($arg:tt)+) => {
        $checker.len(
            &$collection,
            $expected,
            ::core::option::Option::Some(::std::format!($($arg)+)),
        )
    };
}

/// Asserts a collection contains an element: `check_contains!(t, vec, 2)`.
#[macro_export]
macro_rules! check_contains {
    ($checker:expr, $collection:expr, $item:expr $(,)?) => {
        $checker.contains(&$collection, &$item, ::core::option::Option::None)
    };
    ($checker:expr, $collection:expr, $item:expr, $($arg:tt)+) => {
        $checker.contains(
            &$collection,
            &$item,
            ::core::option::Option::Some(::std::format!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! check_not_contains {
    ($checker:expr, $collection:expr, $item:expr $(,)?) => {
        $checker.not_contains(&$collection, &$item, ::core::option::Option::None)
    };
    ($checker:expr, $collection:expr, $item:expr, $($arg:tt)+) => {
        $checker.not_contains(
            &$collection,
            &$item,
            ::core::option::Option::Some(::std::format!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! check_empty {
    ($checker:expr, $collection:expr $(,)?) => {
        $checker.empty(&$collection, ::core::option::Option::None)
    };
    ($checker:expr, $collection:expr, $($arg:tt)+) => {
        $checker.empty(
            &$collection,
            ::core::option::Option::Some(::std::format!($($arg)+)),
        )
    };
}

// ============================================================================
// Unit tests
// ============================================================================
