//! `app` package tests

use verity_core::{check_contains, check_eq, check_len, SuiteError, TestSuite};

pub fn register(suite: &mut TestSuite) -> Result<(), SuiteError> {
    suite.scope("app", |s| {
        s.case("sample_test", |t| {
            check_eq!(t, 2, 1 + 1, "Basic math should work");
            Ok(())
        })?;

        s.case("slice_contains", |t| {
            let slice = [1, 2, 3];
            check_len!(t, slice, 3);
            check_contains!(t, slice, 2);
            Ok(())
        })
    })
}
