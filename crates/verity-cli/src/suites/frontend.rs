//! Frontend sample tests, grouped the way `describe`/`it` blocks nest

use verity_core::{check_contains, check_eq, check_len, SuiteError, TestSuite};

pub fn register(suite: &mut TestSuite) -> Result<(), SuiteError> {
    suite.scope("frontend", |s| {
        s.scope("sample test", |s| {
            s.case("should pass a basic test", |t| {
                check_eq!(t, 2, 1 + 1);
                Ok(())
            })?;

            s.case("should work with arrays", |t| {
                let arr = vec![1, 2, 3];
                check_len!(t, arr, 3);
                check_contains!(t, arr, 2);
                Ok(())
            })
        })
    })
}
