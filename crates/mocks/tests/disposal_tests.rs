//! Disposal Tests
//!
//! Disposable and read-only mocks only track how often they were disposed.

use datamocks_mocks::prelude::*;
use datamocks_mocks::{
    AsyncDisposableMock, AsyncReadOnlySessionMock, DisposableMock, ReadOnlySessionMock,
};
use proptest::prelude::*;

/// Code under test: reads through a read-only session and releases it
fn count_rows<S: ReadOnlySession>(session: &mut S, rows: &[u8]) -> datamocks_mocks::Result<usize> {
    let count = rows.len();
    session.dispose()?;
    Ok(count)
}

async fn count_rows_async<S: AsyncReadOnlySession>(
    session: &mut S,
    rows: &[u8],
) -> datamocks_mocks::Result<usize> {
    let count = rows.len();
    session.dispose_async().await?;
    Ok(count)
}

// ============================================================================
// Disposable mocks
// ============================================================================

#[test]
fn test_disposable_mock_not_disposed() {
    let mock = DisposableMock::new();
    let err = mock.must_be_disposed().unwrap_err();
    assert!(err.is_verification_failure());
    assert_eq!(err.to_string(), "\"DisposableMock\" was not disposed.");
}

#[test]
fn test_disposable_mock_disposed_more_than_once_is_accepted() {
    let mut mock = DisposableMock::new();
    mock.dispose().unwrap();
    mock.dispose().unwrap();

    let returned = mock.must_be_disposed().unwrap();
    assert!(std::ptr::eq(returned, &mock));
    assert_eq!(mock.dispose_call_count(), 2);
}

#[test]
fn test_disposable_mock_custom_name() {
    let mock = DisposableMock::new().with_name("FileHandle");
    assert_eq!(mock.mock_name(), "FileHandle");
    assert_eq!(
        mock.must_be_disposed().unwrap_err().to_string(),
        "\"FileHandle\" was not disposed."
    );
}

#[test]
fn test_disposable_mock_overflow_keeps_count() {
    let mut mock = DisposableMock::new();
    mock.set_dispose_call_count(u32::MAX);
    assert!(mock.dispose().unwrap_err().is_overflow());
    assert_eq!(mock.dispose_call_count(), u32::MAX);
}

#[tokio::test]
async fn test_async_disposable_mock_both_paths_count() {
    let mut mock = AsyncDisposableMock::new();
    mock.dispose_async().await.unwrap();
    mock.dispose().unwrap();
    assert_eq!(mock.dispose_call_count(), 2);
    mock.must_be_disposed().unwrap();
}

#[tokio::test]
async fn test_async_disposable_mock_not_disposed() {
    let mock = AsyncDisposableMock::new().with_name(String::from("Connection"));
    assert_eq!(
        mock.must_be_disposed().unwrap_err().to_string(),
        "\"Connection\" was not disposed."
    );
}

// ============================================================================
// Read-only sessions
// ============================================================================

#[test]
fn test_read_only_session_released_by_code_under_test() {
    let mut session = ReadOnlySessionMock::new();
    assert_eq!(count_rows(&mut session, &[1, 2, 3]).unwrap(), 3);
    session.must_be_disposed().unwrap();
}

#[test]
fn test_read_only_session_not_disposed() {
    let session = ReadOnlySessionMock::new();
    assert_eq!(
        session.must_be_disposed().unwrap_err().to_string(),
        "\"ReadOnlySessionMock\" was not disposed."
    );
}

#[tokio::test]
async fn test_async_read_only_session_released_by_code_under_test() {
    let mut session = AsyncReadOnlySessionMock::new();
    assert_eq!(count_rows_async(&mut session, &[7]).await.unwrap(), 1);
    session.must_be_disposed().unwrap();
}

#[tokio::test]
async fn test_async_read_only_session_overflow() {
    let mut session = AsyncReadOnlySessionMock::new().with_name("Reports");
    session.set_dispose_call_count(u32::MAX);
    assert!(session.dispose_async().await.unwrap_err().is_overflow());
    assert_eq!(session.mock_name(), "Reports");
}

proptest! {
    #[test]
    fn prop_dispose_count_matches_calls(calls in 0u32..64) {
        let mut mock = DisposableMock::new();
        for _ in 0..calls {
            mock.dispose().unwrap();
        }
        prop_assert_eq!(mock.dispose_call_count(), calls);
        prop_assert_eq!(mock.must_be_disposed().is_ok(), calls > 0);
    }
}
