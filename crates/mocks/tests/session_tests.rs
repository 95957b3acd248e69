//! Session Mock Tests
//!
//! Covers save-call counting, error injection and disposal for the sync and
//! async session mocks.

use datamocks_mocks::prelude::*;
use datamocks_mocks::{AsyncSessionMock, Error, InjectedError, SessionMock};
use std::io;

fn injected(message: &str) -> InjectedError {
    InjectedError::new(io::Error::new(io::ErrorKind::Other, message.to_string()))
}

/// Code under test: save, then always release the session
fn save_and_close<S: Session>(session: &mut S) -> datamocks_mocks::Result<()> {
    let saved = session.save_changes();
    session.dispose()?;
    saved
}

// ============================================================================
// Synchronous session
// ============================================================================

#[test]
fn test_save_changes_called_once() {
    let mut session = SessionMock::new();
    save_and_close(&mut session).unwrap();

    let returned = session
        .save_changes_must_have_been_called()
        .unwrap()
        .must_be_disposed()
        .unwrap();
    assert!(std::ptr::eq(returned, &session));
}

#[test]
fn test_save_changes_never_called() {
    let session = SessionMock::new();
    let err = session.save_changes_must_have_been_called().unwrap_err();
    assert!(err.is_verification_failure());
    assert_eq!(
        err.to_string(),
        "SaveChanges must have been called exactly once, but it was actually never called."
    );
}

#[test]
fn test_save_changes_called_too_often() {
    for count in [2, 3, 10] {
        let mut session = SessionMock::new();
        for _ in 0..count {
            session.save_changes().unwrap();
        }

        let err = session.save_changes_must_have_been_called().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "SaveChanges must have been called exactly once, but it was actually called {} times.",
                count
            )
        );
    }
}

#[test]
fn test_save_changes_must_not_have_been_called() {
    let session = SessionMock::new();
    let returned = session.save_changes_must_not_have_been_called().unwrap();
    assert!(std::ptr::eq(returned, &session));
}

#[test]
fn test_save_changes_must_not_have_been_called_singular_and_plural() {
    let mut session = SessionMock::new();
    session.save_changes().unwrap();
    let err = session.save_changes_must_not_have_been_called().unwrap_err();
    assert_eq!(
        err.to_string(),
        "SaveChanges must not have been called, but it was actually called 1 time."
    );

    session.save_changes().unwrap();
    let err = session.save_changes_must_not_have_been_called().unwrap_err();
    assert_eq!(
        err.to_string(),
        "SaveChanges must not have been called, but it was actually called 2 times."
    );
}

#[test]
fn test_injected_error_is_returned_unchanged() {
    let error = injected("deadlock detected");
    let mut session = SessionMock::new().with_error_on_save_changes(error.clone());

    let err = save_and_close(&mut session).unwrap_err();
    match &err {
        Error::Injected(returned) => assert!(returned.same_as(&error)),
        other => panic!("Wrong error variant: {:?}", other),
    }
    assert_eq!(err.to_string(), "deadlock detected");

    // The failed call still counts, and the session was released
    session
        .save_changes_must_have_been_called()
        .unwrap()
        .must_be_disposed()
        .unwrap();
}

#[test]
fn test_save_changes_overflow() {
    let mut session = SessionMock::new();
    session.set_save_changes_call_count(u32::MAX);
    let err = session.save_changes().unwrap_err();
    assert!(matches!(
        err,
        Error::Overflow {
            counter: "SaveChangesCallCount"
        }
    ));
}

#[test]
fn test_session_not_disposed() {
    let session = SessionMock::new().with_name("UnitOfWork");
    let err = session.must_be_disposed().unwrap_err();
    assert_eq!(err.to_string(), "\"UnitOfWork\" was not disposed.");
}

// ============================================================================
// Asynchronous session
// ============================================================================

#[tokio::test]
async fn test_async_save_changes_called_once() {
    let mut session = AsyncSessionMock::new();
    session.save_changes_async().await.unwrap();
    session.dispose_async().await.unwrap();

    session
        .save_changes_must_have_been_called()
        .unwrap()
        .must_be_disposed()
        .unwrap();
}

#[tokio::test]
async fn test_async_messages_name_save_changes_async() {
    let mut session = AsyncSessionMock::new();
    let err = session.save_changes_must_have_been_called().unwrap_err();
    assert_eq!(
        err.to_string(),
        "SaveChangesAsync must have been called exactly once, but it was actually never called."
    );

    session.save_changes_async().await.unwrap();
    session.save_changes_async().await.unwrap();
    let err = session.save_changes_must_not_have_been_called().unwrap_err();
    assert_eq!(
        err.to_string(),
        "SaveChangesAsync must not have been called, but it was actually called 2 times."
    );
}

#[tokio::test]
async fn test_async_injected_error_counts_call() {
    let error = injected("connection reset");
    let mut session = AsyncSessionMock::new();
    session.set_error_on_save_changes(error.clone());

    let err = session.save_changes_async().await.unwrap_err();
    assert!(err.injected().unwrap().same_as(&error));
    assert_eq!(session.save_changes_call_count(), 1);
    assert!(session.error_on_save_changes().unwrap().same_as(&error));
}

#[tokio::test]
async fn test_async_save_changes_overflow() {
    let mut session = AsyncSessionMock::new();
    session.set_save_changes_call_count(u32::MAX);
    assert!(session.save_changes_async().await.unwrap_err().is_overflow());
}

#[tokio::test]
async fn test_async_session_dispose_overflow() {
    let mut session = AsyncSessionMock::new();
    session.set_dispose_call_count(u32::MAX);
    assert!(session.dispose_async().await.unwrap_err().is_overflow());
}
