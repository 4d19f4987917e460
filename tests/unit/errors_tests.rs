/*!
 * Tests for error types and their user-facing messages
 */

use docuflow::errors::{ServiceError, WorkflowError};

#[test]
fn test_fromService_withMessage_shouldSurfaceItVerbatim() {
    let err = WorkflowError::from_service(
        ServiceError::Rejected("No text found in image".to_string()),
        "Failed to process image",
    );
    assert_eq!(err, WorkflowError::Service("No text found in image".to_string()));
    assert_eq!(err.user_message(), "No text found in image");
}

#[test]
fn test_fromService_withBlankMessage_shouldUseFallback() {
    let err = WorkflowError::from_service(
        ServiceError::Rejected("  ".to_string()),
        "Failed to translate text",
    );
    assert_eq!(err.user_message(), "Failed to translate text");
}

#[test]
fn test_fromService_withTransportFailure_shouldHideCause() {
    let err = WorkflowError::from_service(
        ServiceError::Transport("connection refused".to_string()),
        "Failed to process video URL",
    );
    assert_eq!(err.user_message(), "Failed to process video URL");
    match err {
        WorkflowError::Transport { cause, .. } => assert_eq!(cause, "connection refused"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_fromService_withParseFailure_shouldBeTransport() {
    let err = WorkflowError::from_service(
        ServiceError::Parse("expected value".to_string()),
        "Failed to process video file",
    );
    assert!(matches!(err, WorkflowError::Transport { .. }));
    assert_eq!(err.to_string(), "Failed to process video file");
}

#[test]
fn test_serviceMessage_shouldOnlyExistForNonBlankRejections() {
    assert_eq!(ServiceError::Rejected("bad".to_string()).service_message(), Some("bad"));
    assert_eq!(ServiceError::Rejected(String::new()).service_message(), None);
    assert_eq!(ServiceError::Transport("x".to_string()).service_message(), None);
}
