/*!
 * Tests for error types and transient-failure classification
 */

use sheetwai::errors::{AppError, BatchFailure, CodecError, ProviderError, ServiceError};

#[test]
fn test_is_transient_withRetryableErrors_shouldBeTrue() {
    assert!(ProviderError::ConnectionError("timeout".into()).is_transient());
    assert!(ProviderError::RequestFailed("reset".into()).is_transient());
    assert!(ProviderError::RateLimitExceeded("429".into()).is_transient());
    assert!(ProviderError::ParseError("bad json".into()).is_transient());
    assert!(ProviderError::EmptyResponse.is_transient());
    assert!(ProviderError::ApiError { status_code: 503, message: "busy".into() }.is_transient());
    assert!(ProviderError::ApiError { status_code: 429, message: "slow".into() }.is_transient());
}

#[test]
fn test_is_transient_withPermanentErrors_shouldBeFalse() {
    assert!(!ProviderError::AuthenticationError("bad key".into()).is_transient());
    assert!(!ProviderError::ApiError { status_code: 400, message: "bad".into() }.is_transient());
    assert!(!ProviderError::ApiError { status_code: 404, message: "no model".into() }.is_transient());
}

#[test]
fn test_service_error_display_shouldIncludeAttemptsAndCause() {
    let error = ServiceError {
        attempts: 3,
        source: ProviderError::ConnectionError("refused".into()),
    };
    let message = error.to_string();
    assert!(message.contains("3 attempt"));
    assert!(message.contains("refused"));
}

#[test]
fn test_batch_failure_from_shouldWrapBothCauses() {
    let codec: BatchFailure = CodecError::EmptyResponse.into();
    assert!(matches!(codec, BatchFailure::Codec(CodecError::EmptyResponse)));

    let service: BatchFailure = ServiceError {
        attempts: 1,
        source: ProviderError::EmptyResponse,
    }
    .into();
    assert!(matches!(service, BatchFailure::Service(_)));
    assert_eq!(
        CodecError::CountMismatch { expected: 3, got: 2 }.to_string(),
        "Segment count mismatch: expected 3, got 2"
    );
}

#[test]
fn test_app_error_from_shouldConvertCommonErrors() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(AppError::from(io), AppError::File(_)));

    let any = anyhow::anyhow!("boom");
    assert!(matches!(AppError::from(any), AppError::Unknown(_)));

    let provider = AppError::from(ProviderError::EmptyResponse);
    assert_eq!(provider.to_string(), "Provider error: Empty response from API");
}
