/*!
 * Tests for positional reconciliation of batch outcomes
 */

use sheetwai::document::{SheetRef, TextLocation};
use sheetwai::errors::{BatchFailure, CodecError, ProviderError, ServiceError};
use sheetwai::translation::{
    Batch, Batcher, Fragment, Reconciler, SegmentCodec, TranslationStatus,
};

fn batch_of(texts: &[&str]) -> Batch {
    let fragments = texts
        .iter()
        .enumerate()
        .map(|(i, t)| Fragment::new(TextLocation::cell(SheetRef::new(0, "Sheet1"), i as u32 + 1, 1), *t))
        .collect();
    Batcher::new(texts.len().max(1)).unwrap().batches(fragments).remove(0)
}

#[test]
fn test_reconcile_withMatchingCount_shouldPairPositionally() {
    let batch = batch_of(&["Xin chào", "Thế giới", "Kiểm tra"]);
    let decoded = SegmentCodec::default().decode("こんにちは|||世界|||テスト").unwrap();

    let results = Reconciler::reconcile(&batch, Ok(decoded));
    assert_eq!(results.len(), 3);
    for (result, fragment) in results.iter().zip(batch.fragments()) {
        assert_eq!(result.status, TranslationStatus::Translated);
        assert_eq!(result.location, fragment.location);
        assert_eq!(result.source_text, fragment.source_text);
    }
    let texts: Vec<&str> = results.iter().filter_map(|r| r.translated_text.as_deref()).collect();
    assert_eq!(texts, vec!["こんにちは", "世界", "テスト"]);
}

#[test]
fn test_reconcile_withFewerSegments_shouldFailWholeBatch() {
    let batch = batch_of(&["Xin chào", "Thế giới", "Kiểm tra"]);
    let decoded = SegmentCodec::default().decode("こんにちは|||世界").unwrap();

    let results = Reconciler::reconcile(&batch, Ok(decoded));
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.status == TranslationStatus::FailedMismatch));
    assert!(results.iter().all(|r| r.translated_text.is_none()));
}

#[test]
fn test_reconcile_withExtraSegments_shouldFailWholeBatch() {
    let batch = batch_of(&["one", "two"]);
    let decoded = SegmentCodec::default().decode("1|||2|||3").unwrap();

    let results = Reconciler::reconcile(&batch, Ok(decoded));
    assert!(results.iter().all(|r| r.status == TranslationStatus::FailedMismatch));
}

#[test]
fn test_reconcile_withEmptyResponse_shouldCountAsMismatch() {
    let batch = batch_of(&["one", "two"]);
    let results = Reconciler::reconcile(&batch, Err(BatchFailure::Codec(CodecError::EmptyResponse)));
    assert!(results.iter().all(|r| r.status == TranslationStatus::FailedMismatch));
}

#[test]
fn test_reconcile_withServiceError_shouldMarkEveryFragmentFailedService() {
    let batch = batch_of(&["one", "two"]);
    let failure = ServiceError {
        attempts: 3,
        source: ProviderError::ConnectionError("down".into()),
    };

    let results = Reconciler::reconcile(&batch, Err(failure.into()));
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status == TranslationStatus::FailedService));
    assert!(results.iter().all(|r| r.status.is_failure()));
}

#[test]
fn test_check_alignment_shouldReportCounts() {
    let batch = batch_of(&["one", "two", "three"]);
    let decoded = SegmentCodec::default().decode("a|||b").unwrap();
    assert_eq!(
        Reconciler::check_alignment(&batch, &decoded),
        Err(CodecError::CountMismatch { expected: 3, got: 2 })
    );
}

#[test]
fn test_reconcile_withBlankSegmentForText_shouldFailWholeBatch() {
    let batch = batch_of(&["A", "B text", "C"]);
    let decoded = SegmentCodec::default().decode("1||||||3").unwrap();
    assert_eq!(
        Reconciler::check_alignment(&batch, &decoded),
        Err(CodecError::EmptySegment { position: 2 })
    );

    let results = Reconciler::reconcile(&batch, Ok(decoded));
    assert!(results.iter().all(|r| r.status == TranslationStatus::FailedMismatch));
    assert!(results.iter().all(|r| r.translated_text.is_none()));
}
