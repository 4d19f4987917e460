/*!
 * Tests for the workflow state record and its reducer
 */

use docuflow::language_utils::TargetLanguage;
use docuflow::text::QuizItem;
use docuflow::workflow::{
    DocumentSource, DocumentWorkflow, ExtractionResult, Operation, Transition, TranslationResult,
    WorkflowStatus,
};
use crate::common;

fn extracted(text: &str) -> Transition {
    Transition::Extracted(ExtractionResult {
        text: text.to_string(),
        source_description: "Image file: page.png".to_string(),
    })
}

fn translated(text: &str) -> Transition {
    Transition::Translated(TranslationResult {
        text: text.to_string(),
        target_language: TargetLanguage::Hindi,
    })
}

fn quiz() -> Transition {
    Transition::QuizGenerated(vec![QuizItem {
        prompt: "The _____ is red.".to_string(),
        answer: "apple".to_string(),
    }])
}

/// State with an extraction, a translation, a quiz and revealed answers
fn populated() -> DocumentWorkflow {
    DocumentWorkflow::new()
        .apply(Transition::Started {
            source: Some(DocumentSource::Image(common::sample_image("page.png"))),
        })
        .apply(extracted("original"))
        .apply(translated("अनुवाद"))
        .apply(quiz())
        .apply(Transition::AnswersVisible(true))
        .apply(Transition::KeywordChanged("orig".to_string()))
}

#[test]
fn test_initialState_shouldBeEmptyAndIdle() {
    let state = DocumentWorkflow::new();
    assert_eq!(state, DocumentWorkflow::default());
    assert_eq!(state.status, WorkflowStatus::Idle);
    assert!(state.display_text().is_none());
    assert!(!state.can_export());
    assert!(!state.can_translate());
    assert!(!state.can_generate_quiz());
    assert!(!state.can_copy());
}

#[test]
fn test_started_shouldSetLoadingAndSource() {
    let source = DocumentSource::VideoUrl("https://example.com/v.mp4".to_string());
    let state = DocumentWorkflow::new().apply(Transition::Started {
        source: Some(source.clone()),
    });

    assert!(state.is_loading());
    assert_eq!(state.source, Some(source));
}

#[test]
fn test_startedWithoutSource_shouldKeepCurrentSource() {
    let state = populated().apply(Transition::Started { source: None });
    assert!(state.is_loading());
    assert!(matches!(state.source, Some(DocumentSource::Image(_))));
    assert_eq!(state.display_text(), Some("अनुवाद"));
}

#[test]
fn test_extracted_shouldResetTranslationAndQuiz() {
    let state = populated().apply(extracted("replacement"));

    assert_eq!(state.display_text(), Some("replacement"));
    assert!(state.translation.is_none());
    assert!(state.quiz.is_empty());
    assert!(!state.answers_visible);
    assert_eq!(state.keyword, "orig");
    assert_eq!(state.status, WorkflowStatus::Idle);
}

#[test]
fn test_translated_shouldBecomeDisplayText() {
    let state = DocumentWorkflow::new().apply(extracted("original")).apply(translated("अनुवाद"));
    assert!(state.is_translated());
    assert_eq!(state.display_text(), Some("अनुवाद"));
    assert_eq!(state.extracted_text(), Some("original"));
}

#[test]
fn test_failed_shouldKeepExistingResults() {
    let before = populated();
    let after = before.clone().apply(Transition::Failed("Failed to translate text".to_string()));

    assert_eq!(after.status.error_message(), Some("Failed to translate text"));
    assert_eq!(after.extraction, before.extraction);
    assert_eq!(after.translation, before.translation);
    assert_eq!(after.quiz, before.quiz);
}

#[test]
fn test_quizGenerated_shouldHideAnswers() {
    let state = populated().apply(quiz());
    assert_eq!(state.quiz.len(), 1);
    assert!(!state.answers_visible);
}

#[test]
fn test_quizGenerated_whileLoading_shouldStayLoading() {
    let state = populated()
        .apply(Transition::Started { source: None })
        .apply(quiz());
    assert!(state.is_loading());
    assert_eq!(state.quiz.len(), 1);
}

#[test]
fn test_translated_withoutExtraction_shouldBeIgnored() {
    let state = DocumentWorkflow::new().apply(translated("अनुवाद"));
    assert_eq!(state, DocumentWorkflow::default());
    assert!(state.display_text().is_none());
}

#[test]
fn test_cleared_shouldAlwaysReturnInitialState() {
    assert_eq!(populated().apply(Transition::Cleared), DocumentWorkflow::default());
    assert_eq!(
        DocumentWorkflow::new()
            .apply(Transition::Failed("boom".to_string()))
            .apply(Transition::Cleared),
        DocumentWorkflow::default()
    );
}

#[test]
fn test_blankExtraction_shouldAllowExportButNotTranslation() {
    let state = DocumentWorkflow::new().apply(extracted("   "));
    assert!(state.can_export());
    assert!(!state.can_translate());
    assert!(!state.can_generate_quiz());
    assert!(state.extracted_text().is_none());
}

#[test]
fn test_canTranslate_whileLoading_shouldBeFalse() {
    let state = DocumentWorkflow::new()
        .apply(extracted("text"))
        .apply(Transition::Started { source: None });
    assert!(!state.can_translate());
    assert!(state.can_generate_quiz());
}

#[test]
fn test_describe_shouldNameSourceKind() {
    assert_eq!(
        DocumentSource::Image(common::sample_image("a.png")).describe(),
        "Image file: a.png"
    );
    assert_eq!(
        DocumentSource::VideoFile(common::sample_video("b.mp4")).describe(),
        "Video file: b.mp4"
    );
    assert_eq!(
        DocumentSource::VideoUrl("https://x.test/v".to_string()).describe(),
        "Video URL: https://x.test/v"
    );
}

#[test]
fn test_fallbackMessages_shouldMatchOperation() {
    assert_eq!(Operation::ExtractImage.fallback_message(), "Failed to process image");
    assert_eq!(Operation::ExtractVideoFile.fallback_message(), "Failed to process video file");
    assert_eq!(Operation::ExtractVideoUrl.fallback_message(), "Failed to process video URL");
    assert_eq!(Operation::Translate.fallback_message(), "Failed to translate text");
}
