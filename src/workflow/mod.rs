/*!
 * Document workflow: the state record, its transitions and the coordinator
 * that drives them against an extraction service.
 */

pub mod coordinator;
pub mod state;

pub use coordinator::Coordinator;
pub use state::{
    DocumentSource, DocumentWorkflow, ExtractionResult, Operation, SourceFile, Transition,
    TranslationResult, WorkflowStatus,
};
