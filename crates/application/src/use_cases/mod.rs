mod reload_answers;
mod resolve_query;

pub use reload_answers::{ReloadAnswersUseCase, SharedAnswerStore};
pub use resolve_query::{Resolution, ResolveQueryUseCase};
