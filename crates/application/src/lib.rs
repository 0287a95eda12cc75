//! answer-dns application layer: query resolution, forwarding and answer reloads.
pub mod ports;
pub mod services;
pub mod use_cases;

pub use services::{ForwardedResponse, RecurseForwarder};
pub use use_cases::{ReloadAnswersUseCase, Resolution, ResolveQueryUseCase, SharedAnswerStore};
