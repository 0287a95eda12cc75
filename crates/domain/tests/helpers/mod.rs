pub mod builders;

pub use builders::AnswersBuilder;
