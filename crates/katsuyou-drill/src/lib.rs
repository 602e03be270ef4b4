pub mod handlers;
pub mod quiz;
pub mod rate_limit;

pub use handlers::{ApiError, AppState, router};
pub use quiz::{DEFAULT_CHOICES, MAX_CHOICES, Question, QuizError, QuizOptions, generate_question};
