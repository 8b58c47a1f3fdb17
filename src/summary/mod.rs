//! Summary and flashcard generation with a hosted model.

mod flashcards;
mod summarizer;

pub use flashcards::{FlashcardGenerator, CARD_SEPARATOR, QUESTION_SEPARATOR};
pub use summarizer::{Summarizer, CHUNK_SEPARATOR};
