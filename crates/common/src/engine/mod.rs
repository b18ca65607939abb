//! Answer Engine
//!
//! Pure, synchronous question answering over a document's text:
//! - Text normalization (sentences and paragraphs)
//! - Intent classification
//! - Heuristic answer synthesis
//!
//! Nothing here touches storage; callers supply the context text.

mod classifier;
mod normalizer;
mod synthesizer;

pub use classifier::{classify, Intent};
pub use normalizer::{char_len, char_prefix, split_paragraphs, split_sentences};
pub use synthesizer::{
    compose, extract_entities, extract_numbers, rank_sentences, score_sentences,
    significant_words, synthesize, Answer, AnswerSource, ScoredSentence, NOT_FOUND_MESSAGE,
};

/// Classified answer for a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResult {
    pub intent: Intent,
    pub answer: Answer,
}

/// Classify `question` and answer it from `context`
pub fn answer_question(question: &str, context: &str) -> EngineResult {
    let intent = classify(question);
    let answer = compose(intent, question, context);

    EngineResult { intent, answer }
}
