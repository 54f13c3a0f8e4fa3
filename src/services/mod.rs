pub mod paper_store;
pub mod text_reader;

pub use paper_store::{JsonlStore, QuestionStore, StoredPaper, StoredQuestion};
pub use text_reader::TextReader;
