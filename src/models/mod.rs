pub mod loaders;
pub mod paper;
pub mod question;

pub use loaders::{load_all_toml_files, load_toml_to_manifest};
pub use paper::PaperManifest;
pub use question::{Difficulty, QuestionRecord};
