pub mod collaborators;
pub mod store;

pub use collaborators::{ScannableCodeEncoder, SequenceAllocator, SettingsProvider};
pub use store::{PersistenceStore, Predicate};
