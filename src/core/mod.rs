pub mod content_type;
pub mod engine;
pub mod enumerator;
pub mod hasher;
pub mod planner;
pub mod scanner;
pub mod transfer;

pub use content_type::content_type_for;
pub use engine::{SyncEngine, SyncReport};
pub use enumerator::RemoteEnumerator;
pub use hasher::{hash_bytes, hash_file};
pub use planner::{DeleteDecision, DeletionPlanner, UploadCandidate, UploadDecision, UploadPlanner};
pub use scanner::{LocalEntry, ScanConfig, Scanner};
pub use transfer::{Deleter, Uploader};
