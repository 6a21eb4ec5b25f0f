pub mod event;
pub mod profile;
pub mod score;

pub use event::{ReferencedPost, StreamEvent};
pub use profile::{AnalysisOutcome, ProfileSnapshot, RawProfile};
pub use score::{ScoreResult, TrustTier};
