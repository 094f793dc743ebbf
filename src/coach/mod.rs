pub mod form;
pub mod gate;
pub mod geometry;
pub mod phase;
pub mod session;

pub use form::{classify, FormCue};
pub use gate::{ClassificationState, UpdateGate, INSUFFICIENT_DATA_MESSAGE, UPDATE_INTERVAL_MS, WAITING_MESSAGE};
pub use geometry::joint_angle;
pub use phase::{analyze_phase, StrokePhase};
pub use session::{FeedbackSession, NO_PERSON_MESSAGE};
