pub mod gesture;
pub mod haptics;
pub mod progression;
pub mod session;

pub use gesture::{GestureClassifier, GestureEvent, Point, ScreenSize};
pub use haptics::{Haptics, TerminalBell};
pub use progression::{Progression, SwipeOutcome};
pub use session::{SessionEnd, SessionRecorder};
