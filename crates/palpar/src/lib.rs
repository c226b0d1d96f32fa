//! Palpar: mobile UI automation toolkit with an injected driver.
//!
//! Palpar (Spanish: "to touch") drives one mobile app session through
//! semantic gestures, wait-then-act element interactions, and screen
//! models, over any automation backend implementing [`DeviceDriver`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ScenarioRun  (ordered phases, fail-fast, run report)         │
//! │      │                                                        │
//! │  Screen models  (NavBar, DragScreen: coordinate tables,       │
//! │      │           composed flows)                              │
//! │  Toolkit  (tap/swipe/long-press/double-tap, bounded waits,    │
//! │      │     click/set-value/get-text, screenshots)             │
//! │  DeviceDriver trait  (atomic pointer sequences, element       │
//! │                       probes, device commands)                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Execution is single threaded and strictly sequential: one session, one
//! device, every call awaited before the next. Timeouts bound every wait
//! and are the only cancellation mechanism.
//!
//! # Example
//!
//! ```
//! use palpar::{DragScreen, MockDriver, ScenarioRun, Toolkit};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let toolkit = Toolkit::new(MockDriver::new());
//! let screen = DragScreen::new(&toolkit);
//!
//! let mut run = ScenarioRun::new("drag-puzzle");
//! run.phase("navigate to drag tab", screen.open()).await;
//! run.phase("drag all pieces", screen.drag_all_pieces_to_drop_zones())
//!     .await;
//! run.phase("verify completion", screen.tap_to_verify_result())
//!     .await;
//! run.phase("return home", screen.return_home()).await;
//!
//! let report = run.finish();
//! assert!(report.passed());
//! # }
//! ```

#![warn(missing_docs)]

mod drag_screen;
mod driver;
mod gesture;
mod geometry;
mod nav;
mod reporter;
mod result;
mod scenario;
mod selector;
mod toolkit;
mod wait;

pub use drag_screen::{DragScreen, PuzzlePiece, DROP_SETTLE_MS, VERIFY_POINT};
pub use driver::{
    CallRecord, DeviceDriver, DriverConfig, MockDriver, MockElement, Screenshot,
};
pub use gesture::{
    Gesture, GestureStep, PointerAction, DEFAULT_LONG_PRESS_DURATION_MS, DEFAULT_SWIPE_DURATION_MS,
    DEFAULT_TAP_HOLD_MS, DOUBLE_TAP_SETTLE_MS,
};
pub use geometry::{DeviceProfile, Point, ScreenGeometry, TabBar};
pub use nav::{NavBar, NavTab};
pub use reporter::{PhaseResult, PhaseStatus, RunReport};
pub use result::{PalparError, PalparResult};
pub use scenario::ScenarioRun;
pub use selector::Selector;
pub use toolkit::{Toolkit, PAGE_LOAD_SETTLE_MS};
pub use wait::{
    poll_until, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS, PROBE_TIMEOUT_MS,
};
