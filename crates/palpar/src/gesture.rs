//! Semantic gestures and their lowering to W3C-style pointer actions.
//!
//! A gesture is described once as a value and lowered to the exact pointer
//! sequence the automation driver submits as one atomic action:
//!
//! ```text
//! Tap(p, hold)        move(0ms, p) → down → pause(hold) → up
//! Swipe(a, b, d)      move(0ms, a) → down → move(d ms, b) → up
//! LongPress(p, d)     move(0ms, p) → down → pause(d) → up
//! DoubleTap(p)        two Tap sequences separated by a settle pause
//! ```
//!
//! Swipe duration controls gesture recognition in the target app: too short
//! and a drag reads as a fling or tap. The thresholds are empirical per app
//! build, so every duration stays caller-configurable.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Default tap hold duration in milliseconds
pub const DEFAULT_TAP_HOLD_MS: u64 = 50;

/// Default swipe transition duration in milliseconds
pub const DEFAULT_SWIPE_DURATION_MS: u64 = 1000;

/// Default long-press hold duration in milliseconds
pub const DEFAULT_LONG_PRESS_DURATION_MS: u64 = 2000;

/// Settle pause between the two taps of a double tap, in milliseconds
pub const DOUBLE_TAP_SETTLE_MS: u64 = 100;

/// One low-level pointer operation within an atomic action sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerAction {
    /// Move the pointer to a point over `duration_ms`
    Move {
        /// Transition duration in milliseconds (0 = instant)
        duration_ms: u64,
        /// Target point
        to: Point,
    },
    /// Press the primary pointer button down
    Down,
    /// Hold the pointer still for `ms`
    Pause {
        /// Pause duration in milliseconds
        ms: u64,
    },
    /// Release the primary pointer button
    Up,
}

/// A semantic gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    /// Press and release at a point
    Tap {
        /// Tap location
        at: Point,
        /// Hold duration between press and release
        hold_ms: u64,
    },
    /// Press, move, release
    Swipe {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Transition duration of the move while pressed
        duration_ms: u64,
    },
    /// Press and hold at a point
    LongPress {
        /// Press location
        at: Point,
        /// Hold duration
        duration_ms: u64,
    },
    /// Two taps at the same point with a settle pause between them
    DoubleTap {
        /// Tap location
        at: Point,
    },
}

/// One step of a lowered gesture: either an atomic pointer sequence or a
/// settle pause between sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureStep {
    /// An atomic pointer action sequence submitted in one driver call
    Actions(Vec<PointerAction>),
    /// A pause between sequences
    Settle {
        /// Pause duration in milliseconds
        ms: u64,
    },
}

impl Gesture {
    /// Tap with the default hold
    #[must_use]
    pub const fn tap(at: Point) -> Self {
        Self::Tap {
            at,
            hold_ms: DEFAULT_TAP_HOLD_MS,
        }
    }

    /// Tap with an explicit hold duration
    #[must_use]
    pub const fn tap_with_hold(at: Point, hold_ms: u64) -> Self {
        Self::Tap { at, hold_ms }
    }

    /// Swipe with the default transition duration
    #[must_use]
    pub const fn swipe(from: Point, to: Point) -> Self {
        Self::Swipe {
            from,
            to,
            duration_ms: DEFAULT_SWIPE_DURATION_MS,
        }
    }

    /// Swipe with an explicit transition duration
    #[must_use]
    pub const fn swipe_with_duration(from: Point, to: Point, duration_ms: u64) -> Self {
        Self::Swipe {
            from,
            to,
            duration_ms,
        }
    }

    /// Long press with the default hold duration
    #[must_use]
    pub const fn long_press(at: Point) -> Self {
        Self::LongPress {
            at,
            duration_ms: DEFAULT_LONG_PRESS_DURATION_MS,
        }
    }

    /// Double tap
    #[must_use]
    pub const fn double_tap(at: Point) -> Self {
        Self::DoubleTap { at }
    }

    /// Lower the gesture to its ordered steps.
    ///
    /// Tap, swipe, and long press lower to a single atomic sequence. Double
    /// tap is composed from two tap sequences around a settle pause, so its
    /// timing sensitivity is inherited from the two-call composition rather
    /// than a native double-tap action.
    #[must_use]
    pub fn steps(&self) -> Vec<GestureStep> {
        match *self {
            Self::Tap { at, hold_ms } => vec![GestureStep::Actions(press_sequence(at, hold_ms))],
            Self::LongPress { at, duration_ms } => {
                vec![GestureStep::Actions(press_sequence(at, duration_ms))]
            }
            Self::Swipe {
                from,
                to,
                duration_ms,
            } => vec![GestureStep::Actions(vec![
                PointerAction::Move {
                    duration_ms: 0,
                    to: from,
                },
                PointerAction::Down,
                PointerAction::Move { duration_ms, to },
                PointerAction::Up,
            ])],
            Self::DoubleTap { at } => vec![
                GestureStep::Actions(press_sequence(at, DEFAULT_TAP_HOLD_MS)),
                GestureStep::Settle {
                    ms: DOUBLE_TAP_SETTLE_MS,
                },
                GestureStep::Actions(press_sequence(at, DEFAULT_TAP_HOLD_MS)),
            ],
        }
    }
}

/// Press-hold-release at a point: the shared lowering of tap and long press
fn press_sequence(at: Point, hold_ms: u64) -> Vec<PointerAction> {
    vec![
        PointerAction::Move {
            duration_ms: 0,
            to: at,
        },
        PointerAction::Down,
        PointerAction::Pause { ms: hold_ms },
        PointerAction::Up,
    ]
}
