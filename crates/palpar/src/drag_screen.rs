//! Screen model for the demo app's drag-and-drop puzzle.
//!
//! Nine puzzle pieces are dragged from the tray at the bottom of the screen
//! to their drop zones in the 3x3 grid on top. Coordinates come from the
//! app's layout on the 1080-wide device profile. The pieces are independent,
//! so the drag order carries no app-level meaning; it is fixed for
//! reproducibility and to keep animations from overlapping.

use crate::driver::DeviceDriver;
use crate::geometry::Point;
use crate::nav::{NavBar, NavTab};
use crate::result::PalparResult;
use crate::toolkit::Toolkit;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Settle pause after each drop, in milliseconds.
///
/// Gives the layout engine time to process a drop before the next gesture
/// is issued. The app exposes no drop-complete signal to wait on.
pub const DROP_SETTLE_MS: u64 = 300;

/// Tap point used to verify and confirm puzzle completion
pub const VERIFY_POINT: Point = Point::new(517, 1559);

/// One puzzle piece, named by grid row (1..3) and column (L/C/R)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum PuzzlePiece {
    L1,
    C1,
    R1,
    L2,
    C2,
    R2,
    L3,
    C3,
    R3,
}

impl PuzzlePiece {
    /// All pieces in the fixed drag order
    pub const ALL: [Self; 9] = [
        Self::L1,
        Self::C1,
        Self::R1,
        Self::L2,
        Self::C2,
        Self::R2,
        Self::L3,
        Self::C3,
        Self::R3,
    ];

    /// Source point in the tray and target drop zone for this piece
    #[must_use]
    pub const fn drag_vector(&self) -> (Point, Point) {
        match self {
            Self::L1 => (Point::new(600, 1903), Point::new(549, 610)),
            Self::C1 => (Point::new(372, 2085), Point::new(535, 810)),
            Self::R1 => (Point::new(121, 1940), Point::new(340, 828)),
            Self::L2 => (Point::new(963, 1908), Point::new(726, 833)),
            Self::C2 => (Point::new(805, 1913), Point::new(521, 1052)),
            Self::R2 => (Point::new(270, 1931), Point::new(782, 1052)),
            Self::L3 => (Point::new(749, 2080), Point::new(316, 1061)),
            Self::C3 => (Point::new(451, 1908), Point::new(735, 642)),
            Self::R3 => (Point::new(507, 2085), Point::new(289, 642)),
        }
    }
}

impl std::fmt::Display for PuzzlePiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Drag-puzzle screen model composed over the shared toolkit
#[derive(Debug)]
pub struct DragScreen<'a, D: DeviceDriver> {
    toolkit: &'a Toolkit<D>,
    nav: NavBar,
    settle_ms: u64,
}

impl<'a, D: DeviceDriver> DragScreen<'a, D> {
    /// Create the screen model using the toolkit's device profile
    #[must_use]
    pub fn new(toolkit: &'a Toolkit<D>) -> Self {
        Self {
            toolkit,
            nav: NavBar::for_profile(&toolkit.config().profile),
            settle_ms: DROP_SETTLE_MS,
        }
    }

    /// Override the settle pause between drops
    #[must_use]
    pub const fn with_settle_ms(mut self, ms: u64) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Navigate to the Drag tab
    pub async fn open(&self) -> PalparResult<()> {
        self.nav.navigate_to(self.toolkit, NavTab::Drag).await
    }

    /// Navigate back to the Home tab
    pub async fn return_home(&self) -> PalparResult<()> {
        self.nav.navigate_to(self.toolkit, NavTab::Home).await
    }

    /// Drag one piece from the tray to its drop zone
    pub async fn drag_piece(&self, piece: PuzzlePiece) -> PalparResult<()> {
        let (from, to) = piece.drag_vector();
        debug!(%piece, %from, %to, "dragging piece");
        self.toolkit.swipe(from, to).await
    }

    /// Drag all nine pieces in the fixed order, settling after each drop.
    ///
    /// Aborts on the first failed drag; no further drags are attempted.
    pub async fn drag_all_pieces_to_drop_zones(&self) -> PalparResult<()> {
        info!("dragging all pieces to drop zones");
        for piece in PuzzlePiece::ALL {
            self.drag_piece(piece).await?;
            self.toolkit.pause(self.settle_ms).await?;
        }
        Ok(())
    }

    /// Tap the puzzle area to surface the completion result
    pub async fn tap_to_verify_result(&self) -> PalparResult<()> {
        self.toolkit.tap(VERIFY_POINT).await
    }

    /// Tap again to confirm and dismiss the success message
    pub async fn tap_to_confirm(&self) -> PalparResult<()> {
        self.toolkit.tap(VERIFY_POINT).await
    }
}
