//! Screen geometry: points, display bounds, and derived tab-bar targets.
//!
//! Coordinates are physical screen pixels for one device profile. Tap targets
//! for the bottom navigation bar are derived from the profile rather than
//! hard-coded per tab, so a different display width or tab count only needs a
//! new [`DeviceProfile`].

use serde::{Deserialize, Serialize};

/// A point in screen-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in pixels
    pub x: i32,
    /// Y coordinate in pixels
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Active display bounds of the target device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
}

impl ScreenGeometry {
    /// Create new display bounds
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a point falls within the display
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }
}

/// An evenly divided horizontal tab strip at a fixed vertical center.
///
/// Tab `i` occupies the band `[i*w, (i+1)*w)` where `w = screen_width /
/// tab_count`; its tap target is the band center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabBar {
    /// Display width the strip spans, in pixels
    pub screen_width: u32,
    /// Number of evenly sized tabs
    pub tab_count: u32,
    /// Vertical center of the strip, in pixels
    pub center_y: i32,
}

impl TabBar {
    /// Create a new tab strip description.
    ///
    /// # Panics
    ///
    /// Panics when `tab_count` is zero; an empty strip has no bands to
    /// divide the width into.
    #[must_use]
    pub const fn new(screen_width: u32, tab_count: u32, center_y: i32) -> Self {
        assert!(tab_count > 0, "tab_count must be nonzero");
        Self {
            screen_width,
            tab_count,
            center_y,
        }
    }

    /// Width of one tab band in pixels
    #[must_use]
    pub const fn tab_width(&self) -> u32 {
        self.screen_width / self.tab_count
    }

    /// Tap target for the 0-indexed tab `index`.
    ///
    /// `index` is expected to be below [`Self::tab_count`]; targets computed
    /// past the last tab land outside the strip.
    #[must_use]
    pub const fn target(&self, index: u32) -> Point {
        let w = self.tab_width();
        Point::new((w / 2 + index * w) as i32, self.center_y)
    }
}

/// Device descriptor bundling display bounds with navigation-bar geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Profile name
    pub name: &'static str,
    /// Display bounds
    pub screen: ScreenGeometry,
    /// Number of bottom-navigation tabs
    pub nav_tab_count: u32,
    /// Vertical center of the bottom-navigation bar
    pub nav_center_y: i32,
}

impl DeviceProfile {
    /// The WDIO demo app's test device: 1080 px wide display with a six-tab
    /// bottom bar whose bounds span y 2214..2351 (center 2282).
    pub const WDIO_DEMO: Self = Self {
        name: "wdio-demo-1080",
        screen: ScreenGeometry::new(1080, 2400),
        nav_tab_count: 6,
        nav_center_y: 2282,
    };

    /// Derive the bottom-navigation tab strip for this profile
    #[must_use]
    pub const fn tab_bar(&self) -> TabBar {
        TabBar::new(self.screen.width, self.nav_tab_count, self.nav_center_y)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::WDIO_DEMO
    }
}
