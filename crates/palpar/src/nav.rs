//! Bottom navigation bar model for the demo app.
//!
//! Six tabs in a fixed order; tap targets are derived from the device
//! profile's tab-bar geometry rather than hard-coded per tab.

use crate::driver::DeviceDriver;
use crate::geometry::{DeviceProfile, Point, TabBar};
use crate::result::PalparResult;
use crate::toolkit::Toolkit;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One tab of the demo app's bottom navigation bar, in layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavTab {
    /// Home screen
    Home,
    /// Webview screen
    Webview,
    /// Login form
    Login,
    /// Forms screen
    Forms,
    /// Swipe carousel
    Swipe,
    /// Drag-and-drop puzzle
    Drag,
}

impl NavTab {
    /// All tabs in layout order
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Webview,
        Self::Login,
        Self::Forms,
        Self::Swipe,
        Self::Drag,
    ];

    /// 0-indexed position in the tab strip
    #[must_use]
    pub const fn index(&self) -> u32 {
        match self {
            Self::Home => 0,
            Self::Webview => 1,
            Self::Login => 2,
            Self::Forms => 3,
            Self::Swipe => 4,
            Self::Drag => 5,
        }
    }

    /// Tab label as shown in the app
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Webview => "Webview",
            Self::Login => "Login",
            Self::Forms => "Forms",
            Self::Swipe => "Swipe",
            Self::Drag => "Drag",
        }
    }
}

impl std::fmt::Display for NavTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Navigation bar bound to one device profile's geometry
#[derive(Debug, Clone, Copy)]
pub struct NavBar {
    tab_bar: TabBar,
}

impl NavBar {
    /// Build the navigation bar from a device profile
    #[must_use]
    pub const fn for_profile(profile: &DeviceProfile) -> Self {
        Self {
            tab_bar: profile.tab_bar(),
        }
    }

    /// Tap target for a tab
    #[must_use]
    pub const fn target(&self, tab: NavTab) -> Point {
        self.tab_bar.target(tab.index())
    }

    /// Tap the given tab
    pub async fn navigate_to<D: DeviceDriver>(
        &self,
        toolkit: &Toolkit<D>,
        tab: NavTab,
    ) -> PalparResult<()> {
        info!(%tab, "navigating via bottom bar");
        toolkit.tap(self.target(tab)).await
    }
}

impl Default for NavBar {
    fn default() -> Self {
        Self::for_profile(&DeviceProfile::WDIO_DEMO)
    }
}
