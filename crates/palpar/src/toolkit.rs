//! Interaction toolkit: gesture primitives and wait-then-act element
//! operations over an injected [`DeviceDriver`].
//!
//! This is one reusable value shared by every screen model instead of a
//! base-class hierarchy. All operations are strictly sequential: each
//! gesture, wait, and interaction is awaited before the next is issued,
//! and timeouts are the only cancellation mechanism. A gesture once
//! dispatched runs to completion.
//!
//! Failure policy: driver and timeout errors propagate and abort the
//! current step. The two deliberate exceptions are [`Toolkit::is_displayed`]
//! (a branching probe, converts every failure to `false`) and
//! [`Toolkit::hide_keyboard`] (a best-effort no-op when no keyboard is
//! shown).

use crate::driver::{DeviceDriver, DriverConfig};
use crate::gesture::{Gesture, GestureStep, DEFAULT_LONG_PRESS_DURATION_MS};
use crate::geometry::Point;
use crate::result::PalparResult;
use crate::selector::Selector;
use crate::wait::{poll_until, WaitOptions};
use tracing::{debug, trace, warn};

/// Settle pause after entering a screen, in milliseconds.
///
/// Used by [`Toolkit::wait_for_page_load`] when a screen exposes no element
/// predicate to poll on.
pub const PAGE_LOAD_SETTLE_MS: u64 = 1000;

/// Gesture and element interaction toolkit bound to one driver session
#[derive(Debug)]
pub struct Toolkit<D: DeviceDriver> {
    driver: D,
    config: DriverConfig,
}

impl<D: DeviceDriver> Toolkit<D> {
    /// Create a toolkit with the default configuration
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, DriverConfig::default())
    }

    /// Create a toolkit with an explicit configuration
    pub fn with_config(driver: D, config: DriverConfig) -> Self {
        Self { driver, config }
    }

    /// The underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// The toolkit configuration
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Gesture primitives
    // ------------------------------------------------------------------

    /// Dispatch a gesture as its atomic pointer sequences
    pub async fn perform(&self, gesture: Gesture) -> PalparResult<()> {
        debug!(?gesture, "dispatching gesture");
        for step in gesture.steps() {
            match step {
                GestureStep::Actions(actions) => self.driver.perform_pointer(&actions).await?,
                GestureStep::Settle { ms } => self.driver.pause(ms).await?,
            }
        }
        Ok(())
    }

    /// Tap at a point with the default hold
    pub async fn tap(&self, at: Point) -> PalparResult<()> {
        self.perform(Gesture::tap(at)).await
    }

    /// Tap at a point with an explicit hold duration
    pub async fn tap_with_hold(&self, at: Point, hold_ms: u64) -> PalparResult<()> {
        self.perform(Gesture::tap_with_hold(at, hold_ms)).await
    }

    /// Swipe between two points with the default transition duration
    pub async fn swipe(&self, from: Point, to: Point) -> PalparResult<()> {
        self.perform(Gesture::swipe(from, to)).await
    }

    /// Swipe between two points with an explicit transition duration.
    ///
    /// The duration decides how the target app recognizes the gesture
    /// (drag versus fling versus tap); pick it empirically per app build.
    pub async fn swipe_with_duration(
        &self,
        from: Point,
        to: Point,
        duration_ms: u64,
    ) -> PalparResult<()> {
        self.perform(Gesture::swipe_with_duration(from, to, duration_ms))
            .await
    }

    /// Long press at a point with the default hold duration
    pub async fn long_press(&self, at: Point) -> PalparResult<()> {
        self.long_press_with_duration(at, DEFAULT_LONG_PRESS_DURATION_MS)
            .await
    }

    /// Long press at a point with an explicit hold duration
    pub async fn long_press_with_duration(&self, at: Point, duration_ms: u64) -> PalparResult<()> {
        self.perform(Gesture::LongPress { at, duration_ms }).await
    }

    /// Double tap at a point
    pub async fn double_tap(&self, at: Point) -> PalparResult<()> {
        self.perform(Gesture::double_tap(at)).await
    }

    /// Settle pause routed through the driver
    pub async fn pause(&self, ms: u64) -> PalparResult<()> {
        self.driver.pause(ms).await
    }

    /// Bounded settle after entering a screen.
    ///
    /// A fixed fallback for screens that expose no load signal; when an
    /// element predicate exists, prefer [`Toolkit::wait_for_displayed`].
    pub async fn wait_for_page_load(&self) -> PalparResult<()> {
        self.pause(PAGE_LOAD_SETTLE_MS).await
    }

    // ------------------------------------------------------------------
    // Wait-then-act element interactions
    // ------------------------------------------------------------------

    fn wait_options(&self, timeout_ms: Option<u64>) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(timeout_ms.unwrap_or(self.config.wait_timeout_ms))
            .with_poll_interval(self.config.poll_interval_ms)
    }

    /// Wait until a matching element is displayed
    pub async fn wait_for_displayed(
        &self,
        selector: &Selector,
        timeout_ms: Option<u64>,
    ) -> PalparResult<()> {
        let what = format!("element displayed: {selector}");
        trace!(%selector, "waiting for displayed");
        let _ = poll_until(
            || self.driver.is_displayed(selector),
            self.wait_options(timeout_ms),
            &what,
        )
        .await?;
        Ok(())
    }

    /// Wait until a matching element exists in the view hierarchy
    pub async fn wait_for_exist(
        &self,
        selector: &Selector,
        timeout_ms: Option<u64>,
    ) -> PalparResult<()> {
        let what = format!("element exists: {selector}");
        trace!(%selector, "waiting for exist");
        let _ = poll_until(
            || self.driver.exists(selector),
            self.wait_options(timeout_ms),
            &what,
        )
        .await?;
        Ok(())
    }

    /// Wait until a matching element is enabled
    pub async fn wait_for_enabled(
        &self,
        selector: &Selector,
        timeout_ms: Option<u64>,
    ) -> PalparResult<()> {
        let what = format!("element enabled: {selector}");
        trace!(%selector, "waiting for enabled");
        let _ = poll_until(
            || self.driver.is_enabled(selector),
            self.wait_options(timeout_ms),
            &what,
        )
        .await?;
        Ok(())
    }

    /// Wait for the element to be displayed, then click it
    pub async fn click(&self, selector: &Selector) -> PalparResult<()> {
        self.wait_for_displayed(selector, None).await?;
        self.driver.click(selector).await
    }

    /// Wait for the element, clear its value, then set the new one.
    ///
    /// Clearing and setting are two separate driver calls; when clearing
    /// fails the set is not attempted.
    pub async fn set_value(&self, selector: &Selector, value: &str) -> PalparResult<()> {
        self.wait_for_displayed(selector, None).await?;
        self.driver.clear_value(selector).await?;
        self.driver.set_value(selector, value).await
    }

    /// Wait for the element to be displayed, then read its text
    pub async fn get_text(&self, selector: &Selector) -> PalparResult<String> {
        self.wait_for_displayed(selector, None).await?;
        self.driver.get_text(selector).await
    }

    /// Wait for the element to exist, then read an attribute
    pub async fn get_attribute(&self, selector: &Selector, name: &str) -> PalparResult<String> {
        self.wait_for_exist(selector, None).await?;
        self.driver.get_attribute(selector, name).await
    }

    /// Best-effort display probe bounded by the probe timeout.
    ///
    /// Never fails: timeouts and driver errors both read as `false`.
    /// Intended for branching logic, not assertions.
    pub async fn is_displayed(&self, selector: &Selector) -> bool {
        let what = format!("element displayed: {selector}");
        let options = WaitOptions::new()
            .with_timeout(self.config.probe_timeout_ms)
            .with_poll_interval(self.config.poll_interval_ms);
        poll_until(|| self.driver.is_displayed(selector), options, &what)
            .await
            .is_ok()
    }

    // ------------------------------------------------------------------
    // Device actions
    // ------------------------------------------------------------------

    /// Press the device back button
    pub async fn press_back(&self) -> PalparResult<()> {
        self.driver.back().await
    }

    /// Hide the on-screen keyboard if it is shown.
    ///
    /// Best-effort: failures (including "no keyboard shown") are swallowed
    /// and the call is a no-op.
    pub async fn hide_keyboard(&self) {
        match self.driver.is_keyboard_shown().await {
            Ok(true) => {
                if let Err(error) = self.driver.hide_keyboard().await {
                    warn!(%error, "hide_keyboard ignored failure");
                }
            }
            Ok(false) => {}
            Err(error) => warn!(%error, "keyboard probe ignored failure"),
        }
    }

    /// Capture a screenshot and write it under the configured reports
    /// directory as `<label>_<timestamp>.png`, with `:` and `.` in the
    /// ISO-8601 timestamp replaced by `-`. Returns the filename without
    /// the extension.
    pub async fn take_screenshot(&self, label: &str) -> PalparResult<String> {
        let shot = self.driver.screenshot().await?;
        let timestamp = chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
            .replace([':', '.'], "-");
        let stem = format!("{label}_{timestamp}");

        std::fs::create_dir_all(&self.config.screenshot_dir)?;
        let path = self.config.screenshot_dir.join(format!("{stem}.png"));
        std::fs::write(&path, &shot.data)?;
        debug!(path = %path.display(), "screenshot saved");
        Ok(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{CallRecord, DriverConfig, MockDriver, MockElement, Screenshot};
    use crate::gesture::PointerAction;

    fn fast_toolkit(driver: MockDriver) -> Toolkit<MockDriver> {
        Toolkit::with_config(
            driver,
            DriverConfig::new()
                .wait_timeout_ms(50)
                .probe_timeout_ms(30)
                .poll_interval_ms(1),
        )
    }

    mod gesture_tests {
        use super::*;

        #[tokio::test]
        async fn test_tap_dispatches_one_atomic_sequence() {
            let toolkit = fast_toolkit(MockDriver::new());
            toolkit.tap(Point::new(90, 2282)).await.unwrap();

            let calls = toolkit.driver().calls();
            assert_eq!(calls.len(), 1);
            match &calls[0] {
                CallRecord::Pointer(actions) => {
                    assert_eq!(
                        actions,
                        &vec![
                            PointerAction::Move {
                                duration_ms: 0,
                                to: Point::new(90, 2282)
                            },
                            PointerAction::Down,
                            PointerAction::Pause { ms: 50 },
                            PointerAction::Up,
                        ]
                    );
                }
                other => panic!("expected pointer sequence, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_double_tap_is_two_sequences_around_pause() {
            let toolkit = fast_toolkit(MockDriver::new());
            toolkit.double_tap(Point::new(517, 1559)).await.unwrap();

            let calls = toolkit.driver().calls();
            assert_eq!(calls.len(), 3);
            assert!(matches!(calls[0], CallRecord::Pointer(_)));
            assert!(matches!(calls[1], CallRecord::Pause(ms) if ms >= 100));
            assert!(matches!(calls[2], CallRecord::Pointer(_)));
        }

        #[tokio::test]
        async fn test_transport_failure_aborts_gesture() {
            let driver = MockDriver::new();
            driver.fail_on("perform_pointer");
            let toolkit = fast_toolkit(driver);
            assert!(toolkit.swipe(Point::new(0, 0), Point::new(9, 9)).await.is_err());
        }
    }

    mod wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_displayed_resolves_for_visible_element() {
            let driver = MockDriver::new();
            let sel = Selector::by_accessibility_id("Drag");
            driver.add_element(&sel, MockElement::displayed());
            let toolkit = fast_toolkit(driver);
            toolkit.wait_for_displayed(&sel, None).await.unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_displayed_times_out_with_selector_in_message() {
            let driver = MockDriver::new();
            let sel = Selector::by_accessibility_id("Never");
            driver.add_element(&sel, MockElement::hidden());
            let toolkit = fast_toolkit(driver);

            let err = toolkit.wait_for_displayed(&sel, Some(20)).await.unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("~Never"), "message was: {msg}");
            assert!(msg.contains("20ms"), "message was: {msg}");
        }

        #[tokio::test]
        async fn test_wait_for_displayed_resolves_after_late_render() {
            let driver = MockDriver::new();
            let sel = Selector::by_id("late");
            driver.add_element(&sel, MockElement::hidden().displayed_after(3));
            let toolkit = fast_toolkit(driver);
            toolkit.wait_for_displayed(&sel, None).await.unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_page_load_is_fixed_settle() {
            let toolkit = fast_toolkit(MockDriver::new());
            toolkit.wait_for_page_load().await.unwrap();
            assert_eq!(
                toolkit.driver().calls(),
                vec![CallRecord::Pause(PAGE_LOAD_SETTLE_MS)]
            );
        }

        #[tokio::test]
        async fn test_wait_for_exist_and_enabled() {
            let driver = MockDriver::new();
            let sel = Selector::by_id("field");
            driver.add_element(&sel, MockElement::displayed());
            let toolkit = fast_toolkit(driver);
            toolkit.wait_for_exist(&sel, None).await.unwrap();
            toolkit.wait_for_enabled(&sel, None).await.unwrap();
        }
    }

    mod interaction_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_waits_then_clicks() {
            let driver = MockDriver::new();
            let sel = Selector::by_text("Submit");
            driver.add_element(&sel, MockElement::displayed());
            let toolkit = fast_toolkit(driver);
            toolkit.click(&sel).await.unwrap();
            assert_eq!(
                toolkit.driver().calls(),
                vec![CallRecord::Click(sel.to_query())]
            );
        }

        #[tokio::test]
        async fn test_set_value_clears_strictly_before_set() {
            let driver = MockDriver::new();
            let sel = Selector::by_id("input");
            driver.add_element(&sel, MockElement::displayed().with_text("old"));
            let toolkit = fast_toolkit(driver);
            toolkit.set_value(&sel, "new").await.unwrap();

            assert_eq!(
                toolkit.driver().calls(),
                vec![
                    CallRecord::Clear(sel.to_query()),
                    CallRecord::SetValue(sel.to_query(), "new".to_string()),
                ]
            );
        }

        #[tokio::test]
        async fn test_set_value_aborts_when_clear_fails() {
            let driver = MockDriver::new();
            let sel = Selector::by_id("input");
            driver.add_element(&sel, MockElement::displayed());
            driver.fail_on("clear_value");
            let toolkit = fast_toolkit(driver);

            assert!(toolkit.set_value(&sel, "new").await.is_err());
            let calls = toolkit.driver().calls();
            assert!(!calls.iter().any(|c| matches!(c, CallRecord::SetValue(_, _))));
        }

        #[tokio::test]
        async fn test_get_text_and_attribute() {
            let driver = MockDriver::new();
            let sel = Selector::by_id("title");
            driver.add_element(
                &sel,
                MockElement::displayed()
                    .with_text("Congratulations")
                    .with_attribute("content-desc", "result"),
            );
            let toolkit = fast_toolkit(driver);

            assert_eq!(toolkit.get_text(&sel).await.unwrap(), "Congratulations");
            assert_eq!(
                toolkit.get_attribute(&sel, "content-desc").await.unwrap(),
                "result"
            );
        }

        #[tokio::test]
        async fn test_is_displayed_never_raises() {
            let driver = MockDriver::new();
            let visible = Selector::by_id("visible");
            driver.add_element(&visible, MockElement::displayed());
            let toolkit = fast_toolkit(driver);

            assert!(toolkit.is_displayed(&visible).await);
            assert!(!toolkit.is_displayed(&Selector::by_id("absent")).await);
        }

        #[tokio::test]
        async fn test_is_displayed_swallows_driver_errors() {
            let driver = MockDriver::new();
            driver.fail_on("is_displayed");
            let toolkit = fast_toolkit(driver);
            assert!(!toolkit.is_displayed(&Selector::by_id("any")).await);
        }
    }

    mod device_action_tests {
        use super::*;

        #[tokio::test]
        async fn test_hide_keyboard_hides_when_shown() {
            let driver = MockDriver::new();
            driver.set_keyboard_shown(true);
            let toolkit = fast_toolkit(driver);
            toolkit.hide_keyboard().await;
            assert_eq!(toolkit.driver().calls(), vec![CallRecord::HideKeyboard]);
        }

        #[tokio::test]
        async fn test_hide_keyboard_is_noop_without_keyboard() {
            let toolkit = fast_toolkit(MockDriver::new());
            toolkit.hide_keyboard().await;
            assert!(toolkit.driver().calls().is_empty());
        }

        #[tokio::test]
        async fn test_hide_keyboard_swallows_probe_failure() {
            let driver = MockDriver::new();
            driver.fail_on("is_keyboard_shown");
            let toolkit = fast_toolkit(driver);
            toolkit.hide_keyboard().await;
        }

        #[tokio::test]
        async fn test_press_back_propagates() {
            let toolkit = fast_toolkit(MockDriver::new());
            toolkit.press_back().await.unwrap();
            assert_eq!(toolkit.driver().calls(), vec![CallRecord::Back]);
        }
    }

    mod screenshot_tests {
        use super::*;

        #[tokio::test]
        async fn test_take_screenshot_writes_named_artifact() {
            let dir = tempfile::tempdir().unwrap();
            let driver = MockDriver::new();
            driver.set_screenshot(Screenshot::new(vec![0x89, 0x50, 0x4E, 0x47], 1080, 2400));
            let toolkit = Toolkit::with_config(
                driver,
                DriverConfig::new().screenshot_dir(dir.path()),
            );

            let stem = toolkit.take_screenshot("drag_failure").await.unwrap();
            assert!(stem.starts_with("drag_failure_"));
            assert!(!stem.contains(':'));
            assert!(!stem.contains('.'));
            assert!(dir.path().join(format!("{stem}.png")).exists());
        }

        #[tokio::test]
        async fn test_take_screenshot_propagates_capture_failure() {
            let dir = tempfile::tempdir().unwrap();
            let driver = MockDriver::new();
            driver.fail_on("screenshot");
            let toolkit = Toolkit::with_config(
                driver,
                DriverConfig::new().screenshot_dir(dir.path()),
            );
            assert!(toolkit.take_screenshot("label").await.is_err());
        }
    }
}
