//! Abstract device automation driver.
//!
//! The remote automation client is injected as an explicit [`DeviceDriver`]
//! value rather than referenced as ambient global state. Everything above
//! this trait is backend-agnostic: any automation backend that implements
//! the primitive set below can drive the toolkit, and tests substitute the
//! in-memory [`MockDriver`].
//!
//! The trait is the out-of-scope boundary: session bootstrapping, element
//! resolution, and gesture synthesis live behind it.

use crate::gesture::PointerAction;
use crate::geometry::DeviceProfile;
use crate::result::{PalparError, PalparResult};
use crate::selector::Selector;
use crate::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS, PROBE_TIMEOUT_MS};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

/// Screenshot data captured from the device
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Raw PNG data
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Timestamp when the screenshot was taken
    pub timestamp: std::time::SystemTime,
}

impl Screenshot {
    /// Create a new screenshot
    #[must_use]
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: std::time::SystemTime::now(),
        }
    }

    /// Get the size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the screenshot has data and non-zero dimensions
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty() && self.width > 0 && self.height > 0
    }
}

/// Configuration for the interaction toolkit
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Default bound for wait-then-act operations, in milliseconds
    pub wait_timeout_ms: u64,
    /// Bound for best-effort display probes, in milliseconds
    pub probe_timeout_ms: u64,
    /// Polling interval for waits, in milliseconds
    pub poll_interval_ms: u64,
    /// Directory where screenshot artifacts are written
    pub screenshot_dir: PathBuf,
    /// Target device profile
    pub profile: DeviceProfile,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            probe_timeout_ms: PROBE_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            screenshot_dir: PathBuf::from("./reports/screenshots"),
            profile: DeviceProfile::WDIO_DEMO,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default wait timeout
    #[must_use]
    pub const fn wait_timeout_ms(mut self, ms: u64) -> Self {
        self.wait_timeout_ms = ms;
        self
    }

    /// Set the probe timeout
    #[must_use]
    pub const fn probe_timeout_ms(mut self, ms: u64) -> Self {
        self.probe_timeout_ms = ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the screenshot output directory
    #[must_use]
    pub fn screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Set the device profile
    #[must_use]
    pub const fn profile(mut self, profile: DeviceProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Abstract driver trait for device automation.
///
/// One session drives one device; calls are issued and awaited strictly
/// sequentially. Every element operation takes a [`Selector`] and is an
/// independent round trip: the driver re-resolves the element each time.
///
/// # Implementations
///
/// - An Appium/WebDriver-backed driver in the harness that owns the session
/// - [`MockDriver`] for unit and scenario tests
#[async_trait]
pub trait DeviceDriver: Send + Sync {
    /// Submit one atomic pointer action sequence
    async fn perform_pointer(&self, actions: &[PointerAction]) -> PalparResult<()>;

    /// Suspend for `ms` milliseconds between dispatches
    async fn pause(&self, ms: u64) -> PalparResult<()>;

    /// Whether an element matching the selector exists
    async fn exists(&self, selector: &Selector) -> PalparResult<bool>;

    /// Whether a matching element is currently displayed
    async fn is_displayed(&self, selector: &Selector) -> PalparResult<bool>;

    /// Whether a matching element is enabled
    async fn is_enabled(&self, selector: &Selector) -> PalparResult<bool>;

    /// Click a matching element
    async fn click(&self, selector: &Selector) -> PalparResult<()>;

    /// Clear the value of a matching input element
    async fn clear_value(&self, selector: &Selector) -> PalparResult<()>;

    /// Set the value of a matching input element
    async fn set_value(&self, selector: &Selector, value: &str) -> PalparResult<()>;

    /// Read the visible text of a matching element
    async fn get_text(&self, selector: &Selector) -> PalparResult<String>;

    /// Read an attribute of a matching element
    async fn get_attribute(&self, selector: &Selector, name: &str) -> PalparResult<String>;

    /// Press the device back button
    async fn back(&self) -> PalparResult<()>;

    /// Whether the on-screen keyboard is shown
    async fn is_keyboard_shown(&self) -> PalparResult<bool>;

    /// Hide the on-screen keyboard
    async fn hide_keyboard(&self) -> PalparResult<()>;

    /// Capture a screenshot of the current screen
    async fn screenshot(&self) -> PalparResult<Screenshot>;
}

/// One dispatched driver call, recorded by [`MockDriver`] in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallRecord {
    /// Atomic pointer action sequence
    Pointer(Vec<PointerAction>),
    /// Settle pause in milliseconds
    Pause(u64),
    /// Click on a selector query
    Click(String),
    /// Clear on a selector query
    Clear(String),
    /// Set value on a selector query
    SetValue(String, String),
    /// Text read from a selector query
    GetText(String),
    /// Attribute read from a selector query
    GetAttribute(String, String),
    /// Back button press
    Back,
    /// Keyboard hide
    HideKeyboard,
    /// Screenshot capture
    Screenshot,
}

/// Scripted state of one mock element
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    /// Element exists in the view hierarchy
    pub exists: bool,
    /// Element is displayed
    pub displayed: bool,
    /// Element is enabled
    pub enabled: bool,
    /// Number of display probes to answer `false` before turning displayed
    pub polls_until_displayed: Option<u32>,
    /// Visible text
    pub text: String,
    /// Attribute values
    pub attributes: HashMap<String, String>,
}

impl MockElement {
    /// An element that exists, is displayed, and is enabled
    #[must_use]
    pub fn displayed() -> Self {
        Self {
            exists: true,
            displayed: true,
            enabled: true,
            ..Self::default()
        }
    }

    /// An element that exists but is not yet displayed
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            exists: true,
            ..Self::default()
        }
    }

    /// Turn displayed after `polls` display probes
    #[must_use]
    pub const fn displayed_after(mut self, polls: u32) -> Self {
        self.polls_until_displayed = Some(polls);
        self
    }

    /// Set the visible text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute value
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<CallRecord>,
    elements: HashMap<String, MockElement>,
    keyboard_shown: bool,
    screenshot: Option<Screenshot>,
    fail_always: HashSet<&'static str>,
    fail_after: HashMap<&'static str, u32>,
}

/// In-memory driver fake that records every dispatched call in order.
///
/// Element state, text, attributes, keyboard visibility, and screenshot data
/// are scripted up front; failures can be injected per method, either always
/// or after a number of successful calls.
#[derive(Debug, Default)]
pub struct MockDriver {
    inner: Mutex<MockState>,
}

impl MockDriver {
    /// Create a new mock driver with no scripted state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the state of the element matched by `selector`
    pub fn add_element(&self, selector: &Selector, element: MockElement) {
        let mut state = self.inner.lock().unwrap();
        let _ = state.elements.insert(selector.to_query(), element);
    }

    /// Script keyboard visibility
    pub fn set_keyboard_shown(&self, shown: bool) {
        self.inner.lock().unwrap().keyboard_shown = shown;
    }

    /// Script the screenshot returned by capture calls
    pub fn set_screenshot(&self, screenshot: Screenshot) {
        self.inner.lock().unwrap().screenshot = Some(screenshot);
    }

    /// Make every call to `method` fail with a driver error
    pub fn fail_on(&self, method: &'static str) {
        let _ = self.inner.lock().unwrap().fail_always.insert(method);
    }

    /// Make calls to `method` fail after `successes` successful calls
    pub fn fail_after(&self, method: &'static str, successes: u32) {
        let _ = self
            .inner
            .lock()
            .unwrap()
            .fail_after
            .insert(method, successes);
    }

    /// All recorded calls, in dispatch order
    #[must_use]
    pub fn calls(&self) -> Vec<CallRecord> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Only the gesture traffic: pointer sequences and pauses, in order
    #[must_use]
    pub fn gesture_log(&self) -> Vec<CallRecord> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, CallRecord::Pointer(_) | CallRecord::Pause(_)))
            .collect()
    }

    /// Number of recorded pointer sequences
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, CallRecord::Pointer(_)))
            .count()
    }

    fn check_fail(&self, method: &'static str) -> PalparResult<()> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_always.contains(method) {
            return Err(PalparError::driver(format!(
                "injected failure in {method}"
            )));
        }
        if let Some(remaining) = state.fail_after.get_mut(method) {
            if *remaining == 0 {
                return Err(PalparError::driver(format!(
                    "injected failure in {method}"
                )));
            }
            *remaining -= 1;
        }
        Ok(())
    }

    fn record(&self, call: CallRecord) {
        self.inner.lock().unwrap().calls.push(call);
    }

    fn with_element<T>(
        &self,
        selector: &Selector,
        f: impl FnOnce(&mut MockElement) -> T,
    ) -> Option<T> {
        let mut state = self.inner.lock().unwrap();
        state.elements.get_mut(&selector.to_query()).map(f)
    }

    fn require_element<T>(
        &self,
        selector: &Selector,
        f: impl FnOnce(&mut MockElement) -> T,
    ) -> PalparResult<T> {
        self.with_element(selector, f)
            .ok_or_else(|| PalparError::driver(format!("no such element: {selector}")))
    }
}

#[async_trait]
impl DeviceDriver for MockDriver {
    async fn perform_pointer(&self, actions: &[PointerAction]) -> PalparResult<()> {
        self.check_fail("perform_pointer")?;
        self.record(CallRecord::Pointer(actions.to_vec()));
        Ok(())
    }

    async fn pause(&self, ms: u64) -> PalparResult<()> {
        // Recorded but not slept: the fake has no device to settle.
        self.check_fail("pause")?;
        self.record(CallRecord::Pause(ms));
        Ok(())
    }

    async fn exists(&self, selector: &Selector) -> PalparResult<bool> {
        self.check_fail("exists")?;
        Ok(self.with_element(selector, |e| e.exists).unwrap_or(false))
    }

    async fn is_displayed(&self, selector: &Selector) -> PalparResult<bool> {
        self.check_fail("is_displayed")?;
        Ok(self
            .with_element(selector, |e| {
                if let Some(polls) = e.polls_until_displayed {
                    if polls == 0 {
                        e.displayed = true;
                        e.polls_until_displayed = None;
                    } else {
                        e.polls_until_displayed = Some(polls - 1);
                    }
                }
                e.displayed
            })
            .unwrap_or(false))
    }

    async fn is_enabled(&self, selector: &Selector) -> PalparResult<bool> {
        self.check_fail("is_enabled")?;
        Ok(self.with_element(selector, |e| e.enabled).unwrap_or(false))
    }

    async fn click(&self, selector: &Selector) -> PalparResult<()> {
        self.check_fail("click")?;
        self.require_element(selector, |_| ())?;
        self.record(CallRecord::Click(selector.to_query()));
        Ok(())
    }

    async fn clear_value(&self, selector: &Selector) -> PalparResult<()> {
        self.check_fail("clear_value")?;
        self.require_element(selector, |e| e.text.clear())?;
        self.record(CallRecord::Clear(selector.to_query()));
        Ok(())
    }

    async fn set_value(&self, selector: &Selector, value: &str) -> PalparResult<()> {
        self.check_fail("set_value")?;
        self.require_element(selector, |e| e.text = value.to_string())?;
        self.record(CallRecord::SetValue(selector.to_query(), value.to_string()));
        Ok(())
    }

    async fn get_text(&self, selector: &Selector) -> PalparResult<String> {
        self.check_fail("get_text")?;
        let text = self.require_element(selector, |e| e.text.clone())?;
        self.record(CallRecord::GetText(selector.to_query()));
        Ok(text)
    }

    async fn get_attribute(&self, selector: &Selector, name: &str) -> PalparResult<String> {
        self.check_fail("get_attribute")?;
        let value = self.require_element(selector, |e| e.attributes.get(name).cloned())?;
        self.record(CallRecord::GetAttribute(
            selector.to_query(),
            name.to_string(),
        ));
        value.ok_or_else(|| PalparError::driver(format!("no attribute '{name}' on {selector}")))
    }

    async fn back(&self) -> PalparResult<()> {
        self.check_fail("back")?;
        self.record(CallRecord::Back);
        Ok(())
    }

    async fn is_keyboard_shown(&self) -> PalparResult<bool> {
        self.check_fail("is_keyboard_shown")?;
        Ok(self.inner.lock().unwrap().keyboard_shown)
    }

    async fn hide_keyboard(&self) -> PalparResult<()> {
        self.check_fail("hide_keyboard")?;
        self.inner.lock().unwrap().keyboard_shown = false;
        self.record(CallRecord::HideKeyboard);
        Ok(())
    }

    async fn screenshot(&self) -> PalparResult<Screenshot> {
        self.check_fail("screenshot")?;
        self.record(CallRecord::Screenshot);
        self.inner
            .lock()
            .unwrap()
            .screenshot
            .clone()
            .ok_or_else(|| PalparError::Screenshot {
                message: "no mock screenshot set".to_string(),
            })
    }
}
