//! Application state management.
//!
//! State is owned by the running [`super::App`] and passed down by reference;
//! nothing here is global. Each route entry creates a fresh [`MountedView`]
//! with its own fetch result, panels, and per-table filter/page state.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::payload::Payload;
use crate::view::dump::dump_lines;
use crate::view::sections::{Panel, build_panels};
use crate::view::table::{ColumnPolicy, TableView};

/// Top-level screens, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// `/`: sections rendered as tables.
    #[default]
    App,
    /// `/dashboard`: raw payload dump.
    Dashboard,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::App, Route::Dashboard]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::App => "/",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::App => "App",
            Route::Dashboard => "Dashboard",
        }
    }

    /// Screen title.
    pub fn title(&self) -> &'static str {
        match self {
            Route::App => "Data Dashboard",
            Route::Dashboard => "Processed Data Dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('/') {
            "" => Ok(Route::App),
            "/dashboard" | "dashboard" => Ok(Route::Dashboard),
            _ => Err(format!("unknown route '{s}' (expected '/' or '/dashboard')")),
        }
    }
}

/// Lifetime token of one mount. Cancelled when the view is unmounted so that
/// a fetch still in flight drops its result.
#[derive(Debug, Clone)]
pub struct MountToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl MountToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Fetch progress of a mounted view. There is no way back to `Loading`
/// without a remount.
#[derive(Debug, Clone)]
pub enum ViewPhase {
    Loading,
    /// `None`: the fetch failed or returned nothing.
    Loaded(Option<Payload>),
}

/// One mount of a route.
#[derive(Debug)]
pub struct MountedView {
    pub route: Route,
    pub token: MountToken,
    pub phase: ViewPhase,
    /// App view panels, built once the fetch settles.
    pub panels: Vec<Panel>,
    /// Focused panel index (App view).
    pub focused: usize,
    /// Dashboard dump lines, built once the fetch settles.
    pub dump: Vec<String>,
    /// Vertical scroll of the dump or slide list.
    pub scroll: usize,
    pub loaded_at: Option<DateTime<Local>>,
}

impl MountedView {
    fn new(route: Route, token: MountToken) -> Self {
        Self {
            route,
            token,
            phase: ViewPhase::Loading,
            panels: Vec::new(),
            focused: 0,
            dump: Vec::new(),
            scroll: 0,
            loaded_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading)
    }

    pub fn focused_panel(&self) -> Option<&Panel> {
        self.panels.get(self.focused)
    }

    pub fn focused_panel_mut(&mut self) -> Option<&mut Panel> {
        self.panels.get_mut(self.focused)
    }

    /// Focused table, if the focused panel is a table with records.
    pub fn focused_table_mut(&mut self) -> Option<&mut TableView> {
        self.focused_panel_mut()
            .and_then(Panel::table_mut)
            .filter(|t| !t.is_empty())
    }

    pub fn focus_next(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + 1) % self.panels.len();
            self.scroll = 0;
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + self.panels.len() - 1) % self.panels.len();
            self.scroll = 0;
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the focused table's search filter.
    Filter,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    QuitConfirm,
}

impl PopupState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Whole-application state.
#[derive(Debug)]
pub struct AppState {
    /// `None` while no route is mounted.
    pub view: Option<MountedView>,
    pub input_mode: InputMode,
    pub popup: PopupState,
    pub status_message: Option<String>,
    pub column_policy: ColumnPolicy,
    /// Where the payload comes from, shown in the header.
    pub source_label: String,
    next_mount_id: u64,
}

impl AppState {
    pub fn new(column_policy: ColumnPolicy, source_label: impl Into<String>) -> Self {
        Self {
            view: None,
            input_mode: InputMode::Normal,
            popup: PopupState::None,
            status_message: None,
            column_policy,
            source_label: source_label.into(),
            next_mount_id: 1,
        }
    }

    pub fn current_route(&self) -> Option<Route> {
        self.view.as_ref().map(|v| v.route)
    }

    /// Unmounts the current view (if any) and mounts `route` in `Loading`.
    /// The returned token belongs to the new mount.
    pub fn mount(&mut self, route: Route) -> MountToken {
        self.unmount();
        let token = MountToken::new(self.next_mount_id);
        self.next_mount_id += 1;
        info!(route = %route, mount = token.id(), "mounting view");
        self.view = Some(MountedView::new(route, token.clone()));
        token
    }

    /// Drops the current view, cancelling its pending fetch.
    pub fn unmount(&mut self) {
        if let Some(view) = self.view.take() {
            debug!(route = %view.route, mount = view.token.id(), "unmounting view");
            view.token.cancel();
        }
        self.input_mode = InputMode::Normal;
    }

    /// Applies a settled fetch. Results for another mount, or arriving after
    /// the view already loaded, are discarded. Returns whether state changed.
    pub fn apply_fetch(&mut self, mount: u64, payload: Option<Payload>) -> bool {
        let policy = self.column_policy;
        let Some(view) = self.view.as_mut() else {
            debug!(mount, "discarding fetch result: no view mounted");
            return false;
        };
        if view.token.id() != mount || view.token.is_cancelled() {
            debug!(
                mount,
                current = view.token.id(),
                "discarding fetch result for stale mount"
            );
            return false;
        }
        if !view.is_loading() {
            return false;
        }

        match view.route {
            Route::App => view.panels = build_panels(payload.as_ref(), policy),
            Route::Dashboard => view.dump = dump_lines(payload.as_ref()),
        }
        info!(
            route = %view.route,
            mount,
            loaded = payload.is_some(),
            panels = view.panels.len(),
            "view loaded"
        );
        view.focused = 0;
        view.scroll = 0;
        view.loaded_at = Some(Local::now());
        view.phase = ViewPhase::Loaded(payload);
        true
    }

    pub fn any_popup_open(&self) -> bool {
        self.popup.is_open()
    }

    /// Filter text of the focused table, if any.
    pub fn current_filter(&self) -> Option<&str> {
        self.view
            .as_ref()
            .and_then(MountedView::focused_panel)
            .and_then(Panel::table)
            .map(TableView::filter)
            .filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(ColumnPolicy::FirstRecord, "test")
    }

    fn employee_payload() -> Payload {
        Payload::from_value(json!({
            "json_company_data": [],
            "json_employee_data": [{"name": "Acme", "id": 1}]
        }))
    }

    #[test]
    fn route_paths_parse() {
        assert_eq!("/".parse::<Route>(), Ok(Route::App));
        assert_eq!("/dashboard".parse::<Route>(), Ok(Route::Dashboard));
        assert_eq!("/dashboard/".parse::<Route>(), Ok(Route::Dashboard));
        assert!("/admin".parse::<Route>().is_err());
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
    }

    #[test]
    fn mount_starts_loading() {
        let mut state = state();
        assert!(state.view.is_none());

        let token = state.mount(Route::App);
        let view = state.view.as_ref().unwrap();
        assert!(view.is_loading());
        assert_eq!(view.token.id(), token.id());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn fetch_result_loads_current_mount() {
        let mut state = state();
        let token = state.mount(Route::App);

        assert!(state.apply_fetch(token.id(), Some(employee_payload())));
        let view = state.view.as_ref().unwrap();
        assert!(matches!(view.phase, ViewPhase::Loaded(Some(_))));
        assert_eq!(view.panels.len(), 6);
        assert!(view.loaded_at.is_some());
    }

    #[test]
    fn failed_fetch_loads_with_none() {
        let mut state = state();
        let token = state.mount(Route::App);

        assert!(state.apply_fetch(token.id(), None));
        let view = state.view.as_ref().unwrap();
        assert!(matches!(view.phase, ViewPhase::Loaded(None)));
        assert!(view.panels.iter().all(|p| p.table().is_none()));
    }

    #[test]
    fn remount_cancels_previous_token_and_ignores_its_result() {
        let mut state = state();
        let first = state.mount(Route::App);
        let second = state.mount(Route::Dashboard);

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_ne!(first.id(), second.id());

        assert!(!state.apply_fetch(first.id(), Some(employee_payload())));
        assert!(state.view.as_ref().unwrap().is_loading());

        assert!(state.apply_fetch(second.id(), Some(employee_payload())));
        assert!(!state.view.as_ref().unwrap().dump.is_empty());
    }

    #[test]
    fn result_after_unmount_is_discarded() {
        let mut state = state();
        let token = state.mount(Route::App);
        state.unmount();

        assert!(token.is_cancelled());
        assert!(!state.apply_fetch(token.id(), Some(employee_payload())));
        assert!(state.view.is_none());
    }

    #[test]
    fn loaded_view_does_not_reload() {
        let mut state = state();
        let token = state.mount(Route::App);
        assert!(state.apply_fetch(token.id(), None));
        assert!(!state.apply_fetch(token.id(), Some(employee_payload())));
        assert!(matches!(
            state.view.as_ref().unwrap().phase,
            ViewPhase::Loaded(None)
        ));
    }

    #[test]
    fn focus_wraps_around_panels() {
        let mut state = state();
        let token = state.mount(Route::App);
        state.apply_fetch(token.id(), Some(employee_payload()));
        let view = state.view.as_mut().unwrap();

        view.focus_prev();
        assert_eq!(view.focused, 5);
        view.focus_next();
        assert_eq!(view.focused, 0);
        view.focus_next();
        assert_eq!(view.focused_panel().unwrap().heading(), "Employee Data");
        assert!(view.focused_table_mut().is_some());
    }

    #[test]
    fn placeholder_panel_has_no_focused_table() {
        let mut state = state();
        let token = state.mount(Route::App);
        state.apply_fetch(token.id(), Some(employee_payload()));
        let view = state.view.as_mut().unwrap();
        assert_eq!(view.focused, 0);
        assert!(view.focused_table_mut().is_none());
    }
}
