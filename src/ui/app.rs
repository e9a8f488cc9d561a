//! Main application UI.

use std::time::Instant;

use eframe::egui;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::mock;
use crate::models::{CreateStaff, Role, StaffRecord};
use crate::otp::{OtpInput, ResendCountdown};
use crate::session::Session;
use crate::table::{TableController, apply_filter, apply_sort, last_page};

use super::components::{alert_dialog, colors};
use super::{otp_view, sign_in, staff_panel};

/// Screen currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    SignIn,
    Otp,
    Staff,
}

/// Messages from async tasks to UI.
///
/// Every spawned request sends exactly one of these, so the matching
/// loading flag is always cleared.
#[derive(Debug)]
pub enum UiMessage {
    LoginFinished(Result<String, String>),
    OtpVerified(Result<String, String>),
    OtpResent(Result<(), String>),
    StaffCreated { email: String, result: Result<(), String> },
}

/// Sign-in form state.
#[derive(Debug, Default, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub loading: bool,
}

/// OTP screen state. Dropping it stops the countdown.
#[derive(Debug, Clone)]
pub struct OtpState {
    pub input: OtpInput,
    pub countdown: ResendCountdown,
    pub loading: bool,
}

impl OtpState {
    pub fn new(cooldown_secs: u32) -> Self {
        Self {
            input: OtpInput::new(),
            countdown: ResendCountdown::start(cooldown_secs, Instant::now()),
            loading: false,
        }
    }
}

/// Single field update of the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffFormField {
    Email(String),
    Password(String),
    Role(Role),
}

/// Form state for registering a staff member.
#[derive(Debug, Default, Clone)]
pub struct StaffForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub is_open: bool,
}

impl StaffForm {
    /// Show the dialog. Fields typed before a cancel are kept.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the dialog without clearing it.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Apply one field update.
    pub fn update(&mut self, field: StaffFormField) {
        match field {
            StaffFormField::Email(email) => self.email = email,
            StaffFormField::Password(password) => self.password = password,
            StaffFormField::Role(role) => self.role = role,
        }
    }

    /// Captured values ready to hand to the API.
    pub fn to_create(&self) -> CreateStaff {
        CreateStaff {
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
        }
    }

    /// Reset the form to default values, which also closes it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Staff screen state, created when the screen is entered.
#[derive(Debug, Clone)]
pub struct StaffPanelState {
    pub records: Vec<StaffRecord>,
    pub table: TableController,
    pub filter_text: String,
    pub form: StaffForm,
}

impl StaffPanelState {
    pub fn new(records: Vec<StaffRecord>, rows_per_page: usize) -> Self {
        Self {
            records,
            table: TableController::new(rows_per_page),
            filter_text: String::new(),
            form: StaffForm::default(),
        }
    }

    /// Replace the search text and go back to the first page.
    pub fn set_filter(&mut self, text: String) {
        self.filter_text = text;
        self.table.on_reset_page();
    }

    /// Rows matching the search, in table order, across all pages.
    pub fn visible_rows(&self) -> Vec<&StaffRecord> {
        let mut rows = apply_filter(&self.records, &self.filter_text);
        apply_sort(&mut rows, self.table.sort_key(), self.table.direction());
        rows
    }

    /// Rows to export: the selection if there is one, otherwise every row
    /// matching the search. Table order either way.
    pub fn rows_for_export(&self) -> Vec<&StaffRecord> {
        if self.table.selected().is_empty() {
            return self.visible_rows();
        }
        let mut rows: Vec<_> = self
            .records
            .iter()
            .filter(|r| self.table.is_selected(&r.id))
            .collect();
        apply_sort(&mut rows, self.table.sort_key(), self.table.direction());
        rows
    }

    /// Pull the page back inside the filtered results.
    pub fn clamp_page(&mut self) {
        let last = last_page(apply_filter(&self.records, &self.filter_text).len(), self.table.rows_per_page());
        if self.table.page() > last {
            self.table.on_change_page(last);
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime and API
    pub rt: tokio::runtime::Runtime,
    pub client: ApiClient,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Configuration and session
    pub config: AppConfig,
    pub session: Session,

    // Navigation
    pub screen: Screen,

    // Per-screen state
    pub sign_in: SignInForm,
    pub otp: Option<OtpState>,
    pub staff: Option<StaffPanelState>,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        config: AppConfig,
        client: ApiClient,
        session: Session,
        rt: tokio::runtime::Runtime,
        initial_error: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            client,
            tx,
            rx,
            config,
            session,
            screen: Screen::default(),
            sign_in: SignInForm::default(),
            otp: None,
            staff: None,
            error_message: initial_error,
            success_message: None,
        };

        // Resume straight into the staff list when a token survived restart
        if app.session.is_authenticated() {
            app.navigate(Screen::Staff);
        }

        app
    }

    /// Switch screens, mounting the target's state and dropping the old one.
    pub fn navigate(&mut self, target: Screen) {
        let target = if target == Screen::Staff && !self.session.is_authenticated() {
            warn!("Staff screen requires a session, showing sign-in");
            Screen::SignIn
        } else {
            target
        };

        if target != Screen::Otp {
            self.otp = None;
        }
        if target != Screen::Staff {
            self.staff = None;
        }

        match target {
            Screen::SignIn => {}
            Screen::Otp => {
                if self.otp.is_none() {
                    self.otp = Some(OtpState::new(self.config.otp.resend_cooldown_secs));
                }
            }
            Screen::Staff => {
                if self.staff.is_none() {
                    self.staff = Some(StaffPanelState::new(
                        mock::staff_records(),
                        self.config.table.rows_per_page,
                    ));
                }
            }
        }

        self.screen = target;
    }

    /// Submit the sign-in form.
    pub fn sign_in(&mut self) {
        if self.sign_in.loading {
            return;
        }
        self.sign_in.loading = true;

        let client = self.client.clone();
        let tx = self.tx.clone();
        let email = self.sign_in.email.clone();
        let password = self.sign_in.password.clone();

        self.rt.spawn(async move {
            let result = client.login(&email, &password).await.map_err(|e| e.alert_text());
            let _ = tx.send(UiMessage::LoginFinished(result));
        });
    }

    /// Submit the passcode for verification.
    pub fn verify_otp(&mut self) {
        let Some(otp) = self.otp.as_mut() else {
            return;
        };
        if otp.loading {
            return;
        }

        let code = match otp.input.complete_code() {
            Ok(code) => code,
            Err(e) => {
                self.error_message = Some(e.alert_text());
                return;
            }
        };
        otp.loading = true;

        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.verify_otp(&code).await.map_err(|e| e.alert_text());
            let _ = tx.send(UiMessage::OtpVerified(result));
        });
    }

    /// Ask for a new passcode once the countdown allows it.
    pub fn resend_otp(&mut self) {
        let Some(otp) = self.otp.as_mut() else {
            return;
        };
        if otp.loading || !otp.countdown.resend_enabled() {
            return;
        }
        otp.loading = true;

        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.resend_otp().await.map_err(|e| e.alert_text());
            let _ = tx.send(UiMessage::OtpResent(result));
        });
    }

    /// Hand a registration to the API without waiting for it.
    pub fn create_staff(&mut self, data: CreateStaff) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let token = self.session.token().map(str::to_string);

        self.rt.spawn(async move {
            let result = client
                .create_staff(&data, token.as_deref())
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::StaffCreated {
                email: data.email,
                result,
            });
        });
    }

    /// Forget the session and go back to sign-in.
    pub fn sign_out(&mut self) {
        if let Err(e) = self.session.clear() {
            error!("Failed to clear session: {}", e);
        }
        self.sign_in = SignInForm::default();
        self.navigate(Screen::SignIn);
    }

    /// Store a fresh token and open the landing screen.
    fn accept_token(&mut self, token: String) {
        match self.session.set_token(token) {
            Ok(()) => self.navigate(Screen::Staff),
            Err(e) => {
                error!("Failed to store session token: {}", e);
                self.error_message = Some(e.alert_text());
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::LoginFinished(result) => {
                    self.sign_in.loading = false;
                    match result {
                        Ok(token) => {
                            info!("Signed in as {}", self.sign_in.email);
                            self.sign_in.password.clear();
                            self.accept_token(token);
                        }
                        Err(e) => self.error_message = Some(e),
                    }
                }
                UiMessage::OtpVerified(result) => {
                    if let Some(otp) = self.otp.as_mut() {
                        otp.loading = false;
                    }
                    match result {
                        Ok(token) => {
                            info!("Passcode verified");
                            self.accept_token(token);
                        }
                        Err(e) => self.error_message = Some(e),
                    }
                }
                UiMessage::OtpResent(result) => {
                    if let Some(otp) = self.otp.as_mut() {
                        otp.loading = false;
                        if result.is_ok() {
                            otp.countdown.restart(Instant::now());
                        }
                    }
                    match result {
                        Ok(()) => self.success_message = Some("OTP has been resent to your email".to_string()),
                        Err(e) => self.error_message = Some(e),
                    }
                }
                UiMessage::StaffCreated { email, result } => match result {
                    Ok(()) => info!("Staff registered: {}", email),
                    Err(e) => warn!("Staff registration for {} failed: {}", email, e),
                },
            }
        }
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.error_message.clone()
            && alert_dialog(ctx, "Error", &error, colors::ERROR)
        {
            self.error_message = None;
        }

        if let Some(msg) = self.success_message.clone()
            && alert_dialog(ctx, "Success", &msg, colors::SUCCESS)
        {
            self.success_message = None;
        }
    }

    /// Schedule repaints for in-flight requests and the countdown.
    fn request_repaints(&mut self, ctx: &egui::Context) {
        let otp_loading = self.otp.as_ref().is_some_and(|otp| otp.loading);
        if self.sign_in.loading || otp_loading {
            ctx.request_repaint();
        }

        if let Some(otp) = self.otp.as_mut() {
            let now = Instant::now();
            otp.countdown.poll(now);
            if let Some(wait) = otp.countdown.until_next_tick(now) {
                ctx.request_repaint_after(wait);
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();
        self.request_repaints(ctx);

        // Modal dialogs block the screen underneath
        let blocked = self.error_message.is_some() || self.success_message.is_some();
        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if blocked {
                ui.disable();
            }
            match self.screen {
                Screen::SignIn => {
                    if let Some(next) = sign_in::show(self, ui) {
                        self.navigate(next);
                    }
                }
                Screen::Otp => {
                    if let Some(next) = otp_view::show(self, ui) {
                        self.navigate(next);
                    }
                }
                Screen::Staff => {
                    if staff_panel::show(self, ui) {
                        self.sign_out();
                    }
                }
            }
        });
    }
}

/// App with default config and a token store inside `dir`.
#[cfg(test)]
pub(crate) fn test_app(dir: &tempfile::TempDir) -> App {
    let config = AppConfig::default();
    let client = ApiClient::new(&config.api).unwrap();
    let session = Session::restore(crate::session::TokenStore::new(dir.path().join("session.json")));
    let rt = tokio::runtime::Runtime::new().unwrap();
    App::new(config, client, session, rt, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenStore;

    #[test]
    fn test_staff_form_field_updates() {
        let mut form = StaffForm::default();
        form.open();
        form.update(StaffFormField::Email("a@uni.edu".to_string()));
        form.update(StaffFormField::Password("pw".to_string()));
        form.update(StaffFormField::Role(Role::SuperAdmin));

        assert_eq!(
            form.to_create(),
            CreateStaff {
                email: "a@uni.edu".to_string(),
                password: "pw".to_string(),
                role: Role::SuperAdmin,
            }
        );
    }

    #[test]
    fn test_staff_form_reset_restores_defaults() {
        let mut form = StaffForm::default();
        form.open();
        assert_eq!(form.role, Role::Staff);
        form.update(StaffFormField::Role(Role::SuperAdmin));
        form.update(StaffFormField::Email("x@uni.edu".to_string()));

        form.reset();
        assert!(!form.is_open);
        assert!(form.email.is_empty());
        assert_eq!(form.role, Role::Staff);
    }

    #[test]
    fn test_staff_form_cancel_keeps_fields() {
        let mut form = StaffForm::default();
        form.open();
        form.update(StaffFormField::Email("draft@uni.edu".to_string()));
        form.close();
        form.open();
        assert_eq!(form.email, "draft@uni.edu");
    }

    #[test]
    fn test_export_uses_selection_when_present() {
        let mut state = StaffPanelState::new(mock::staff_records(), 5);
        state.set_filter("noah".to_string());
        assert_eq!(state.rows_for_export().len(), 1);

        let picked = [state.records[3].id.clone(), state.records[0].id.clone()];
        for id in &picked {
            state.table.on_select_row(id);
        }
        state.table.on_sort(crate::table::SortKey::Email);

        let rows = state.rows_for_export();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].email <= rows[1].email);
    }

    #[test]
    fn test_clamp_page_after_shrinking_results() {
        let mut state = StaffPanelState::new(mock::staff_records(), 5);
        state.table.on_change_page(4);
        state.filter_text = "amelia".to_string();

        state.clamp_page();
        assert_eq!(state.table.page(), 0);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = StaffPanelState::new(mock::staff_records(), 5);
        state.table.on_change_page(3);
        state.set_filter("noah".to_string());
        assert_eq!(state.table.page(), 0);
    }

    #[test]
    fn test_staff_screen_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.navigate(Screen::Staff);
        assert_eq!(app.screen, Screen::SignIn);
        assert!(app.staff.is_none());
    }

    #[test]
    fn test_login_success_opens_staff_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.sign_in.loading = true;

        app.tx.send(UiMessage::LoginFinished(Ok("jwt-1".to_string()))).unwrap();
        app.poll_async_results();

        assert!(!app.sign_in.loading);
        assert_eq!(app.session.token(), Some("jwt-1"));
        assert_eq!(app.screen, Screen::Staff);
        assert_eq!(app.staff.as_ref().map(|s| s.table.page()), Some(0));
    }

    #[test]
    fn test_login_failure_shows_alert_and_clears_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.sign_in.loading = true;

        app.tx.send(UiMessage::LoginFinished(Err("Login failed".to_string()))).unwrap();
        app.poll_async_results();

        assert!(!app.sign_in.loading);
        assert_eq!(app.error_message.as_deref(), Some("Login failed"));
        assert_eq!(app.screen, Screen::SignIn);
    }

    #[test]
    fn test_incomplete_otp_rejected_locally() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Screen::Otp);
        app.otp.as_mut().unwrap().input.paste("123");

        app.verify_otp();
        assert_eq!(app.error_message.as_deref(), Some("Please enter the complete 6-digit OTP"));
        assert!(!app.otp.as_ref().unwrap().loading);
    }

    #[test]
    fn test_resend_blocked_during_countdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Screen::Otp);

        app.resend_otp();
        assert!(!app.otp.as_ref().unwrap().loading);
    }

    #[test]
    fn test_leaving_otp_screen_drops_countdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Screen::Otp);
        assert!(app.otp.is_some());

        app.navigate(Screen::SignIn);
        assert!(app.otp.is_none());
    }

    #[test]
    fn test_otp_verified_after_leaving_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.navigate(Screen::Otp);
        app.navigate(Screen::SignIn);

        app.tx.send(UiMessage::OtpVerified(Ok("jwt-2".to_string()))).unwrap();
        app.poll_async_results();
        assert_eq!(app.screen, Screen::Staff);
    }

    #[test]
    fn test_sign_out_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.tx.send(UiMessage::LoginFinished(Ok("jwt-1".to_string()))).unwrap();
        app.poll_async_results();

        app.sign_out();
        assert!(!app.session.is_authenticated());
        assert_eq!(app.screen, Screen::SignIn);
        assert!(app.staff.is_none());
    }

    #[test]
    fn test_restored_session_starts_on_staff_list() {
        let dir = tempfile::tempdir().unwrap();
        TokenStore::new(dir.path().join("session.json"))
            .set(crate::session::TOKEN_KEY, "jwt-old")
            .unwrap();

        let app = test_app(&dir);
        assert_eq!(app.screen, Screen::Staff);
    }
}
