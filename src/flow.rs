//! Onboarding, authentication and settings flow signals.
//!
//! Flow screens only ever report "the user finished this step". Each signal
//! resolves to a single stack effect; onboarding and authentication steps
//! discard history, settings steps keep the path so back returns to the
//! screen the user came from.

use crate::state::Screen;
use serde::{Deserialize, Serialize};

/// Third-party identity providers offered on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialProvider {
    Google,
    Apple,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Apple => "apple",
        }
    }
}

/// A completed step reported by a flow screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowSignal {
    // ============ Onboarding ============
    GetStarted,
    SignIn,
    FeaturesContinue,
    PersonalizationContinue,
    CreateAccount,
    AlreadyHaveAccount,

    // ============ Account & login ============
    AccountCreated { email: String },
    SwitchToSignIn,
    LoginSuccess,
    ForgotPassword,
    LoginCreateAccount,
    SocialLogin(SocialProvider),
    BackToLogin,

    // ============ Verification & profile setup ============
    VerificationSuccess,
    VerificationSkip,
    ChangeEmail,
    /// Continue to the given 1-based setup step; past the last step goes home.
    ProfileSetupContinue(u8),
    ProfileSetupSkip,

    // ============ Settings ============
    ProfileSettingsOpen,
    AppPreferencesOpen,
    /// A row on the app preferences screen, by name.
    Preference(String),
    SupportOpen,
}

/// What a signal does to the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    /// Replace history with `[screen]`.
    Reset(Screen),
    /// Push `screen` on top of the current path.
    Push(Screen),
    /// Complete the login after the provider round-trip.
    DeferLogin(SocialProvider),
    /// Recognised signal with no screen behind it yet.
    Unsupported,
}

/// Settings screen behind an app preferences row.
pub fn preference_screen(name: &str) -> Option<Screen> {
    match name {
        "appearance" => Some(Screen::AppearanceSettings),
        "securityPrivacy" => Some(Screen::SecurityPrivacySettings),
        "notifications" => Some(Screen::NotificationsSettings),
        "integrations" => Some(Screen::IntegrationsSettings),
        _ => None,
    }
}

impl FlowSignal {
    pub fn effect(&self) -> FlowEffect {
        match self {
            FlowSignal::GetStarted => FlowEffect::Reset(Screen::FeaturesOverview),
            FlowSignal::FeaturesContinue => FlowEffect::Reset(Screen::PersonalizationPreview),
            FlowSignal::PersonalizationContinue => FlowEffect::Reset(Screen::PreSignup),

            FlowSignal::SignIn
            | FlowSignal::AlreadyHaveAccount
            | FlowSignal::SwitchToSignIn
            | FlowSignal::BackToLogin => FlowEffect::Reset(Screen::Login),

            FlowSignal::CreateAccount
            | FlowSignal::LoginCreateAccount
            | FlowSignal::ChangeEmail => FlowEffect::Reset(Screen::AccountCreation),

            FlowSignal::AccountCreated { .. } => FlowEffect::Reset(Screen::EmailVerification),
            FlowSignal::ForgotPassword => FlowEffect::Reset(Screen::ForgotPassword),
            FlowSignal::VerificationSuccess => FlowEffect::Reset(Screen::ProfileSetup1),

            FlowSignal::LoginSuccess
            | FlowSignal::VerificationSkip
            | FlowSignal::ProfileSetupSkip => FlowEffect::Reset(Screen::Home),

            FlowSignal::SocialLogin(provider) => FlowEffect::DeferLogin(*provider),

            FlowSignal::ProfileSetupContinue(0) => FlowEffect::Unsupported,
            FlowSignal::ProfileSetupContinue(step) => match Screen::profile_setup_step(*step) {
                Some(screen) => FlowEffect::Push(screen),
                None => FlowEffect::Reset(Screen::Home),
            },

            FlowSignal::ProfileSettingsOpen => FlowEffect::Push(Screen::ProfileSettings),
            FlowSignal::AppPreferencesOpen => FlowEffect::Push(Screen::AppPreferences),
            FlowSignal::Preference(name) => preference_screen(name)
                .map(FlowEffect::Push)
                .unwrap_or(FlowEffect::Unsupported),
            FlowSignal::SupportOpen => FlowEffect::Push(Screen::Support),
        }
    }

    /// Parse a kebab-case signal name with its optional argument.
    pub fn parse(name: &str, arg: Option<&str>) -> Option<Self> {
        let signal = match (name, arg) {
            ("get-started", None) => FlowSignal::GetStarted,
            ("sign-in", None) => FlowSignal::SignIn,
            ("features-continue", None) => FlowSignal::FeaturesContinue,
            ("personalization-continue", None) => FlowSignal::PersonalizationContinue,
            ("create-account", None) => FlowSignal::CreateAccount,
            ("already-have-account", None) => FlowSignal::AlreadyHaveAccount,
            ("account-created", Some(email)) => FlowSignal::AccountCreated {
                email: email.to_string(),
            },
            ("switch-to-sign-in", None) => FlowSignal::SwitchToSignIn,
            ("login-success", None) => FlowSignal::LoginSuccess,
            ("forgot-password", None) => FlowSignal::ForgotPassword,
            ("login-create-account", None) => FlowSignal::LoginCreateAccount,
            ("social-login", Some("google")) => FlowSignal::SocialLogin(SocialProvider::Google),
            ("social-login", Some("apple")) => FlowSignal::SocialLogin(SocialProvider::Apple),
            ("back-to-login", None) => FlowSignal::BackToLogin,
            ("verification-success", None) => FlowSignal::VerificationSuccess,
            ("verification-skip", None) => FlowSignal::VerificationSkip,
            ("change-email", None) => FlowSignal::ChangeEmail,
            ("profile-setup-continue", Some(step)) => {
                FlowSignal::ProfileSetupContinue(step.parse().ok()?)
            }
            ("profile-setup-skip", None) => FlowSignal::ProfileSetupSkip,
            ("profile-settings", None) => FlowSignal::ProfileSettingsOpen,
            ("app-preferences", None) => FlowSignal::AppPreferencesOpen,
            ("preference", Some(name)) => FlowSignal::Preference(name.to_string()),
            ("support", None) => FlowSignal::SupportOpen,
            _ => return None,
        };
        Some(signal)
    }
}
