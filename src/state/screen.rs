//! Screen catalog.
//!
//! The closed set of full-view screens the controller can show, plus the
//! static classification rules the rendering layer uses for layout. The
//! classifications are kept as two independent lists: a screen being a tab
//! destination says nothing about whether it renders full-width.

use crate::error::NavError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    // ============ Onboarding ============
    Welcome,
    FeaturesOverview,
    PersonalizationPreview,
    PreSignup,

    // ============ Authentication ============
    AccountCreation,
    Login,
    ForgotPassword,
    EmailVerification,
    ProfileSetup1,
    ProfileSetup2,
    ProfileSetup3,
    ProfileSetup4,

    // ============ Main tabs ============
    Home,
    Calendar,
    Insights,
    Profile,

    // ============ Settings ============
    ProfileSettings,
    AppPreferences,
    AppearanceSettings,
    SecurityPrivacySettings,
    NotificationsSettings,
    IntegrationsSettings,
    Support,

    // ============ Day & item views ============
    FullDay,
    ItemDetail,
    DailyView,
}

impl Screen {
    /// Every screen, in catalog order.
    pub const ALL: [Screen; 26] = [
        Screen::Welcome,
        Screen::FeaturesOverview,
        Screen::PersonalizationPreview,
        Screen::PreSignup,
        Screen::AccountCreation,
        Screen::Login,
        Screen::ForgotPassword,
        Screen::EmailVerification,
        Screen::ProfileSetup1,
        Screen::ProfileSetup2,
        Screen::ProfileSetup3,
        Screen::ProfileSetup4,
        Screen::Home,
        Screen::Calendar,
        Screen::Insights,
        Screen::Profile,
        Screen::ProfileSettings,
        Screen::AppPreferences,
        Screen::AppearanceSettings,
        Screen::SecurityPrivacySettings,
        Screen::NotificationsSettings,
        Screen::IntegrationsSettings,
        Screen::Support,
        Screen::FullDay,
        Screen::ItemDetail,
        Screen::DailyView,
    ];

    /// Tab destinations reachable from the bottom navigation.
    const MAIN: [Screen; 4] = [Screen::Home, Screen::Calendar, Screen::Insights, Screen::Profile];

    /// Screens that render edge to edge without the background grid.
    const FULL_WIDTH: [Screen; 25] = [
        Screen::Welcome,
        Screen::FeaturesOverview,
        Screen::PersonalizationPreview,
        Screen::PreSignup,
        Screen::AccountCreation,
        Screen::Login,
        Screen::ForgotPassword,
        Screen::EmailVerification,
        Screen::ProfileSetup1,
        Screen::ProfileSetup2,
        Screen::ProfileSetup3,
        Screen::ProfileSetup4,
        Screen::Home,
        Screen::Calendar,
        Screen::Insights,
        Screen::Profile,
        Screen::ItemDetail,
        Screen::ProfileSettings,
        Screen::AppPreferences,
        Screen::AppearanceSettings,
        Screen::SecurityPrivacySettings,
        Screen::NotificationsSettings,
        Screen::IntegrationsSettings,
        Screen::Support,
        Screen::DailyView,
    ];

    /// Whether selecting this screen resets history (bottom tab destination).
    pub fn is_main(&self) -> bool {
        Self::MAIN.contains(self)
    }

    /// Whether this screen renders full-width (no constrained column, no grid).
    pub fn is_full_width(&self) -> bool {
        Self::FULL_WIDTH.contains(self)
    }

    /// Stable camelCase identifier, as used by collaborators and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::FeaturesOverview => "featuresOverview",
            Screen::PersonalizationPreview => "personalizationPreview",
            Screen::PreSignup => "preSignup",
            Screen::AccountCreation => "accountCreation",
            Screen::Login => "login",
            Screen::ForgotPassword => "forgotPassword",
            Screen::EmailVerification => "emailVerification",
            Screen::ProfileSetup1 => "profileSetup1",
            Screen::ProfileSetup2 => "profileSetup2",
            Screen::ProfileSetup3 => "profileSetup3",
            Screen::ProfileSetup4 => "profileSetup4",
            Screen::Home => "home",
            Screen::Calendar => "calendar",
            Screen::Insights => "insights",
            Screen::Profile => "profile",
            Screen::ProfileSettings => "profileSettings",
            Screen::AppPreferences => "appPreferences",
            Screen::AppearanceSettings => "appearanceSettings",
            Screen::SecurityPrivacySettings => "securityPrivacySettings",
            Screen::NotificationsSettings => "notificationsSettings",
            Screen::IntegrationsSettings => "integrationsSettings",
            Screen::Support => "support",
            Screen::FullDay => "fullDay",
            Screen::ItemDetail => "itemDetail",
            Screen::DailyView => "dailyView",
        }
    }

    /// Get screen category for grouping in listings
    pub fn category(&self) -> &'static str {
        match self {
            Screen::Welcome
            | Screen::FeaturesOverview
            | Screen::PersonalizationPreview
            | Screen::PreSignup => "Onboarding",

            Screen::AccountCreation
            | Screen::Login
            | Screen::ForgotPassword
            | Screen::EmailVerification
            | Screen::ProfileSetup1
            | Screen::ProfileSetup2
            | Screen::ProfileSetup3
            | Screen::ProfileSetup4 => "Authentication",

            Screen::Home | Screen::Calendar | Screen::Insights | Screen::Profile => "Tabs",

            Screen::ProfileSettings
            | Screen::AppPreferences
            | Screen::AppearanceSettings
            | Screen::SecurityPrivacySettings
            | Screen::NotificationsSettings
            | Screen::IntegrationsSettings
            | Screen::Support => "Settings",

            Screen::FullDay | Screen::ItemDetail | Screen::DailyView => "Day",
        }
    }

    /// Profile setup screen for a 1-based step, if the step exists.
    pub fn profile_setup_step(step: u8) -> Option<Screen> {
        match step {
            1 => Some(Screen::ProfileSetup1),
            2 => Some(Screen::ProfileSetup2),
            3 => Some(Screen::ProfileSetup3),
            4 => Some(Screen::ProfileSetup4),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| NavError::UnknownScreen(s.to_string()))
    }
}
