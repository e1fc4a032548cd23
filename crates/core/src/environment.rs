//! Deployment environment resolution.
//!
//! Maps an environment indicator (usually the `APP_ENV` variable) to the
//! table that backs the catalog and the badge/feature profile shown by the
//! front end. Resolution never fails: unrecognised indicators fall back to
//! the development profile.

use serde::Serialize;

/// Base name shared by every catalog table.
pub const TABLE_BASE: &str = "libros";

/// A deployment context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Feature flags toggled per environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub debug: bool,
    pub analytics: bool,
    pub email_notifications: bool,
    pub auto_backup: bool,
}

/// Display and storage profile derived from an [`Environment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentProfile {
    pub environment: &'static str,
    pub name: &'static str,
    pub badge_color: &'static str,
    pub badge_text: &'static str,
    pub table_prefix: &'static str,
    pub table_name: String,
    pub features: FeatureFlags,
}

impl Environment {
    /// Every known environment, in promotion order.
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    /// Resolve an environment indicator.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// `prod` and `dev` are accepted as short forms.
    ///
    /// ```
    /// use biblioteca_core::environment::Environment;
    ///
    /// assert_eq!(Environment::resolve("production"), Environment::Production);
    /// assert_eq!(Environment::resolve(" Staging "), Environment::Staging);
    /// assert_eq!(Environment::resolve("qa"), Environment::Development);
    /// ```
    pub fn resolve(indicator: &str) -> Self {
        Self::parse(indicator).unwrap_or(Self::Development)
    }

    /// Strict form of [`Environment::resolve`]: `None` for unknown indicators.
    pub fn parse(indicator: &str) -> Option<Self> {
        match indicator.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }

    /// Canonical name, as reported by `/api/environment`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Short segment identifying the environment-scoped table.
    pub fn table_prefix(self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Staging => "staging",
            Self::Production => "prod",
        }
    }

    /// Name of the table holding this environment's catalog.
    ///
    /// Convention: `libros_{prefix}`.
    pub fn table_name(self) -> String {
        format!("{TABLE_BASE}_{}", self.table_prefix())
    }

    pub fn features(self) -> FeatureFlags {
        match self {
            Self::Development => FeatureFlags {
                debug: true,
                analytics: false,
                email_notifications: false,
                auto_backup: false,
            },
            Self::Staging => FeatureFlags {
                debug: true,
                analytics: true,
                email_notifications: false,
                auto_backup: true,
            },
            Self::Production => FeatureFlags {
                debug: false,
                analytics: true,
                email_notifications: true,
                auto_backup: true,
            },
        }
    }

    /// Build the full display and storage profile.
    pub fn profile(self) -> EnvironmentProfile {
        let (name, badge_color, badge_text) = match self {
            Self::Development => ("Desarrollo", "#FFA500", "DEV"),
            Self::Staging => ("Staging", "#FFD700", "STAGING"),
            Self::Production => ("Producción", "#28A745", "PROD"),
        };

        EnvironmentProfile {
            environment: self.key(),
            name,
            badge_color,
            badge_text,
            table_prefix: self.table_prefix(),
            table_name: self.table_name(),
            features: self.features(),
        }
    }
}
