//! Settings shared by the simulated chat and call sessions.

use serde::{Deserialize, Serialize};

/// Deployment the agent under test is pulled from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    Draft,
    #[default]
    Sandbox,
    PreRelease,
    Live,
}

impl Environment {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sandbox => "Sandbox",
            Self::PreRelease => "Pre-Release",
            Self::Live => "Live",
        }
    }
}

/// Input device selection for call sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Microphone {
    #[default]
    Default,
    Builtin,
    External,
}

impl Microphone {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default Microphone",
            Self::Builtin => "Built-in Microphone",
            Self::External => "External Microphone",
        }
    }
}

/// Agent configuration variant under test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    Default,
    VariantA,
    VariantB,
}

impl Variant {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::VariantA => "Variant A",
            Self::VariantB => "Variant B",
        }
    }
}

/// Partial settings update for a chat session. Absent fields are left as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatSettings {
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub variant: Option<Variant>,
}

impl ChatSettings {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environment.is_none() && self.variant.is_none()
    }
}

/// Partial settings update for a call session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallSettings {
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub variant: Option<Variant>,
    #[serde(default)]
    pub microphone: Option<Microphone>,
}

impl CallSettings {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environment.is_none() && self.variant.is_none() && self.microphone.is_none()
    }
}

/// Render a duration in whole seconds as `MM:SS`. Minutes are not capped.
#[must_use]
pub fn format_duration(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
