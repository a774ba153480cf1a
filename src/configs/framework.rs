use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Optional subsystems an application can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    ActiveRecord,
    ActionController,
    ActionView,
    ActionMailer,
    ActiveResource,
    ActionWebService,
}

impl Framework {
    pub const ALL: [Framework; 6] = [
        Framework::ActiveRecord,
        Framework::ActionController,
        Framework::ActionView,
        Framework::ActionMailer,
        Framework::ActiveResource,
        Framework::ActionWebService,
    ];

    /// Frameworks whose library directory is named after the framework itself,
    /// in the order their paths are derived.
    pub const STANDALONE_LIBRARIES: [Framework; 4] = [
        Framework::ActiveRecord,
        Framework::ActionMailer,
        Framework::ActiveResource,
        Framework::ActionWebService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::ActiveRecord => "active_record",
            Framework::ActionController => "action_controller",
            Framework::ActionView => "action_view",
            Framework::ActionMailer => "action_mailer",
            Framework::ActiveResource => "active_resource",
            Framework::ActionWebService => "action_web_service",
        }
    }

    /// Library directory relative to the framework root.
    ///
    /// Controller and view share `actionpack/lib`; the others strip the
    /// underscores from their name: `active_record` → `activerecord/lib`.
    pub fn library_dir(&self) -> String {
        match self {
            Framework::ActionController | Framework::ActionView => "actionpack/lib".to_string(),
            other => format!("{}/lib", other.as_str().replace('_', "")),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|framework| framework.as_str() == identifier)
            .ok_or_else(|| identifier.to_string())
    }
}
