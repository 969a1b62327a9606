use serde::{Deserialize, Serialize};

/// Authorization role gating which pages and actions a user sees.
///
/// - `Owner`: approves bills, issues shift OTPs, manages people.
/// - `Employee`: works shifts, files bills, proposes campaigns.
/// - `Guest`: never provisioned by login today; sees nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Owner,
    #[default]
    Employee,
    Guest,
}

impl UserRole {
    pub fn is_owner(&self) -> bool {
        matches!(self, UserRole::Owner)
    }

    /// Parse a role label. Unknown values default to Employee.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "owner" => UserRole::Owner,
            "guest" => UserRole::Guest,
            _ => UserRole::Employee,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Owner => "owner",
            UserRole::Employee => "employee",
            UserRole::Guest => "guest",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Disabled,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Disabled,
            UserStatus::Disabled => UserStatus::Active,
        }
    }
}

/// Display language for UI labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ta => "TA",
        }
    }
}

/// A person in the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub avatar: String,
    pub designation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// First letter of the display name, upper-cased, for avatar fallbacks.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Avatar URL seeded by an arbitrary string (email or email prefix).
pub fn avatar_for(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/200")
}

/// Display name derived from an email prefix: `jane.doe_x` becomes
/// `Jane Doe X`. Falls back to `New User` when nothing usable remains.
pub fn display_name_from_email(email: &str) -> String {
    let prefix = email.split('@').next().unwrap_or_default();
    let words: Vec<String> = prefix
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        "New User".to_string()
    } else {
        words.join(" ")
    }
}
