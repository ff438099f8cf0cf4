use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// Marketplace role stored on `profiles.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Artist,
    Venue,
    Booker,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Artist => "artist",
            Role::Venue => "venue",
            Role::Booker => "booker",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(Role::Artist),
            "venue" => Some(Role::Venue),
            "booker" => Some(Role::Booker),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Landing page after sign-in. Roles without a dashboard go home.
    pub fn dashboard_path(role: Option<Role>) -> &'static str {
        match role {
            Some(Role::Artist) => "/artist/dashboard",
            Some(Role::Venue) => "/venue/dashboard",
            Some(Role::Admin) => "/admin/dashboard",
            Some(Role::Booker) | None => "/",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub role: Option<String>,
    pub artist_data: Option<Value>,
    pub venue_data: Option<Value>,
}

impl Profile {
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Semi-structured JSON columns on `profiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileDataColumn {
    ArtistData,
    VenueData,
}

impl ProfileDataColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            ProfileDataColumn::ArtistData => "artist_data",
            ProfileDataColumn::VenueData => "venue_data",
        }
    }
}

/// One merge against a profile JSON column. `defaults` fills keys the
/// stored object lacks, `patch` overwrites whatever is stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDataPatch {
    pub defaults: Map<String, Value>,
    pub patch: Map<String, Value>,
}

impl ProfileDataPatch {
    /// Apply to a stored value, the same way the SQL `||` chain does.
    pub fn apply(&self, stored: Option<&Value>) -> Map<String, Value> {
        let mut merged = self.defaults.clone();
        if let Some(Value::Object(existing)) = stored {
            merged.extend(existing.clone());
        }
        merged.extend(self.patch.clone());
        merged
    }
}
