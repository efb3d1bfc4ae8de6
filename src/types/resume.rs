// src/types/resume.rs
//! Résumé records: a named rendering of one profile through one template.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::slugify;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Relaxed,
}

/// Per-résumé palette and typography overrides. Absent fields keep the
/// template defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customizations {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<FontSize>,
    pub spacing: Option<Spacing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub profile_id: Option<String>,
    pub template_id: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub customizations: Customizations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    pub fn new(name: &str, profile_id: Option<String>, template_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            profile_id,
            template_id: template_id.to_string(),
            visibility: Visibility::Private,
            customizations: Customizations::default(),
            short_link: None,
            slug: None,
            view_count: 0,
            download_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_customizations(mut self, customizations: Customizations) -> Self {
        self.customizations = customizations;
        self
    }

    /// Independent copy bound to the same profile and template. Sharing state and
    /// counters are not carried over.
    pub fn duplicate(&self, name: Option<&str>) -> Self {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => format!("{} (Copy)", self.name),
        };

        Self::new(&name, self.profile_id.clone(), &self.template_id)
            .with_customizations(self.customizations.clone())
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.touch();
    }

    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
        self.touch();
    }

    pub fn record_download(&mut self) {
        self.download_count = self.download_count.saturating_add(1);
        self.touch();
    }

    /// Assign a slug derived from the name and the id, keeping any existing one.
    pub fn assign_slug(&mut self) -> &str {
        if self.slug.is_none() {
            let simple = self.id.simple().to_string();
            let base = slugify(&self.name);
            let slug = if base.is_empty() {
                simple[..8].to_string()
            } else {
                format!("{}-{}", base, &simple[..8])
            };
            self.slug = Some(slug);
            self.touch();
        }
        self.slug.as_deref().unwrap_or_default()
    }

    /// Public share path, only for public résumés that have a slug.
    pub fn share_path(&self) -> Option<String> {
        match (&self.visibility, &self.slug) {
            (Visibility::Public, Some(slug)) => Some(format!("/r/{}", slug)),
            _ => None,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
