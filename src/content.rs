//! Portfolio content tables and the trimmed snapshot that is handed to the
//! assistant as its only source of truth.

use crate::types::Locale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUNDLED_CONTENT_ES: &str = include_str!("../assets/content.es.json");
const BUNDLED_CONTENT_EN: &str = include_str!("../assets/content.en.json");

/// Points the UI at a JSON content file instead of the bundled demo.
pub const CONTENT_PATH_VAR: &str = "PORTFOLIO_CONTENT_PATH";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub name: String,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub availability: String,
    pub summary: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectMedia {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub role: String,
    pub period: String,
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_readme: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<ProjectMedia>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Work,
    Education,
    Certification,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    pub title: String,
    pub organization: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub program: String,
    pub period: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub availability_note: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProjectSource {
    pub description: String,
    pub bucket_path: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSources {
    pub projects_from_firebase: ExternalProjectSource,
}

/// Everything the site shows, for one locale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    pub personal: Personal,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub contact: Contact,
    #[serde(default)]
    pub socials: Socials,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_sources: Option<ExternalSources>,
}

/// Project fields the assistant may see. Media and README plumbing stay out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSummary<'a> {
    title: &'a str,
    role: &'a str,
    period: &'a str,
    summary: &'a str,
    highlights: &'a [String],
    stack: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    code_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    live_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
}

impl<'a> From<&'a Project> for ProjectSummary<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            title: &project.title,
            role: &project.role,
            period: &project.period,
            summary: &project.summary,
            highlights: &project.highlights,
            stack: &project.stack,
            code_url: project.code_url.as_deref(),
            live_url: project.live_url.as_deref(),
            status: project.status.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct PortfolioSnapshot<'a> {
    personal: &'a Personal,
    skills: &'a [SkillCategory],
    projects: Vec<ProjectSummary<'a>>,
    achievements: &'a [Achievement],
    experience: &'a [Experience],
    education: &'a [Education],
    certifications: &'a [Certification],
    timeline: &'a [TimelineItem],
    articles: &'a [Article],
    contact: &'a Contact,
    socials: &'a Socials,
}

impl PortfolioContent {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Demo content compiled into the binary.
    pub fn bundled(locale: Locale) -> serde_json::Result<Self> {
        match locale {
            Locale::Es => Self::from_json(BUNDLED_CONTENT_ES),
            Locale::En => Self::from_json(BUNDLED_CONTENT_EN),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read portfolio content {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("invalid portfolio content in {}", path.display()))
    }

    /// The file named by [`CONTENT_PATH_VAR`] when set, bundled content otherwise.
    pub fn resolve(locale: Locale) -> Result<Self> {
        match std::env::var(CONTENT_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::bundled(locale)?),
        }
    }

    /// Serializes the prompt snapshot (compact JSON, fixed field order).
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        let snapshot = PortfolioSnapshot {
            personal: &self.personal,
            skills: &self.skills,
            projects: self.projects.iter().map(ProjectSummary::from).collect(),
            achievements: &self.achievements,
            experience: &self.experience,
            education: &self.education,
            certifications: &self.certifications,
            timeline: &self.timeline,
            articles: &self.articles,
            contact: &self.contact,
            socials: &self.socials,
        };
        serde_json::to_string(&snapshot)
    }
}
