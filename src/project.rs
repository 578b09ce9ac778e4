//! Project records and the view model rendered on the detail page.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::config::SiteConfig;
use crate::error::LoadError;

/// Info label holding the display name of a project.
pub const NAME_FIELD: &str = "Project Name";
/// Images needed to fill the main layout (one large, two small).
pub const IMAGE_SLOTS: usize = 3;
pub const WEBSITE_SCHEME: &str = "https://";
pub const REPOSITORY_LABEL: &str = "View Repository";

/// Label/value pairs in the order the data file lists them.
///
/// Non-string JSON values are stringified; `null` becomes an empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoFields(Vec<(String, String)>);

impl InfoFields {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

impl<'de> Deserialize<'de> for InfoFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = InfoFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of info fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    fields.push((label, value));
                }
                Ok(InfoFields(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub brief: Vec<String>,
    #[serde(default)]
    pub info: InfoFields,
}

impl ProjectRecord {
    /// Display name, falling back to the identifier.
    pub fn name(&self) -> &str {
        match self.info.get(NAME_FIELD) {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }

    /// The three positional image slots, or `None` when the record declares
    /// fewer than three images. Extra images are ignored.
    pub fn image_slots(&self) -> Option<[&str; IMAGE_SLOTS]> {
        match self.images.as_slice() {
            [main, side_1, side_2, ..] => Some([main.as_str(), side_1.as_str(), side_2.as_str()]),
            _ => None,
        }
    }

    /// Info rows to render, in data order, skipping blank values.
    pub fn info_rows(&self) -> Vec<InfoRow> {
        self.info
            .iter()
            .filter_map(|(label, value)| InfoRow::classify(label, value))
            .collect()
    }
}

/// One rendered row of the info table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoRow {
    /// External link to `https://<value>`, showing the value.
    Website {
        label: String,
        value: String,
        href: String,
    },
    /// Link to the repository URL, labelled [`REPOSITORY_LABEL`].
    Repository { label: String, href: String },
    Plain { label: String, value: String },
}

impl InfoRow {
    /// `None` when the value is empty or whitespace only.
    pub fn classify(label: &str, value: &str) -> Option<InfoRow> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let label = label.to_string();
        let row = match label.to_lowercase().as_str() {
            "website" => InfoRow::Website {
                href: format!("{WEBSITE_SCHEME}{value}"),
                value: value.to_string(),
                label,
            },
            "github" => InfoRow::Repository {
                href: value.to_string(),
                label,
            },
            _ => InfoRow::Plain {
                value: value.to_string(),
                label,
            },
        };
        Some(row)
    }

    pub fn label(&self) -> &str {
        match self {
            InfoRow::Website { label, .. }
            | InfoRow::Repository { label, .. }
            | InfoRow::Plain { label, .. } => label,
        }
    }
}

/// Previous/next neighbor link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub name: String,
}

/// Everything the detail page shows for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPage {
    pub title: String,
    pub name: String,
    pub images: Option<[String; IMAGE_SLOTS]>,
    pub brief: Vec<String>,
    pub rows: Vec<InfoRow>,
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// The full project collection, in listing order.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<ProjectRecord>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self { projects }
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// Build the detail view for `id`, with neighbors in collection order.
    /// There is no wraparound at either end.
    pub fn page(&self, id: &str, config: &SiteConfig) -> Result<ProjectPage, LoadError> {
        let index = self
            .position(id)
            .ok_or_else(|| LoadError::NotFound(id.to_string()))?;
        let record = &self.projects[index];
        let nav = |p: &ProjectRecord| NavLink {
            href: config.detail_href(&p.id),
            name: p.name().to_string(),
        };
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.projects.get(i))
            .map(nav);
        let next = self.projects.get(index + 1).map(nav);

        let name = record.name().to_string();
        Ok(ProjectPage {
            title: config.page_title(&name),
            images: record
                .image_slots()
                .map(|slots| slots.map(str::to_string)),
            brief: record.brief.clone(),
            rows: record.info_rows(),
            name,
            prev,
            next,
        })
    }

    /// Data problems worth flagging before publishing. Never fatal for the
    /// page itself.
    pub fn audit(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut findings = Vec::new();
        for p in &self.projects {
            if !seen.insert(p.id.as_str()) {
                findings.push(format!("duplicate id `{}`", p.id));
            }
            if p.image_slots().is_none() {
                findings.push(format!(
                    "`{}` has {} image(s); the layout needs {IMAGE_SLOTS}",
                    p.id,
                    p.images.len()
                ));
            }
            if p.info.get(NAME_FIELD).map_or(true, |n| n.trim().is_empty()) {
                findings.push(format!("`{}` has no \"{NAME_FIELD}\"", p.id));
            }
        }
        findings
    }
}

/// A usable identifier from the query string. Absent and empty both count
/// as missing.
pub fn require_id(raw: Option<String>) -> Result<String, LoadError> {
    match raw {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(LoadError::MissingId),
    }
}

/// Resolve the detail view from a fetch result and the requested id.
///
/// Any failure along the way, whatever its cause, is returned as-is for the
/// caller to render as not found.
pub fn resolve_page(
    id: Option<String>,
    fetched: Result<String, LoadError>,
    config: &SiteConfig,
) -> Result<ProjectPage, LoadError> {
    let id = require_id(id)?;
    let catalog = ProjectCatalog::from_json(&fetched?)?;
    catalog.page(&id, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {
            "id": "orbit",
            "images": ["a.jpg", "b.jpg", "c.jpg"],
            "brief": ["First.", "Second."],
            "info": {
                "Project Name": "Orbit",
                "Year": 2023,
                "Website": "example.com",
                "GitHub": "https://github.com/x/orbit",
                "Client": "   ",
                "Role": null,
                "Stack": "Rust"
            }
        },
        {
            "id": "tide",
            "images": ["t.jpg"],
            "brief": [],
            "info": { "Project Name": "Tide" }
        },
        {
            "id": "ember",
            "images": ["1.jpg", "2.jpg", "3.jpg", "4.jpg"],
            "info": {}
        }
    ]"#;

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::from_json(DATA).unwrap()
    }

    #[test]
    fn info_keeps_data_order_and_skips_blank_values() {
        let catalog = catalog();
        let orbit = &catalog.projects()[0];
        let labels: Vec<_> = orbit.info_rows().iter().map(|r| r.label().to_string()).collect();
        assert_eq!(labels, ["Project Name", "Year", "Website", "GitHub", "Stack"]);
    }

    #[test]
    fn website_and_github_get_links() {
        assert_eq!(
            InfoRow::classify("Website", "example.com"),
            Some(InfoRow::Website {
                label: "Website".into(),
                value: "example.com".into(),
                href: "https://example.com".into(),
            })
        );
        assert_eq!(
            InfoRow::classify("github", "https://github.com/x/y"),
            Some(InfoRow::Repository {
                label: "github".into(),
                href: "https://github.com/x/y".into(),
            })
        );
        assert_eq!(InfoRow::classify("Website", ""), None);
        assert!(matches!(
            InfoRow::classify("Year", "2023"),
            Some(InfoRow::Plain { .. })
        ));
    }

    #[test]
    fn neighbors_stop_at_the_ends() {
        let cfg = SiteConfig::default();
        let cat = catalog();

        let first = cat.page("orbit", &cfg).unwrap();
        assert!(first.prev.is_none());
        assert_eq!(first.next.as_ref().unwrap().href, "project.html?id=tide");

        let last = cat.page("ember", &cfg).unwrap();
        assert!(last.next.is_none());
        assert_eq!(last.prev.as_ref().unwrap().name, "Tide");

        let mid = cat.page("tide", &cfg).unwrap();
        assert_eq!(mid.prev.unwrap().name, "Orbit");
        // no name field: falls back to the id
        assert_eq!(mid.next.unwrap().name, "ember");
    }

    #[test]
    fn images_bind_only_with_three_or_more() {
        let cfg = SiteConfig::default();
        let cat = catalog();
        let orbit = cat.page("orbit", &cfg).unwrap();
        assert_eq!(
            orbit.images,
            Some(["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()])
        );
        assert_eq!(orbit.title, "Orbit | Jun");
        assert_eq!(orbit.brief.len(), 2);
        assert!(cat.page("tide", &cfg).unwrap().images.is_none());
        assert_eq!(cat.page("ember", &cfg).unwrap().images.unwrap()[2], "3.jpg");
    }

    #[test]
    fn every_failure_resolves_to_an_error() {
        let cfg = SiteConfig::default();
        let ok = || Ok(DATA.to_string());

        assert!(matches!(resolve_page(None, ok(), &cfg), Err(LoadError::MissingId)));
        assert!(matches!(
            resolve_page(Some(String::new()), ok(), &cfg),
            Err(LoadError::MissingId)
        ));
        assert!(matches!(
            resolve_page(Some("nope".into()), ok(), &cfg),
            Err(LoadError::NotFound(_))
        ));
        assert!(matches!(
            resolve_page(Some("orbit".into()), Ok("{ broken".into()), &cfg),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            resolve_page(Some("orbit".into()), Err(LoadError::Status(500)), &cfg),
            Err(LoadError::Status(500))
        ));
        assert!(resolve_page(Some("orbit".into()), ok(), &cfg).is_ok());
    }

    #[test]
    fn audit_flags_thin_records() {
        let findings = catalog().audit();
        assert_eq!(findings.len(), 2);
        assert!(findings[0].contains("tide"));
        assert!(findings[1].contains("ember"));

        let dup = ProjectCatalog::from_json(
            r#"[{"id":"a","images":["1","2","3"],"info":{"Project Name":"A"}},
                {"id":"a","images":["1","2","3"],"info":{"Project Name":"B"}}]"#,
        )
        .unwrap();
        assert_eq!(dup.audit(), vec!["duplicate id `a`".to_string()]);
    }
}
