//! Portfolio content.
//!
//! The catalog is plain data: profile, skills, career and the production
//! showcase. It is read once from JSON (or the bundled sample) and never
//! mutated by the viewer.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Sample catalog shipped with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub profile: Profile,
    pub qualifications: Vec<Named>,
    pub activities: Vec<Activity>,
    pub hobbies: Vec<Named>,
    pub skills: Vec<Skill>,
    pub careers: Vec<Career>,
    pub production: Vec<ProductionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Activity {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Professional,
    Product,
    Hobby,
}

impl SkillCategory {
    pub const ALL: [Self; 3] = [Self::Professional, Self::Product, Self::Hobby];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Professional => "Professional experience",
            Self::Product => "Built products with",
            Self::Hobby => "Hobby",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Career {
    pub period: String,
    pub description: String,
}

/// One entry of the production showcase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductionItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub modal: Option<ModalContent>,
}

impl ProductionItem {
    /// Markdown pages shown after the overview page.
    pub fn pages(&self) -> &[MarkdownPage] {
        match &self.modal {
            Some(modal) => &modal.pages,
            None => &[],
        }
    }

    /// Image shown beside the modal pages.
    pub fn image(&self) -> Option<&str> {
        self.modal
            .as_ref()
            .and_then(|modal| modal.images.first())
            .or(self.thumbnail.as_ref())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModalContent {
    pub images: Vec<String>,
    pub pages: Vec<MarkdownPage>,
    pub demo_url: Option<String>,
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkdownPage {
    pub title: Option<String>,
    pub content: Vec<String>,
}

impl Catalog {
    /// Parse a catalog from JSON text. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON does not match the schema.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|source| CatalogError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Read`] if the file cannot be read and
    /// [`CatalogError::Parse`] if its contents are not a valid catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// The sample catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG, Path::new("<bundled>"))
    }

    pub fn item(&self, id: &str) -> Option<&ProductionItem> {
        self.production.iter().find(|item| item.id == id)
    }

    pub fn item_index(&self, id: &str) -> Option<usize> {
        self.production.iter().position(|item| item.id == id)
    }

    pub fn skills_in(&self, category: SkillCategory) -> impl Iterator<Item = &Skill> {
        self.skills
            .iter()
            .filter(move |skill| skill.category == category)
    }
}
