//! Prompt framework catalog: section definitions, their canonical order per
//! framework, default-enabled flags and helper text.
//!
//! A [`Registry`] is an immutable value. Build it once (usually with
//! [`Registry::builtin`]) and pass it by reference to whatever needs it.

mod builtin;
pub mod label;

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use label::{format_checklist_label, normalize_label, removal_prompt};

/// Catalog wire format version understood by [`Registry::from_catalog`].
pub const CATALOG_V: u8 = 1;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a section, e.g. `output_format`.
    SectionKey
);
string_id!(
    /// Stable identifier of a framework, e.g. `basic`.
    FrameworkId
);
string_id!(
    /// External injection target, e.g. `CONTEXT`.
    InjectTarget
);

impl InjectTarget {
    pub const ROLE: &'static str = "ROLE";
    pub const CONTEXT: &'static str = "CONTEXT";
    pub const CONSTRAINTS: &'static str = "CONSTRAINTS";
}

/// One section as declared by a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDefinition {
    pub section_key: SectionKey,
    /// Display label, e.g. `OUTPUT FORMAT`.
    pub label: String,
    #[serde(default)]
    pub helper: String,
    #[serde(default)]
    pub default_enabled: bool,
}

/// A named, ordered set of sections meant to be used together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    pub id: FrameworkId,
    /// Display name, e.g. `Developer`.
    pub label: String,
    pub sections: Vec<SectionDefinition>,
}

impl Framework {
    pub fn section(&self, key: &SectionKey) -> Option<&SectionDefinition> {
        self.sections.iter().find(|s| &s.section_key == key)
    }

    /// Membership test by normalized display label.
    pub fn section_by_label(&self, normalized_label: &str) -> Option<&SectionDefinition> {
        self.sections
            .iter()
            .find(|s| normalize_label(&s.label) == normalized_label)
    }

    pub fn section_keys(&self) -> impl Iterator<Item = &SectionKey> {
        self.sections.iter().map(|s| &s.section_key)
    }
}

/// A label the line parser can recognize, deduplicated across frameworks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDefinition {
    pub section_key: SectionKey,
    pub label: String,
    pub helper: String,
    pub normalized_label: String,
}

/// Two labels where the shorter one is a prefix of the longer one.
///
/// Longest-first matching keeps these unambiguous, but catalog authors should
/// know about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixOverlap {
    pub shorter: String,
    pub longer: String,
}

/// Serializable catalog shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: u8,
    pub frameworks: Vec<Framework>,
    #[serde(default)]
    pub inject_targets: BTreeMap<InjectTarget, SectionKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unsupported catalog version {0}")]
    UnsupportedVersion(u8),
    #[error("catalog declares no frameworks")]
    NoFrameworks,
    #[error("framework id must not be empty")]
    EmptyFrameworkId,
    #[error("duplicate framework id '{0}'")]
    DuplicateFramework(FrameworkId),
    #[error("framework '{framework}' declares section '{section_key}' more than once")]
    DuplicateSectionKey {
        framework: FrameworkId,
        section_key: SectionKey,
    },
    #[error("framework '{framework}' section '{section_key}' has an empty label")]
    EmptyLabel {
        framework: FrameworkId,
        section_key: SectionKey,
    },
    #[error("framework '{framework}' label '{label}' must not contain ':'")]
    LabelContainsColon { framework: FrameworkId, label: String },
    #[error("framework '{framework}' uses label '{label}' for more than one section")]
    DuplicateLabel { framework: FrameworkId, label: String },
}

/// The catalog of known frameworks and labels.
#[derive(Debug, Clone)]
pub struct Registry {
    frameworks: Vec<Framework>,
    inject_targets: BTreeMap<InjectTarget, SectionKey>,
    line_definitions: Vec<LineDefinition>,
    by_length: Vec<usize>,
}

impl Registry {
    /// The built-in catalog: Basic, Standard, Advanced, Developer, Workflow.
    pub fn builtin() -> Self {
        Self::build(builtin::frameworks(), builtin::inject_targets())
    }

    /// Build a registry from custom frameworks after validating them.
    pub fn new(
        frameworks: Vec<Framework>,
        inject_targets: BTreeMap<InjectTarget, SectionKey>,
    ) -> Result<Self, CatalogError> {
        validate_frameworks(&frameworks)?;
        Ok(Self::build(frameworks, inject_targets))
    }

    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        if catalog.version != CATALOG_V {
            return Err(CatalogError::UnsupportedVersion(catalog.version));
        }
        Self::new(catalog.frameworks, catalog.inject_targets)
    }

    pub fn to_catalog(&self) -> Catalog {
        Catalog {
            version: CATALOG_V,
            frameworks: self.frameworks.clone(),
            inject_targets: self.inject_targets.clone(),
        }
    }

    fn build(
        frameworks: Vec<Framework>,
        inject_targets: BTreeMap<InjectTarget, SectionKey>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let mut line_definitions = Vec::new();

        for framework in &frameworks {
            for section in &framework.sections {
                let normalized_label = normalize_label(&section.label);
                if !seen.insert(normalized_label.clone()) {
                    continue;
                }
                line_definitions.push(LineDefinition {
                    section_key: section.section_key.clone(),
                    label: section.label.clone(),
                    helper: section.helper.clone(),
                    normalized_label,
                });
            }
        }

        // Longest label first so a short label never shadows a longer one.
        let mut by_length: Vec<usize> = (0..line_definitions.len()).collect();
        by_length.sort_by(|&a, &b| {
            let la = line_definitions[a].label.chars().count();
            let lb = line_definitions[b].label.chars().count();
            lb.cmp(&la)
        });

        Self {
            frameworks,
            inject_targets,
            line_definitions,
            by_length,
        }
    }

    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    pub fn framework(&self, id: &FrameworkId) -> Option<&Framework> {
        self.frameworks.iter().find(|f| &f.id == id)
    }

    /// Resolve a section definition across all frameworks (first one wins).
    pub fn lookup_by_section_key(&self, key: &SectionKey) -> Option<&SectionDefinition> {
        self.frameworks.iter().find_map(|f| f.section(key))
    }

    /// Filter the framework's declared order down to members of `keys`.
    ///
    /// Input order is irrelevant and duplicates collapse.
    pub fn canonical_order(&self, framework: &Framework, keys: &[SectionKey]) -> Vec<SectionKey> {
        let selected: BTreeSet<&SectionKey> = keys.iter().collect();
        framework
            .section_keys()
            .filter(|k| selected.contains(k))
            .cloned()
            .collect()
    }

    pub fn default_enabled_keys(&self, framework: &Framework) -> Vec<SectionKey> {
        framework
            .sections
            .iter()
            .filter(|s| s.default_enabled)
            .map(|s| s.section_key.clone())
            .collect()
    }

    pub fn line_definitions(&self) -> &[LineDefinition] {
        &self.line_definitions
    }

    /// Line definitions ordered longest label first.
    pub fn line_definitions_by_length(&self) -> impl Iterator<Item = &LineDefinition> {
        self.by_length.iter().map(|&i| &self.line_definitions[i])
    }

    pub fn inject_targets(&self) -> &BTreeMap<InjectTarget, SectionKey> {
        &self.inject_targets
    }

    pub fn inject_section_key(&self, target: &InjectTarget) -> Option<&SectionKey> {
        self.inject_targets.get(target)
    }

    /// Label → helper text. A selected framework's helpers override the
    /// catalog-wide defaults for labels it shares with other frameworks.
    pub fn helper_map(&self, framework: Option<&Framework>) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = self
            .line_definitions
            .iter()
            .map(|d| (d.label.clone(), d.helper.clone()))
            .collect();

        if let Some(framework) = framework {
            for section in &framework.sections {
                map.insert(section.label.clone(), section.helper.clone());
            }
        }

        map
    }

    /// Pairs of recognized labels where one is a prefix of the other.
    pub fn prefix_collisions(&self) -> Vec<PrefixOverlap> {
        let mut out = Vec::new();
        for short in &self.line_definitions {
            for long in &self.line_definitions {
                if short.normalized_label.len() < long.normalized_label.len()
                    && long.normalized_label.starts_with(&short.normalized_label)
                {
                    out.push(PrefixOverlap {
                        shorter: short.label.clone(),
                        longer: long.label.clone(),
                    });
                }
            }
        }
        out
    }
}

fn validate_frameworks(frameworks: &[Framework]) -> Result<(), CatalogError> {
    if frameworks.is_empty() {
        return Err(CatalogError::NoFrameworks);
    }

    let mut ids = BTreeSet::new();
    for framework in frameworks {
        if framework.id.as_str().trim().is_empty() {
            return Err(CatalogError::EmptyFrameworkId);
        }
        if !ids.insert(&framework.id) {
            return Err(CatalogError::DuplicateFramework(framework.id.clone()));
        }

        let mut keys = BTreeSet::new();
        let mut labels = BTreeSet::new();
        for section in &framework.sections {
            if !keys.insert(&section.section_key) {
                return Err(CatalogError::DuplicateSectionKey {
                    framework: framework.id.clone(),
                    section_key: section.section_key.clone(),
                });
            }
            let normalized = normalize_label(&section.label);
            if normalized.is_empty() {
                return Err(CatalogError::EmptyLabel {
                    framework: framework.id.clone(),
                    section_key: section.section_key.clone(),
                });
            }
            if section.label.contains(':') {
                return Err(CatalogError::LabelContainsColon {
                    framework: framework.id.clone(),
                    label: section.label.clone(),
                });
            }
            if !labels.insert(normalized) {
                return Err(CatalogError::DuplicateLabel {
                    framework: framework.id.clone(),
                    label: section.label.clone(),
                });
            }
        }
    }

    Ok(())
}
