use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::locality::{extract_city_name, extract_region_code};
use crate::metrics::ClinicMetrics;
use crate::ConfigError;

/// A physical clinic location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    /// Street line, e.g. `"1200 Main St, Suite 4"`.
    #[serde(default)]
    pub street: Option<String>,
    /// Combined `"City, ST 12345"` field. Not structured upstream.
    #[serde(rename = "city-zip", alias = "locality", default)]
    pub locality: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Branch {
    #[must_use]
    pub fn region_code(&self) -> Option<String> {
        extract_region_code(&self.locality)
    }

    #[must_use]
    pub fn city(&self) -> String {
        extract_city_name(&self.locality)
    }

    /// Free-text address handed to the geocoder: street and locality joined
    /// with a comma, skipping whichever part is blank.
    #[must_use]
    pub fn geocode_query(&self) -> String {
        [self.street.as_deref(), Some(self.locality.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: i64,
    /// Always derived from `name`; see [`slugify`].
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub doctors: Vec<StaffMember>,
    #[serde(default)]
    pub metrics: ClinicMetrics,
}

impl Clinic {
    /// Builds a clinic with its slug derived from `name`.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, branches: Vec<Branch>) -> Self {
        let name = name.into();
        Self {
            id,
            slug: slugify(&name),
            name,
            branches,
            doctors: Vec::new(),
            metrics: ClinicMetrics::default(),
        }
    }

    #[must_use]
    pub fn staff_count(&self) -> usize {
        self.doctors.len()
    }

    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

/// Generate a URL-safe slug from a display name.
///
/// Lower-cases, drops anything that is not ASCII alphanumeric, turns runs of
/// whitespace and hyphens into a single hyphen, and trims hyphens from both
/// ends. Applying it to its own output is a no-op.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicsFile {
    pub clinics: Vec<Clinic>,
}

/// Load and validate clinic data from a YAML or JSON file.
///
/// The format is chosen by extension (`.json` is JSON, anything else YAML).
/// Stored slugs are replaced with ones derived from the clinic name.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_clinics(path: &Path) -> Result<ClinicsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ClinicsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parse_error = |reason: String| ConfigError::ClinicsFileParse {
        path: path.display().to_string(),
        reason,
    };
    let mut clinics_file: ClinicsFile = if is_json {
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
    };

    for clinic in &mut clinics_file.clinics {
        clinic.slug = slugify(&clinic.name);
    }

    validate_clinics(&clinics_file)?;

    Ok(clinics_file)
}

fn validate_clinics(clinics_file: &ClinicsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for clinic in &clinics_file.clinics {
        if clinic.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "clinic {} has an empty name",
                clinic.id
            )));
        }

        if !seen_ids.insert(clinic.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate clinic id: {}",
                clinic.id
            )));
        }

        if !seen_slugs.insert(clinic.slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate clinic slug: '{}' (from clinic '{}')",
                clinic.slug, clinic.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "clinics_test.rs"]
mod tests;
