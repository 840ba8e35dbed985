//! Finding module - one structured record extracted from a segment

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of fields a finding can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingField {
    /// Name or type of the material
    Name,
    /// Free-text description of the material
    Description,
    /// Molecule the material targets
    TargetedMolecule,
    /// Quantitative capacity, with units
    AdsorptionCapacity,
    /// Provenance (page range or section)
    Location,
}

impl FindingField {
    /// All fields in canonical order
    pub const ALL: [FindingField; 5] = [
        FindingField::Name,
        FindingField::Description,
        FindingField::TargetedMolecule,
        FindingField::AdsorptionCapacity,
        FindingField::Location,
    ];

    /// Key used for this field in backend responses and JSON dumps
    pub fn key(&self) -> &'static str {
        match self {
            FindingField::Name => "name",
            FindingField::Description => "description",
            FindingField::TargetedMolecule => "targeted_molecule",
            FindingField::AdsorptionCapacity => "adsorption_capacity",
            FindingField::Location => "location",
        }
    }

    /// Look up a field by its key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for FindingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One extracted record.
///
/// Every field is optional; which ones are present varies from finding to
/// finding. Once a finding has been accumulated into a run it always carries
/// a non-empty `location`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Name or type of the material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// What the material is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Molecule the material targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeted_molecule: Option<String>,

    /// Capacity with units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adsorption_capacity: Option<String>,

    /// Where in the source the information was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Finding {
    /// Create an empty finding
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: FindingField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field
    pub fn set(&mut self, field: FindingField, value: impl Into<String>) {
        *self.slot(field) = Some(value.into());
    }

    /// Get a field's value, if present
    pub fn get(&self, field: FindingField) -> Option<&str> {
        match field {
            FindingField::Name => self.name.as_deref(),
            FindingField::Description => self.description.as_deref(),
            FindingField::TargetedMolecule => self.targeted_molecule.as_deref(),
            FindingField::AdsorptionCapacity => self.adsorption_capacity.as_deref(),
            FindingField::Location => self.location.as_deref(),
        }
    }

    /// Whether the field is present (an empty string still counts)
    pub fn has(&self, field: FindingField) -> bool {
        self.get(field).is_some()
    }

    /// Whether the finding carries usable provenance
    pub fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .map_or(false, |loc| !loc.trim().is_empty())
    }

    fn slot(&mut self, field: FindingField) -> &mut Option<String> {
        match field {
            FindingField::Name => &mut self.name,
            FindingField::Description => &mut self.description,
            FindingField::TargetedMolecule => &mut self.targeted_molecule,
            FindingField::AdsorptionCapacity => &mut self.adsorption_capacity,
            FindingField::Location => &mut self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip() {
        for field in FindingField::ALL {
            assert_eq!(FindingField::from_key(field.key()), Some(field));
        }
        assert_eq!(FindingField::from_key("surface_area"), None);
    }

    #[test]
    fn test_builder_and_get() {
        let finding = Finding::new()
            .with(FindingField::Name, "Rice husk biochar")
            .with(FindingField::AdsorptionCapacity, "45.2 mg/g");

        assert_eq!(finding.get(FindingField::Name), Some("Rice husk biochar"));
        assert_eq!(finding.get(FindingField::AdsorptionCapacity), Some("45.2 mg/g"));
        assert!(!finding.has(FindingField::Description));
    }

    #[test]
    fn test_blank_location_is_not_provenance() {
        let finding = Finding::new().with(FindingField::Location, "   ");
        assert!(finding.has(FindingField::Location));
        assert!(!finding.has_location());

        let finding = Finding::new().with(FindingField::Location, "Page 3, Table 2");
        assert!(finding.has_location());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let finding = Finding::new().with(FindingField::Name, "X");
        let json = serde_json::to_string(&finding).unwrap();
        assert_eq!(json, r#"{"name":"X"}"#);
    }
}
