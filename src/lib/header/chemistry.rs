//! Sequencing chemistry lookup.
//!
//! A read group's chemistry name is not stored in the header; it is derived from the binding
//! kit, sequencing kit, and the `MAJOR.MINOR` prefix of the basecaller version recorded in the
//! `@RG DS` description.

use crate::errors::{HeaderError, Result};
use crate::tokens::split;

/// One row of a chemistry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChemistryMapping {
    pub binding_kit: String,
    pub sequencing_kit: String,
    /// Basecaller `MAJOR.MINOR` version
    pub basecaller_version: String,
    pub chemistry: String,
}

impl ChemistryMapping {
    #[must_use]
    pub fn new(
        binding_kit: &str,
        sequencing_kit: &str,
        basecaller_version: &str,
        chemistry: &str,
    ) -> Self {
        Self {
            binding_kit: binding_kit.to_string(),
            sequencing_kit: sequencing_kit.to_string(),
            basecaller_version: basecaller_version.to_string(),
            chemistry: chemistry.to_string(),
        }
    }

    fn matches(&self, binding_kit: &str, sequencing_kit: &str, basecaller_version: &str) -> bool {
        self.binding_kit == binding_kit
            && self.sequencing_kit == sequencing_kit
            && self.basecaller_version == basecaller_version
    }
}

/// Built-in rows: binding kit, sequencing kit, basecaller version, chemistry.
const BUILT_IN: &[(&str, &str, &str, &str)] = &[
    // RS
    ("100356300", "100356200", "2.1", "P6-C4"),
    ("100356300", "100356200", "2.3", "P6-C4"),
    ("100356300", "100612400", "2.1", "P6-C4"),
    ("100356300", "100612400", "2.3", "P6-C4"),
    ("100372700", "100356200", "2.1", "P6-C4"),
    ("100372700", "100356200", "2.3", "P6-C4"),
    ("100372700", "100612400", "2.1", "P6-C4"),
    ("100372700", "100612400", "2.3", "P6-C4"),
    // Sequel 3.0
    ("100-619-300", "100-620-000", "3.0", "S/P1-C1/beta"),
    ("100-619-300", "100-620-000", "3.1", "S/P1-C1/beta"),
    // Sequel 3.1
    ("100-619-300", "100-867-300", "3.1", "S/P1-C1.1"),
    ("100-619-300", "100-867-300", "3.2", "S/P1-C1.1"),
    ("100-619-300", "100-867-300", "3.3", "S/P1-C1.1"),
    // Sequel 3.1.1
    ("100-619-300", "100-902-100", "3.1", "S/P1-C1.2"),
    ("100-619-300", "100-902-100", "3.2", "S/P1-C1.2"),
    ("100-619-300", "100-902-100", "3.3", "S/P1-C1.2"),
    ("100-619-300", "100-902-100", "4.0", "S/P1-C1.2"),
    ("100-619-300", "100-902-100", "4.1", "S/P1-C1.2"),
    // Sequel 3.2
    ("100-619-300", "100-972-200", "3.2", "S/P1-C1.3"),
    ("100-619-300", "100-972-200", "3.3", "S/P1-C1.3"),
    ("100-619-300", "100-972-200", "4.0", "S/P1-C1.3"),
    ("100-619-300", "100-972-200", "4.1", "S/P1-C1.3"),
    // Sequel 4.0 / 5.0
    ("100-862-200", "100-861-800", "4.0", "S/P2-C2"),
    ("100-862-200", "100-861-800", "4.1", "S/P2-C2"),
    ("100-862-200", "100-861-800", "5.0", "S/P2-C2"),
];

/// A chemistry table: caller-supplied overrides consulted before the built-in rows.
#[derive(Debug, Clone, Default)]
pub struct ChemistryTable {
    overrides: Vec<ChemistryMapping>,
}

impl ChemistryTable {
    /// A table with only the built-in rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rows that take precedence over the built-in table.
    #[must_use]
    pub fn with_overrides(mut self, rows: impl IntoIterator<Item = ChemistryMapping>) -> Self {
        self.overrides.extend(rows);
        self
    }

    /// Resolves a chemistry name.
    ///
    /// Only the first two dotted fields of `basecaller_version` take part in the match.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::InvalidSequencingChemistry`] if the basecaller version has fewer
    /// than two fields or no row matches.
    pub fn lookup(
        &self,
        binding_kit: &str,
        sequencing_kit: &str,
        basecaller_version: &str,
    ) -> Result<String> {
        let invalid = || HeaderError::InvalidSequencingChemistry {
            binding_kit: binding_kit.to_string(),
            sequencing_kit: sequencing_kit.to_string(),
            basecaller_version: basecaller_version.to_string(),
        };

        let fields = split(basecaller_version, '.');
        if fields.len() < 2 {
            return Err(invalid());
        }
        let version = format!("{}.{}", fields[0], fields[1]);

        if let Some(row) =
            self.overrides.iter().find(|row| row.matches(binding_kit, sequencing_kit, &version))
        {
            return Ok(row.chemistry.clone());
        }

        BUILT_IN
            .iter()
            .find(|(bk, sk, bv, _)| *bk == binding_kit && *sk == sequencing_kit && *bv == version)
            .map(|(_, _, _, chemistry)| (*chemistry).to_string())
            .ok_or_else(invalid)
    }
}
