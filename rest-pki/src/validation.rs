use std::fmt::{self, Display, Formatter};

use crate::models::{ValidationItemModel, ValidationResultsModel};

/// A single check performed by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationItem {
    pub item_type: String,
    pub message: String,
    pub detail: Option<String>,
    pub inner_validation_results: Option<ValidationResults>,
}

impl From<ValidationItemModel> for ValidationItem {
    fn from(model: ValidationItemModel) -> Self {
        ValidationItem {
            item_type: model.item_type.unwrap_or_default(),
            message: model.message.unwrap_or_default(),
            detail: model.detail.filter(|detail| !detail.is_empty()),
            inner_validation_results: model.inner_validation_results.map(ValidationResults::from),
        }
    }
}

impl ValidationItem {
    fn write_indented(&self, f: &mut Formatter<'_>, indentation: usize) -> fmt::Result {
        let pad = "\t".repeat(indentation);
        write!(f, "{pad}- {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        writeln!(f)?;

        if let Some(inner) = &self.inner_validation_results {
            inner.write_indented(f, indentation + 1)?;
        }

        Ok(())
    }
}

impl Display for ValidationItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Outcome of the server-side validation of one signer. Entries are split in
/// passed checks, errors and warnings; items may carry nested results (e.g.
/// for each certificate of the chain).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResults {
    pub passed_checks: Vec<ValidationItem>,
    pub errors: Vec<ValidationItem>,
    pub warnings: Vec<ValidationItem>,
}

impl From<ValidationResultsModel> for ValidationResults {
    fn from(model: ValidationResultsModel) -> Self {
        fn convert(items: Option<Vec<ValidationItemModel>>) -> Vec<ValidationItem> {
            items
                .unwrap_or_default()
                .into_iter()
                .map(ValidationItem::from)
                .collect()
        }

        ValidationResults {
            passed_checks: convert(model.passed_checks),
            errors: convert(model.errors),
            warnings: convert(model.warnings),
        }
    }
}

impl ValidationResults {
    /// True when the service reported no errors. Warnings do not invalidate.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total number of checks performed, whatever their outcome
    pub fn checks_performed(&self) -> usize {
        self.passed_checks.len() + self.errors.len() + self.warnings.len()
    }

    /// One line description of the outcome
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Validation results: {} checks performed",
            self.checks_performed()
        );

        if self.has_errors() {
            text.push_str(&format!(", {} errors", self.errors.len()));
        }
        if self.has_warnings() {
            text.push_str(&format!(", {} warnings", self.warnings.len()));
        }
        if !self.passed_checks.is_empty() {
            if !self.has_errors() && !self.has_warnings() {
                text.push_str(", all passed");
            } else {
                text.push_str(&format!(", {} passed", self.passed_checks.len()));
            }
        }

        text
    }

    fn write_indented(&self, f: &mut Formatter<'_>, indentation: usize) -> fmt::Result {
        let pad = "\t".repeat(indentation);
        writeln!(f, "{pad}{}", self.summary())?;

        for (title, items) in [
            ("Errors", &self.errors),
            ("Warnings", &self.warnings),
            ("Passed checks", &self.passed_checks),
        ] {
            if items.is_empty() {
                continue;
            }
            writeln!(f, "{pad}{title}:")?;
            for item in items {
                item.write_indented(f, indentation)?;
            }
        }

        Ok(())
    }
}

impl Display for ValidationResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
