//! Validation of drafts and slab records.

use crate::config::{float_cmp::approx_eq, EPS};
use crate::model::SlabRecord;
use crate::tracker::DraftState;

/// Outcome of a check: blocking errors plus advisory warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// False once any error has been recorded.
    pub passed: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// A failed result carrying a single error.
    pub fn error(message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_error(message);
        result
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record an error; the result no longer passes.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Fold another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.passed &= other.passed;
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }
}

/// Check a draft against the slab it is about to be committed to.
///
/// Expansion and self-intersection are only warnings: commits accept them.
pub fn validate_draft(draft: &DraftState, slab: &SlabRecord) -> ValidationResult {
    let polygon = draft.polygon();
    if !polygon.is_complete() {
        return ValidationResult::error(format!(
            "Draft has {} point(s), at least 3 are needed",
            polygon.len()
        ));
    }

    let new_area = draft.compute_area();
    if !new_area.is_finite() {
        return ValidationResult::error("Draft area is not a finite number");
    }

    let mut result = ValidationResult::ok();

    if polygon.is_self_intersecting() {
        result.add_warning("Draft outline crosses itself; the computed area may not match the drawing");
    }

    if new_area > slab.available_area + EPS {
        result.add_warning(format!(
            "Draft area {:.4} m² exceeds the available {:.4} m²; the cut would add area",
            new_area, slab.available_area
        ));
    }

    let (width, height) = draft.bounds();
    if !polygon.fits_within(width, height) {
        result.add_warning(format!(
            "Draft extends beyond the current {} x {} cm bounds",
            width, height
        ));
    }

    result
}

/// Check a slab record's stored values against its outline.
pub fn validate_slab(slab: &SlabRecord) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if slab.company_id.trim().is_empty() {
        result.add_error(format!("Slab #{}: Missing company", slab.serial));
    }

    if slab.original_width <= 0.0 || slab.original_height <= 0.0 {
        result.add_error(format!(
            "Slab #{}: Invalid original dimensions ({}x{})",
            slab.serial, slab.original_width, slab.original_height
        ));
    }

    let polygon = slab.polygon();

    if !approx_eq(slab.available_area, polygon.area_m2()) {
        result.add_error(format!(
            "Slab #{}: Available area {} does not match outline area {}",
            slab.serial,
            slab.available_area,
            polygon.area_m2()
        ));
    }

    let (width, height) = polygon.bounding_dims();
    if !approx_eq(slab.current_width, width) || !approx_eq(slab.current_height, height) {
        result.add_error(format!(
            "Slab #{}: Current size {}x{} does not match outline bounds {}x{}",
            slab.serial, slab.current_width, slab.current_height, width, height
        ));
    }

    let expected_used = slab.total_area - slab.available_area;
    let tolerance = 1e-3 * slab.history.len().max(1) as f64;
    if (slab.area_consumed() - expected_used).abs() > tolerance {
        result.add_warning(format!(
            "Slab #{}: Cut history accounts for {:.4} m² but {:.4} m² is missing",
            slab.serial,
            slab.area_consumed(),
            expected_used
        ));
    }

    result
}

/// Validate every slab of a listing.
pub fn validate_slabs(slabs: &[SlabRecord]) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for slab in slabs {
        result.merge(validate_slab(slab));
    }
    result
}
