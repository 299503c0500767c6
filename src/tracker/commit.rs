//! Turning a finished draft into a cut record and an updated slab.

use super::DraftState;
use crate::config::{float_cmp::round_to, TrackerConfig};
use crate::error::{Result, TrackerError};
use crate::identity::Operator;
use crate::model::{CutRecord, SlabRecord, SlabStatus};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Who the piece is for and who is cutting it.
#[derive(Debug, Clone)]
pub struct CutContext {
    pub client_name: String,
    pub project: String,
    pub observations: String,
    pub operator: Operator,
}

impl CutContext {
    /// Create a context with empty observations.
    pub fn new(
        client_name: impl Into<String>,
        project: impl Into<String>,
        operator: Operator,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            project: project.into(),
            observations: String::new(),
            operator,
        }
    }

    /// Attach free-text observations.
    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = observations.into();
        self
    }
}

/// Draft editing and cut commits against a tracker configuration.
#[derive(Debug, Clone, Default)]
pub struct RemnantTracker {
    config: TrackerConfig,
}

impl RemnantTracker {
    /// Create a tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Open an editing session on a slab's current outline.
    pub fn begin_draft(&self, slab: &SlabRecord) -> DraftState {
        DraftState::from_slab(slab)
    }

    /// Commit a draft as a cut, stamped with the current time.
    pub fn commit_cut(
        &self,
        draft: &DraftState,
        slab: &SlabRecord,
        context: &CutContext,
    ) -> Result<(SlabRecord, CutRecord)> {
        self.commit_cut_at(draft, slab, context, Utc::now())
    }

    /// Commit a draft as a cut made at `now`.
    ///
    /// Returns the updated slab and the new cut record; neither input is
    /// modified. Nothing is persisted here.
    pub fn commit_cut_at(
        &self,
        draft: &DraftState,
        slab: &SlabRecord,
        context: &CutContext,
        now: DateTime<Utc>,
    ) -> Result<(SlabRecord, CutRecord)> {
        check_commit(draft, context)?;

        let polygon = draft.polygon().clone();
        let new_area = draft.compute_area();
        if !new_area.is_finite() {
            return Err(TrackerError::NonFiniteArea { area: new_area });
        }
        let area_used = round_to(slab.available_area - new_area, self.config.area_decimals);
        let (leftover_width, leftover_height) = polygon.bounding_dims();

        let status = if slab.quantity <= 0 || self.config.is_exhausted_area(new_area) {
            SlabStatus::Exhausted
        } else {
            SlabStatus::HasRemnant
        };

        let cut = CutRecord {
            id: Uuid::new_v4().to_string(),
            date: now,
            client_name: context.client_name.trim().to_string(),
            project: context.project.trim().to_string(),
            area_used,
            leftover_width,
            leftover_height,
            leftover_polygon: polygon.clone(),
            operator_id: context.operator.id.clone(),
            operator_name: context.operator.name.clone(),
            observations: context.observations.clone(),
        };

        let updated = slab
            .clone()
            .with_polygon(polygon)
            .with_status(status)
            .with_operator(&context.operator, now)
            .with_cut(cut.clone());

        info!(
            "Slab #{} cut for {}: {:.4} m² used, {:.4} m² left ({})",
            slab.serial, cut.client_name, area_used, new_area, status
        );

        Ok((updated, cut))
    }
}

fn check_commit(draft: &DraftState, context: &CutContext) -> Result<()> {
    if !draft.polygon().is_complete() {
        return Err(TrackerError::InsufficientVertices {
            count: draft.vertex_count(),
        });
    }
    if context.client_name.trim().is_empty() {
        return Err(TrackerError::MissingClientName);
    }
    if context.project.trim().is_empty() {
        return Err(TrackerError::MissingProject);
    }
    Ok(())
}
