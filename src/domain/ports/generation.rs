//! Port for the external AI generation services.

use async_trait::async_trait;

use crate::domain::errors::GenerationError;
use crate::domain::models::brief::{BriefData, BriefDocument, CopyVariation, Motivation};

/// The three generation calls the workflow drives, one per content step.
///
/// Implementations perform the actual network call; in-flight bookkeeping,
/// progress simulation, and stale-result handling live in the gateway.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Parse an uploaded brief document into structured fields.
    async fn parse_brief(&self, document: &BriefDocument) -> Result<BriefData, GenerationError>;

    /// Generate motivation candidates from a parsed brief.
    async fn generate_motivations(
        &self,
        brief: &BriefData,
    ) -> Result<Vec<Motivation>, GenerationError>;

    /// Generate copy variations from the selected motivations.
    async fn generate_copy(
        &self,
        motivations: &[Motivation],
    ) -> Result<Vec<CopyVariation>, GenerationError>;
}
