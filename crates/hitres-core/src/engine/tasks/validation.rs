use crate::core::models::hit::InvalidHitError;
use crate::core::models::ids::HitId;
use crate::engine::config::InvalidHitPolicy;
use crate::engine::context::ResolveContext;
use crate::engine::error::EngineError;
use crate::engine::state::HitDiagnostic;
use tracing::{instrument, warn};

#[derive(Debug, Default)]
pub struct ValidationOutcome {
    pub valid: Vec<HitId>,
    pub diagnostics: Vec<HitDiagnostic>,
}

/// Checks every hit of the collection, in registration order.
///
/// Under [`InvalidHitPolicy::Skip`] invalid hits are set aside with a diagnostic; under
/// [`InvalidHitPolicy::Reject`] the first invalid hit aborts the run.
#[instrument(skip_all, name = "validation_task")]
pub fn run(context: &ResolveContext) -> Result<ValidationOutcome, EngineError> {
    let mut outcome = ValidationOutcome::default();
    let expected = context.config.score_type;

    for (id, hit) in context.collection.iter() {
        let check = hit.validate().and_then(|()| {
            if hit.score_type == expected {
                Ok(())
            } else {
                Err(InvalidHitError::ScoreTypeMismatch {
                    expected,
                    found: hit.score_type,
                })
            }
        });

        match check {
            Ok(()) => outcome.valid.push(id),
            Err(error) => match context.config.invalid_hit_policy {
                InvalidHitPolicy::Reject => {
                    return Err(EngineError::InvalidHit {
                        label: hit.label.clone(),
                        source: error,
                    });
                }
                InvalidHitPolicy::Skip => {
                    warn!(label = %hit.label, %error, "Skipping invalid hit.");
                    outcome.diagnostics.push(HitDiagnostic { hit: id, error });
                }
            },
        }
    }

    Ok(outcome)
}
