//! Examination workflow on top of the examination repository.

use std::sync::Arc;

use crate::{
    db::{examinations::ExaminationWrite, traits::QueueStore, ExaminationRepository},
    models::examination::{CreateExaminationRequest, Examination, UpdateExaminationRequest},
    models::queue::QueueStatus,
    Error, Result,
};

#[derive(Clone)]
pub struct ExaminationService {
    repo: ExaminationRepository,
    queue: Arc<dyn QueueStore>,
}

impl ExaminationService {
    pub fn new(repo: ExaminationRepository, queue: Arc<dyn QueueStore>) -> Self {
        Self { repo, queue }
    }

    /// Record an examination for a visit. Each queue entry can carry at most
    /// one examination; a successful record advances the entry to `done`.
    pub async fn create(&self, req: &CreateExaminationRequest) -> Result<Examination> {
        if self.repo.exists_for_queue_entry(req.queue_entry_id).await? {
            return Err(Error::Conflict(
                "examination for this visit already exists".to_string(),
            ));
        }

        let examination = self
            .repo
            .create(req.queue_entry_id, &write_from_create(req))
            .await?;

        // Closing the visit is best effort; the recorded examination stands
        // even if the queue update fails.
        match self.queue.get_by_id(req.queue_entry_id).await {
            Ok(Some(entry)) => {
                if let Err(e) = self
                    .queue
                    .update_entry(entry.id, QueueStatus::Done, entry.priority)
                    .await
                {
                    tracing::warn!(
                        queue_entry_id = entry.id,
                        error = %e,
                        "Failed to close queue entry after examination"
                    );
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    queue_entry_id = req.queue_entry_id,
                    error = %e,
                    "Failed to load queue entry after examination"
                );
            }
        }

        Ok(examination)
    }

    pub async fn update(&self, id: i32, req: &UpdateExaminationRequest) -> Result<Examination> {
        self.repo
            .update(id, &write_from_update(req))
            .await?
            .ok_or_else(|| Error::not_found("examination"))
    }
}

fn write_from_create(req: &CreateExaminationRequest) -> ExaminationWrite {
    ExaminationWrite {
        icd_id: req.icd_id,
        pulse: req.pulse.clone(),
        blood_pressure: req.blood_pressure.clone(),
        temperature: req.temperature.clone(),
        weight: req.weight.clone(),
        general_condition: req.general_condition.clone(),
        complaint: req.complaint.clone(),
        medical_history: req.medical_history.clone(),
        note: req.note.clone(),
        treatment: req.treatment.clone(),
        examined_on: req.examined_on,
    }
}

fn write_from_update(req: &UpdateExaminationRequest) -> ExaminationWrite {
    ExaminationWrite {
        icd_id: req.icd_id,
        pulse: req.pulse.clone(),
        blood_pressure: req.blood_pressure.clone(),
        temperature: req.temperature.clone(),
        weight: req.weight.clone(),
        general_condition: req.general_condition.clone(),
        complaint: req.complaint.clone(),
        medical_history: req.medical_history.clone(),
        note: req.note.clone(),
        treatment: req.treatment.clone(),
        examined_on: req.examined_on,
    }
}
