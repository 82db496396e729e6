use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{ClassUpdate, NewClass, TrainerClass},
    error::{AppError, Result},
    repository::{ClassRepository, TrainerRepository},
};

pub struct ClassService {
    classes: Arc<dyn ClassRepository>,
    trainers: Arc<dyn TrainerRepository>,
}

impl ClassService {
    pub fn new(classes: Arc<dyn ClassRepository>, trainers: Arc<dyn TrainerRepository>) -> Self {
        Self { classes, trainers }
    }

    pub async fn create(&self, class: NewClass) -> Result<TrainerClass> {
        class.validate()?;

        if class.is_recurring && class.recurring_days.is_empty() {
            return Err(AppError::Validation(
                "A recurring class needs at least one weekday".to_string(),
            ));
        }

        self.trainers
            .find_by_id(class.trainer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trainer not found".to_string()))?;

        self.classes.create(class).await
    }

    pub async fn update(&self, id: Uuid, update: ClassUpdate) -> Result<TrainerClass> {
        if let Some(trainer_id) = update.trainer_id {
            self.trainers
                .find_by_id(trainer_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Trainer not found".to_string()))?;
        }

        // The recurring invariant is checked against the merged state, since
        // the flag and the weekday list may arrive in separate edits.
        let existing = self
            .classes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        let is_recurring = update.is_recurring.unwrap_or(existing.is_recurring);
        let recurring_days = update
            .recurring_days
            .as_ref()
            .unwrap_or(&existing.recurring_days);
        if is_recurring && recurring_days.is_empty() {
            return Err(AppError::Validation(
                "A recurring class needs at least one weekday".to_string(),
            ));
        }

        self.classes.update(id, update).await
    }

    /// Adds one enrollment. Read-modify-write on the counter: concurrent
    /// enrollments can race (single-operator usage assumed).
    pub async fn enroll(&self, id: Uuid) -> Result<TrainerClass> {
        let class = self
            .classes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        if class.enrolled >= class.capacity {
            return Err(AppError::Conflict("Class is full".to_string()));
        }

        self.classes.set_enrolled(id, class.enrolled + 1).await
    }

    pub async fn cancel_enrollment(&self, id: Uuid) -> Result<TrainerClass> {
        let class = self
            .classes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        if class.enrolled == 0 {
            return Err(AppError::BadRequest(
                "Class has no enrollments to cancel".to_string(),
            ));
        }

        self.classes.set_enrolled(id, class.enrolled - 1).await
    }
}
