use crate::error::WorkflowError;

/// Name of the single multipart part carrying the dataset.
pub const DATASET_PART_NAME: &str = "dataset";

/// A dataset file selected for upload. Opaque to the client: CSV
/// well-formedness is the server's business. Consumed by exactly one
/// training attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Validated payload for one training attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPayload {
    pub dataset: DatasetUpload,
}

impl TrainingPayload {
    /// Packages a selected dataset for upload. The only client-side checks
    /// are that a file was selected at all and that it is not empty.
    pub fn build(dataset: Option<DatasetUpload>) -> Result<TrainingPayload, WorkflowError> {
        let Some(dataset) = dataset else {
            return Err(WorkflowError::Validation("no file selected".to_string()));
        };
        if dataset.bytes.is_empty() {
            return Err(WorkflowError::Validation(format!(
                "dataset file '{}' is empty",
                dataset.filename
            )));
        }
        Ok(TrainingPayload { dataset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_a_selected_file() {
        let err = TrainingPayload::build(None).expect_err("no file");
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert_eq!(err.message(), "no file selected");
    }

    #[test]
    fn build_rejects_an_empty_file() {
        let err = TrainingPayload::build(Some(DatasetUpload {
            filename: "cars.csv".to_string(),
            bytes: Vec::new(),
        }))
        .expect_err("empty file");
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn build_passes_bytes_and_filename_through() {
        let payload = TrainingPayload::build(Some(DatasetUpload {
            filename: "cars.csv".to_string(),
            bytes: b"buying,maint\n".to_vec(),
        }))
        .expect("payload");
        assert_eq!(payload.dataset.filename, "cars.csv");
        assert_eq!(payload.dataset.bytes, b"buying,maint\n");
    }
}
