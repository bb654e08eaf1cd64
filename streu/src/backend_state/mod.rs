mod data;

pub use data::{Field, Record, SurveyData};

use std::path::Path;

use app_core::backend::BackendState;

/// State owned by the backend thread. Datasets are parsed here so a slow
/// disk never stalls the UI loop.
#[derive(Default)]
pub struct BackendAppState;

impl BackendState for BackendAppState {}

impl BackendAppState {
    pub fn load_survey_data(&self, path: &Path) -> Result<SurveyData, String> {
        log::debug!("loading survey data from {:?}", path);
        SurveyData::from_path(path)
    }
}
