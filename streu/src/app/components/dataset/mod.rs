mod logic;
mod ui;

use std::path::{Path, PathBuf};

use app_core::frontend::UIParameter;

use crate::backend_state::SurveyData;

/// The currently loaded survey and where it came from.
///
/// Files are parsed on the backend thread, the UI polls for the result
/// through a [`UIParameter`].
pub struct Dataset {
    pub data: UIParameter<Result<SurveyData, String>>,
    path: Option<PathBuf>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            data: UIParameter::new(Err("no dataset loaded".to_string())),
            path: None,
        }
    }
}

impl Dataset {
    /// The survey records, once a load has finished successfully.
    pub fn survey(&self) -> Option<&SurveyData> {
        self.data.value().as_ref().ok()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
