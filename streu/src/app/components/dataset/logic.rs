use std::path::{Path, PathBuf};

use app_core::{
    backend::{BackendEventLoop, BackendLink, LinkReceiver},
    BACKEND_HUNG_UP_MSG,
};

use crate::{app::DynRequestSender, backend_state::SurveyData, BackendAppState};

use super::Dataset;

impl Dataset {
    /// Hand `path` to the backend thread for parsing and remember it as
    /// the active dataset.
    pub fn load(&mut self, path: PathBuf, request_tx: &mut DynRequestSender) {
        self.data.set_recv(parse_survey(&path, request_tx));
        self.path = Some(path);
    }

    /// Poll for a finished parse. Returns `true` exactly when a result
    /// arrived in this call.
    pub fn try_update(&mut self) -> bool {
        self.data.try_update()
    }
}

pub fn parse_survey(
    path: &Path,
    request_tx: &mut DynRequestSender,
) -> LinkReceiver<Result<SurveyData, String>> {
    let path = path.to_owned();
    let (rx, linker) = BackendLink::new(
        format!("load survey data from file {:?}", path),
        move |backend: &mut BackendEventLoop<BackendAppState>| {
            backend.state.load_survey_data(&path).map_err(|err| {
                log::error!("{}", err);
                err
            })
        },
    );
    request_tx
        .send(Box::new(linker))
        .expect(BACKEND_HUNG_UP_MSG);
    rx
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::time::{Duration, Instant};

    use app_core::backend::{request_stop, BackendEventLoop};

    use crate::BackendAppState;

    use super::Dataset;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn datasets_are_parsed_on_the_backend_thread() {
        init();
        let path = std::env::temp_dir().join("streu_test_dataset_roundtrip.csv");
        std::fs::write(
            &path,
            "abbr,state,poverty,age,income,healthcare,obesity,smokes\n\
             TX,Texas,17.2,34.3,53035,22.1,31.9,14.5\n",
        )
        .unwrap();

        let (mut request_tx, request_rx) = channel();
        let handle = BackendEventLoop::new(request_rx, BackendAppState::default()).run();

        let mut dataset = Dataset::default();
        assert!(dataset.survey().is_none());
        dataset.load(path.clone(), &mut request_tx);
        assert_eq!(dataset.path(), Some(path.as_path()));

        let deadline = Instant::now() + Duration::from_secs(5);
        while !dataset.try_update() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        std::fs::remove_file(&path).unwrap();

        let data = dataset.survey().expect("parsing should have succeeded");
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.records[0].abbr, "TX");

        request_stop(&request_tx, handle);
    }
}
