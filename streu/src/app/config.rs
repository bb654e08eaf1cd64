use app_core::string_error::ErrorStringExt;
use std::{io::Read, path::PathBuf};

#[derive(Debug)]
pub struct Config {
    pub data_path: PathBuf,
    pub point_radius: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        let data_path = PathBuf::from("data/census_2014.csv");
        let point_radius = 8.0;
        let window_width = 960.0;
        let window_height = 500.0;

        Self {
            data_path,
            point_radius,
            window_width,
            window_height,
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        let mut config = Self::default();
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(PathBuf::from(".streu"));
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        config.apply(&config_raw);
        Ok(config)
    }

    /// Apply `key=value` lines on top of the current values. Unknown keys
    /// and unparseable values are logged and skipped.
    fn apply(&mut self, config_raw: &str) {
        for line in config_raw.lines() {
            // Lines starting with "#" are considered comments.
            if line.starts_with("#") {
                continue;
            }
            let mut iter = line.split("=");
            let key = iter.next();
            let val = iter.next();
            match (key, val) {
                (Some("data_path"), Some(path_str)) => {
                    self.data_path = PathBuf::from(path_str);
                }
                (Some("point_radius"), Some(radius_str)) => {
                    if let Ok(radius) = radius_str.parse::<f32>() {
                        self.point_radius = radius;
                    } else {
                        log::warn!("could not parse 'point_radius' as number")
                    }
                }
                (Some("window_width"), Some(width_str)) => {
                    if let Ok(width) = width_str.parse::<f32>() {
                        self.window_width = width;
                    } else {
                        log::warn!("could not parse 'window_width' as number")
                    }
                }
                (Some("window_height"), Some(height_str)) => {
                    if let Ok(height) = height_str.parse::<f32>() {
                        self.window_height = height;
                    } else {
                        log::warn!("could not parse 'window_height' as number")
                    }
                }
                _ => continue,
            }
        }
    }

    /// Preferences view. Edits apply to the running session only, the
    /// config file is never written.
    pub fn render(&mut self, ui: &mut egui::Ui) {
        ui.heading("Preferences");
        ui.separator();

        egui::Grid::new("preferences_grid")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.label("Dataset");
                ui.monospace(self.data_path.display().to_string());
                ui.end_row();

                ui.label("Point radius");
                ui.add(
                    egui::DragValue::new(&mut self.point_radius)
                        .speed(0.5)
                        .range(2.0..=30.0),
                );
                ui.end_row();

                ui.label("Window width");
                ui.add(egui::DragValue::new(&mut self.window_width).range(480.0..=4096.0));
                ui.end_row();

                ui.label("Window height");
                ui.add(egui::DragValue::new(&mut self.window_height).range(320.0..=2160.0));
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label(
            "Window size is applied on the next start. \
             Change the dataset via File > Open Dataset.",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn applies_known_keys_and_skips_junk() {
        init();
        let mut config = Config::default();
        config.apply(
            "# streu config\n\
             data_path=/tmp/survey.csv\n\
             point_radius=12.5\n\
             window_width=abc\n\
             unknown_key=1\n",
        );
        assert_eq!(config.data_path, PathBuf::from("/tmp/survey.csv"));
        assert_eq!(config.point_radius, 12.5);
        // Unparseable value keeps the default.
        assert_eq!(config.window_width, 960.0);
    }

    #[test]
    fn default_viewport_is_960_by_500() {
        init();
        let config = Config::default();
        assert_eq!(config.window_width, 960.0);
        assert_eq!(config.window_height, 500.0);
    }
}
