use serde::{Deserialize, Serialize};

const CONFY_APP_NAME: &str = "antvis-rs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    pub background_color: [f32; 3],
    pub show_controls: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0],
            show_controls: true,
        }
    }
}

impl ViewSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "view").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "view", self);
    }
}
