use serde::{Deserialize, Serialize};

/// Pixel positions of the overlay elements, keyed the way the OCR process
/// reports them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct OverlayLayout {
    pub team_short_logo_top: f64,
    pub team_short_logo_left: f64,
    pub team_short_logo_width: f64,
    pub team_short_logo_height: f64,
    pub team_logo_top: f64,
    pub team_logo_left: f64,
    pub team_logo_size: f64,
    pub player_img_top: f64,
    pub player_img_left: f64,
    pub player_img_size: f64,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            team_short_logo_top: 57.0,
            team_short_logo_left: 10.0,
            team_short_logo_width: 100.0,
            team_short_logo_height: 32.0,
            team_logo_top: 866.0,
            team_logo_left: 644.0,
            team_logo_size: 70.0,
            player_img_top: 897.0,
            player_img_left: 1280.0,
            player_img_size: 174.0,
        }
    }
}

/// Partial layout carried by an OCR event. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct LayoutHint {
    pub team_short_logo_top: Option<f64>,
    pub team_short_logo_left: Option<f64>,
    pub team_short_logo_width: Option<f64>,
    pub team_short_logo_height: Option<f64>,
    pub team_logo_top: Option<f64>,
    pub team_logo_left: Option<f64>,
    pub team_logo_size: Option<f64>,
    pub player_img_top: Option<f64>,
    pub player_img_left: Option<f64>,
    pub player_img_size: Option<f64>,
}

impl OverlayLayout {
    /// Overwrite the fields present in `hint`; absent fields keep their value.
    pub fn merge(&mut self, hint: &LayoutHint) {
        fn set(slot: &mut f64, value: Option<f64>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut self.team_short_logo_top, hint.team_short_logo_top);
        set(&mut self.team_short_logo_left, hint.team_short_logo_left);
        set(&mut self.team_short_logo_width, hint.team_short_logo_width);
        set(&mut self.team_short_logo_height, hint.team_short_logo_height);
        set(&mut self.team_logo_top, hint.team_logo_top);
        set(&mut self.team_logo_left, hint.team_logo_left);
        set(&mut self.team_logo_size, hint.team_logo_size);
        set(&mut self.player_img_top, hint.player_img_top);
        set(&mut self.player_img_left, hint.player_img_left);
        set(&mut self.player_img_size, hint.player_img_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut layout = OverlayLayout::default();
        let hint: LayoutHint =
            serde_json::from_str(r#"{"PlayerImgTop": 900, "TeamLogoSize": 64.5, "Extra": 1}"#)
                .unwrap();
        layout.merge(&hint);

        assert_eq!(layout.player_img_top, 900.0);
        assert_eq!(layout.team_logo_size, 64.5);
        assert_eq!(layout.player_img_left, 1280.0);
        assert_eq!(layout.team_short_logo_top, 57.0);
    }

    #[test]
    fn empty_hint_is_noop() {
        let mut layout = OverlayLayout::default();
        layout.merge(&LayoutHint::default());
        assert_eq!(layout, OverlayLayout::default());
    }

    #[test]
    fn serializes_with_ocr_keys() {
        let value = serde_json::to_value(OverlayLayout::default()).unwrap();
        assert_eq!(value["TeamShortLogoTop"], 57.0);
        assert_eq!(value["PlayerImgSize"], 174.0);
    }
}
