//! Platform abstraction layer
//!
//! Environment queries that only decide which input affordance is shown.
//! Nothing here feeds the simulation.

/// True for phones/tablets: user agent mentions `Mobi` or `Android`
/// (case-insensitive).
pub fn is_touch_primary(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ua.contains("mobi") || ua.contains("android")
}

/// Whether to show on-screen controls, honoring a settings override
pub fn show_touch_controls(user_agent: &str, force: Option<bool>) -> bool {
    force.unwrap_or_else(|| is_touch_primary(user_agent))
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    /// Element holding the on-screen buttons
    pub const CONTROLS_ID: &str = "mobile-controls";

    pub fn user_agent() -> String {
        web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default()
    }

    /// Toggle the `hidden` class on the control panel
    pub fn set_touch_controls_visible(visible: bool) {
        let Some(panel) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONTROLS_ID))
        else {
            log::warn!("#{CONTROLS_ID} not found; skipping control panel toggle");
            return;
        };

        let classes = panel.class_list();
        let result = if visible {
            classes.remove_1("hidden")
        } else {
            classes.add_1("hidden")
        };
        if let Err(e) = result {
            log::warn!("Cannot toggle control panel: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_touch_primary(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148"
        ));
        assert!(is_touch_primary("Mozilla/5.0 (Linux; ANDROID 14; Pixel 8)"));
    }

    #[test]
    fn test_desktop_user_agent() {
        assert!(!is_touch_primary(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36"
        ));
    }

    #[test]
    fn test_override_wins() {
        assert!(show_touch_controls("desktop", Some(true)));
        assert!(!show_touch_controls("Android", Some(false)));
        assert!(show_touch_controls("Android", None));
    }
}
