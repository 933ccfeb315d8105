/// Overlay panel shown while the info unit is focused
///
/// Holds content and visibility; drawing is the host's concern. Dismissal
/// is edge-triggered so the application shell can convert a close click
/// into exactly one release transition.
pub struct InfoPanel {
    title: String,
    body: String,
    visible: bool,
    dismissed: bool,
}

impl InfoPanel {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            visible: false,
            dismissed: false,
        }
    }

    /// Shows the panel
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// User closed the panel
    ///
    /// Hides it and raises the dismissal signal for the next
    /// [`take_dismissed`](Self::take_dismissed) poll.
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.dismissed = true;
    }

    /// Hides the panel without raising a dismissal
    ///
    /// Called from the release path itself, where another release must not
    /// be queued.
    pub fn close(&mut self) {
        self.visible = false;
        self.dismissed = false;
    }

    /// Consumes a pending dismissal, if any
    pub fn take_dismissed(&mut self) -> bool {
        std::mem::take(&mut self.dismissed)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_content(&mut self, title: &str, body: &str) {
        self.title = title.to_string();
        self.body = body.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissal_is_edge_triggered() {
        let mut panel = InfoPanel::new("hola", "");
        panel.open();
        assert!(panel.is_visible());

        panel.dismiss();
        assert!(!panel.is_visible());
        assert!(panel.take_dismissed());
        // Consumed: a second poll sees nothing
        assert!(!panel.take_dismissed());
    }

    #[test]
    fn quiet_close_raises_no_dismissal() {
        let mut panel = InfoPanel::new("hola", "");
        panel.open();
        panel.close();
        assert!(!panel.is_visible());
        assert!(!panel.take_dismissed());
    }
}
