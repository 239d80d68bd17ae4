use ratatui::layout::Rect;

/// Watches the layout rectangle the visualizer is drawn into.
#[derive(Debug)]
pub struct ResizeWatcher {
    observed: Option<Rect>,
    connected: bool,
}

impl ResizeWatcher {
    pub fn new() -> Self {
        Self {
            observed: None,
            connected: true,
        }
    }

    /// Record `area`; true when its size differs from the last observation.
    /// Always false once disconnected.
    pub fn observe(&mut self, area: Rect) -> bool {
        if !self.connected {
            return false;
        }
        let changed = self
            .observed
            .map(|prev| prev.width != area.width || prev.height != area.height)
            .unwrap_or(true);
        self.observed = Some(area);
        changed
    }

    #[cfg(test)]
    pub fn observed(&self) -> Option<Rect> {
        self.observed
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
        self.observed = None;
    }

    #[cfg(test)]
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}
