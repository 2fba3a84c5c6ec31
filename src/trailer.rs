/// Trailer layer, stacked above everything else. The URL is never kept
/// once dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrailerOverlay {
    #[default]
    Hidden,
    Showing(String),
}

impl TrailerOverlay {
    pub fn show(&mut self, embed_url: String) {
        *self = TrailerOverlay::Showing(embed_url);
    }

    pub fn dismiss(&mut self) -> bool {
        let was_showing = self.is_showing();
        *self = TrailerOverlay::Hidden;
        was_showing
    }

    pub fn is_showing(&self) -> bool {
        matches!(self, TrailerOverlay::Showing(_))
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            TrailerOverlay::Showing(url) => Some(url),
            TrailerOverlay::Hidden => None,
        }
    }
}

pub fn embed_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
