use crate::models::{MovieDetail, StreamingOffer};

/// Movie detail modal. Only ever holds a detail that actually loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailDisclosure {
    #[default]
    Closed,
    Basic(Box<MovieDetail>),
    Extended(Box<MovieDetail>),
}

impl DetailDisclosure {
    /// A freshly loaded detail always opens on the basic tier, replacing
    /// whatever was shown.
    pub fn show(&mut self, detail: MovieDetail) {
        *self = DetailDisclosure::Basic(Box::new(detail));
    }

    pub fn expand(&mut self) -> bool {
        match std::mem::take(self) {
            DetailDisclosure::Basic(detail) => {
                *self = DetailDisclosure::Extended(detail);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    pub fn collapse(&mut self) -> bool {
        match std::mem::take(self) {
            DetailDisclosure::Extended(detail) => {
                *self = DetailDisclosure::Basic(detail);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = DetailDisclosure::Closed;
        was_open
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DetailDisclosure::Closed)
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, DetailDisclosure::Extended(_))
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            DetailDisclosure::Closed => None,
            DetailDisclosure::Basic(detail) | DetailDisclosure::Extended(detail) => Some(detail),
        }
    }

    /// Streaming offer at 0-based `index` of the open detail.
    pub fn offer(&self, index: usize) -> Option<&StreamingOffer> {
        self.detail().and_then(|d| d.streaming.get(index))
    }
}
