use log::debug;

use crate::clients::artwork::DecodedImage;

/// Proof of which assignment a fetch was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    url: String,
}

impl FetchTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// The image destination of one reusable cell.
///
/// Every [`assign`](ArtworkSlot::assign) bumps a generation token and clears
/// the image, so a delivery carrying an older ticket is rejected.
#[derive(Debug, Default)]
pub struct ArtworkSlot {
    token: u64,
    url: Option<String>,
    image: Option<DecodedImage>,
}

impl ArtworkSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the slot at `url`, dropping the previous image synchronously.
    ///
    /// Returns the ticket to fetch with, or `None` if there is nothing to fetch.
    pub fn assign(&mut self, url: Option<&str>) -> Option<FetchTicket> {
        self.token += 1;
        self.image = None;
        self.url = url.map(str::to_owned);
        self.url.as_ref().map(|url| FetchTicket {
            token: self.token,
            url: url.clone(),
        })
    }

    /// Apply a finished fetch if `ticket` still matches the current assignment.
    pub fn deliver(&mut self, ticket: &FetchTicket, image: DecodedImage) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale artwork for {} (ticket {}, slot at {})",
                ticket.url, ticket.token, self.token
            );
            return false;
        }
        self.image = Some(image);
        true
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.token == self.token && self.url.as_deref() == Some(ticket.url.as_str())
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }
}
