use std::time::Duration;

use image::RgbaImage;
use log::debug;

use crate::clients::errors::Result;
use crate::clients::itunes::{default_http_client, http_client};
use crate::context::MainHandle;
use crate::presentation::slot::{ArtworkSlot, FetchTicket};

pub type DecodedImage = RgbaImage;

/// Downloads and decodes artwork off the primary context.
///
/// Nothing is cached: the same URL is fetched again every time a cell asks.
#[derive(Debug, Clone)]
pub struct ArtworkLoader {
    http: reqwest::Client,
}

impl ArtworkLoader {
    pub fn new(http: reqwest::Client) -> Self {
        ArtworkLoader { http }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self::new(http_client(timeout)?))
    }

    pub async fn fetch_image(&self, url: &str) -> Result<DecodedImage> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let image = image::load_from_memory(&bytes)?;
        Ok(image.to_rgba8())
    }

    /// Fetch `ticket`'s URL in the background and hand the image to the slot
    /// picked by `slot` on the primary context.
    ///
    /// The slot re-checks the ticket on delivery, so a cell that was reused
    /// meanwhile keeps its newer artwork. Failures are dropped silently.
    pub fn request<S, F>(&self, handle: &MainHandle<S>, ticket: FetchTicket, slot: F)
    where
        S: 'static,
        F: FnOnce(&mut S) -> Option<&mut ArtworkSlot> + Send + 'static,
    {
        let loader = self.clone();
        let handle = handle.clone();
        tokio::spawn(async move {
            match loader.fetch_image(ticket.url()).await {
                Ok(image) => {
                    handle.dispatch(move |state| {
                        if let Some(slot) = slot(state) {
                            slot.deliver(&ticket, image);
                        }
                    });
                }
                Err(e) => debug!("Artwork for {} not loaded: {e}", ticket.url()),
            }
        });
    }
}

impl Default for ArtworkLoader {
    fn default() -> Self {
        Self::new(default_http_client())
    }
}
