//! Poster images and the per-pane slot that owns them.
//!
//! A [`PosterHandle`] is a decoded image tied to one movie. Its resource is
//! released when the last clone is dropped, which runs the optional release
//! hook exactly once. A [`PosterSlot`] holds at most one handle for display
//! and keeps the superseded one alive until its replacement is established.

use std::fmt;
use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, trace};

use crate::MovieId;
use crate::api::MovieApi;

/// Called with the movie id when a poster resource is freed.
pub type ReleaseHook = Arc<dyn Fn(MovieId) + Send + Sync>;

struct PosterResource {
    movie_id: MovieId,
    image: DynamicImage,
    on_release: Option<ReleaseHook>,
}

impl Drop for PosterResource {
    fn drop(&mut self) {
        trace!(movie_id = self.movie_id, "Releasing poster");
        if let Some(hook) = &self.on_release {
            hook(self.movie_id);
        }
    }
}

/// Shared handle to a decoded poster.
#[derive(Clone)]
pub struct PosterHandle(Arc<PosterResource>);

impl PosterHandle {
    pub fn from_image(movie_id: MovieId, image: DynamicImage, on_release: Option<ReleaseHook>) -> Self {
        Self(Arc::new(PosterResource {
            movie_id,
            image,
            on_release,
        }))
    }

    /// Decode raw image bytes (format sniffed from the content).
    pub fn decode(
        movie_id: MovieId,
        bytes: &[u8],
        on_release: Option<ReleaseHook>,
    ) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(movie_id, image, on_release))
    }

    pub fn movie_id(&self) -> MovieId {
        self.0.movie_id
    }

    pub fn image(&self) -> &DynamicImage {
        &self.0.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.0.image.width(), self.0.image.height())
    }
}

impl fmt::Debug for PosterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosterHandle")
            .field("movie_id", &self.0.movie_id)
            .field("size", &self.dimensions())
            .finish()
    }
}

/// Fetch and decode the poster for `movie_id`.
///
/// Any failure (HTTP error, transport error, undecodable bytes) yields `None`
/// so the caller can show its fallback.
pub async fn load_poster(
    api: &dyn MovieApi,
    movie_id: MovieId,
    on_release: Option<ReleaseHook>,
) -> Option<PosterHandle> {
    let bytes = match api.get_poster(movie_id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(movie_id, error = %e, "Poster unavailable");
            return None;
        }
    };

    let decoded = tokio::task::spawn_blocking(move || {
        PosterHandle::decode(movie_id, &bytes, on_release)
    })
    .await;

    match decoded {
        Ok(Ok(handle)) => Some(handle),
        Ok(Err(e)) => {
            debug!(movie_id, error = %e, "Poster could not be decoded");
            None
        }
        Err(e) => {
            debug!(movie_id, error = %e, "Poster decode task failed");
            None
        }
    }
}

#[derive(Debug, Default)]
pub enum PosterState {
    #[default]
    Empty,
    Loading,
    Ready(PosterHandle),
    /// No poster for this movie; render the fallback.
    Missing,
}

/// The single poster a pane is showing.
///
/// Results are matched to requests by generation, so a late result for an id
/// the slot has moved away from is released without ever being displayed.
#[derive(Debug, Default)]
pub struct PosterSlot {
    movie_id: Option<MovieId>,
    generation: u64,
    state: PosterState,
    /// Handle being replaced; released once the new result lands.
    previous: Option<PosterHandle>,
}

impl PosterSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the slot at `movie_id`. Returns the generation to load it under,
    /// or `None` when the slot already shows that movie.
    pub fn request(&mut self, movie_id: MovieId) -> Option<u64> {
        if self.movie_id == Some(movie_id) {
            return None;
        }
        self.movie_id = Some(movie_id);
        self.generation += 1;
        if let PosterState::Ready(handle) = std::mem::replace(&mut self.state, PosterState::Loading) {
            self.previous = Some(handle);
        }
        Some(self.generation)
    }

    /// Install the result of the load started under `generation`. Returns
    /// `false` if it was stale and has been dropped.
    pub fn complete(&mut self, generation: u64, handle: Option<PosterHandle>) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Dropping stale poster"
            );
            return false;
        }
        self.state = match handle {
            Some(handle) => PosterState::Ready(handle),
            None => PosterState::Missing,
        };
        self.previous = None;
        true
    }

    /// Tear down: release everything and ignore in-flight results.
    pub fn clear(&mut self) {
        self.movie_id = None;
        self.generation += 1;
        self.state = PosterState::Empty;
        self.previous = None;
    }

    /// The handle to draw, if the slot's current movie has one.
    pub fn displayed(&self) -> Option<&PosterHandle> {
        match &self.state {
            PosterState::Ready(handle) if Some(handle.movie_id()) == self.movie_id => Some(handle),
            _ => None,
        }
    }

    pub fn movie_id(&self) -> Option<MovieId> {
        self.movie_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &PosterState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PosterState::Loading)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.state, PosterState::Missing)
    }
}
