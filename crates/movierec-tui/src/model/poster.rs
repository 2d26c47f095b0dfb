use std::collections::HashMap;

use image::DynamicImage;
use image::imageops::FilterType;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use movierec_core::{MovieId, PosterHandle, PosterSlot};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "\u{2580}";

/// Which pane a poster result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosterTarget {
    Catalog,
    Recommendations,
}

/// A poster slot plus its rendered character art.
///
/// Art is cached per (movie, width, height) and evicted when the backend
/// reports the poster resource as released.
#[derive(Debug)]
pub struct PosterPane {
    pub target: PosterTarget,
    slot: PosterSlot,
    art: HashMap<(MovieId, u16, u16), Vec<Line<'static>>>,
}

impl PosterPane {
    pub fn new(target: PosterTarget) -> Self {
        Self {
            target,
            slot: PosterSlot::new(),
            art: HashMap::new(),
        }
    }

    /// Point the pane at `movie_id`. Returns the generation to fetch under,
    /// or `None` if the pane already shows that movie.
    pub fn show(&mut self, movie_id: MovieId) -> Option<u64> {
        self.slot.request(movie_id)
    }

    pub fn complete(&mut self, generation: u64, poster: Option<PosterHandle>) -> bool {
        self.slot.complete(generation, poster)
    }

    /// Tear down: drop the held poster and forget in-flight loads.
    pub fn clear(&mut self) {
        self.slot.clear();
        self.art.clear();
    }

    /// Drop cached art for a released poster, unless the pane still
    /// displays that movie through a newer handle.
    pub fn evict(&mut self, movie_id: MovieId) {
        if self.slot.displayed().map(|p| p.movie_id()) == Some(movie_id) {
            return;
        }
        self.art.retain(|(id, _, _), _| *id != movie_id);
    }

    #[cfg(test)]
    pub(crate) fn has_art(&self, movie_id: MovieId) -> bool {
        self.art.keys().any(|(id, _, _)| *id == movie_id)
    }

    pub fn slot(&self) -> &PosterSlot {
        &self.slot
    }

    /// Character art for the displayed poster at `width` x `height` cells.
    pub fn art(&mut self, width: u16, height: u16) -> Option<&[Line<'static>]> {
        if width == 0 || height == 0 {
            return None;
        }
        let handle = self.slot.displayed()?;
        let lines = self
            .art
            .entry((handle.movie_id(), width, height))
            .or_insert_with(|| half_block_lines(handle.image(), width, height));
        Some(lines.as_slice())
    }
}

/// Render `image` as half-block art fitted inside `width` x `height` cells,
/// centered horizontally.
pub fn half_block_lines(image: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    let fitted = image
        .resize(u32::from(width), u32::from(height) * 2, FilterType::Triangle)
        .to_rgb8();
    let (w, h) = fitted.dimensions();
    let pad = " ".repeat((u32::from(width).saturating_sub(w) / 2) as usize);

    (0..h)
        .step_by(2)
        .map(|y| {
            let mut spans = Vec::with_capacity(w as usize + 1);
            if !pad.is_empty() {
                spans.push(Span::raw(pad.clone()));
            }
            for x in 0..w {
                let top = fitted.get_pixel(x, y);
                let mut style = Style::default().fg(Color::Rgb(top[0], top[1], top[2]));
                if y + 1 < h {
                    let bottom = fitted.get_pixel(x, y + 1);
                    style = style.bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
                spans.push(Span::styled(HALF_BLOCK, style));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(rgb)))
    }

    #[test]
    fn square_image_fills_two_rows_per_line() {
        let lines = half_block_lines(&solid(8, 8, [200, 10, 10]), 4, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 4);
        assert_eq!(lines[0].spans[0].content, HALF_BLOCK);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(200, 10, 10)));
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Rgb(200, 10, 10)));
    }

    #[test]
    fn tall_image_is_centered() {
        // 1:3 poster into a 9x3 cell box -> 2x6 pixels, padded by 3 columns.
        let lines = half_block_lines(&solid(10, 30, [0, 0, 0]), 9, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[0].content, "   ");
        assert_eq!(lines[0].spans.len(), 3);
    }

    #[test]
    fn art_only_for_displayed_movie() {
        let mut pane = PosterPane::new(PosterTarget::Catalog);
        assert!(pane.art(10, 5).is_none());

        let generation = pane.show(3).unwrap();
        let handle = PosterHandle::from_image(3, solid(4, 4, [1, 2, 3]), None);
        assert!(pane.complete(generation, Some(handle)));
        assert!(pane.art(4, 2).is_some());
        assert_eq!(pane.art.len(), 1);

        pane.show(4);
        assert!(pane.art(4, 2).is_none());
        pane.evict(3);
        assert!(pane.art.is_empty());
    }

    #[test]
    fn evict_keeps_art_still_on_screen() {
        let mut pane = PosterPane::new(PosterTarget::Recommendations);
        let generation = pane.show(3).unwrap();
        let handle = PosterHandle::from_image(3, solid(4, 4, [9, 9, 9]), None);
        pane.complete(generation, Some(handle));
        assert!(pane.art(4, 2).is_some());

        // A superseded handle for the same movie was freed
        pane.evict(3);
        assert!(pane.has_art(3));
    }
}
