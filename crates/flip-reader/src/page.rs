/// Pixel content of a page, or an opaque asset reference for static pages
/// (the synthetic cover, the loading indicator). Asset identifiers are passed
/// through to the presentation layer uninterpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum PageImage {
    Rgba {
        data: Vec<u8>,
        width: u32,
        height: u32,
    },
    Asset(String),
}

/// One entry of the published sequence. Ordinal 0 is reserved for the
/// synthetic cover; 1..N are document pages in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub ordinal: usize,
    pub image: PageImage,
    /// Width / height of the rendered content, always positive.
    pub aspect_ratio: f32,
    pub is_cover: bool,
}

/// Accumulates rendered document pages. Owned exclusively by the render
/// pipeline; nothing escapes until `publish` prepends the cover and freezes
/// the sequence.
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    pages: Vec<Page>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next document page. Ordinals are assigned here, so pages
    /// cannot be inserted out of order.
    pub fn push(&mut self, image: PageImage, aspect_ratio: f32) {
        let ordinal = self.pages.len() + 1;
        self.pages.push(Page {
            ordinal,
            image,
            aspect_ratio,
            is_cover: false,
        });
    }

    pub fn rendered_pages(&self) -> usize {
        self.pages.len()
    }

    /// Aspect ratio of the first rendered page, used for the cover.
    pub fn first_aspect(&self) -> Option<f32> {
        self.pages.first().map(|page| page.aspect_ratio)
    }

    pub fn publish(self, cover: Page) -> PageSequence {
        debug_assert!(cover.is_cover && cover.ordinal == 0);
        let mut pages = Vec::with_capacity(self.pages.len() + 1);
        pages.push(cover);
        pages.extend(self.pages);
        PageSequence { pages }
    }
}

/// Ordered, immutable-once-published list of pages. Shared read-only after
/// publication.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSequence {
    pages: Vec<Page>,
}

impl PageSequence {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&Page> {
        self.pages.get(ordinal)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> PageImage {
        PageImage::Rgba {
            data: vec![0xff; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[test]
    fn test_builder_assigns_contiguous_ordinals() {
        let mut builder = SequenceBuilder::new();
        builder.push(blank(10, 14), 10.0 / 14.0);
        builder.push(blank(10, 12), 10.0 / 12.0);
        builder.push(blank(10, 10), 1.0);

        let sequence = builder.publish(Page {
            ordinal: 0,
            image: PageImage::Asset("cover.png".into()),
            aspect_ratio: 10.0 / 14.0,
            is_cover: true,
        });

        assert_eq!(sequence.len(), 4);
        for (i, page) in sequence.pages().iter().enumerate() {
            assert_eq!(page.ordinal, i);
        }
    }

    #[test]
    fn test_publish_puts_single_cover_first() {
        let mut builder = SequenceBuilder::new();
        builder.push(blank(8, 8), 1.0);
        let sequence = builder.publish(Page {
            ordinal: 0,
            image: PageImage::Asset("cover.png".into()),
            aspect_ratio: 1.0,
            is_cover: true,
        });

        let covers: Vec<_> = sequence.pages().iter().filter(|p| p.is_cover).collect();
        assert_eq!(covers.len(), 1);
        assert_eq!(covers[0].ordinal, 0);
        assert!(sequence.get(0).unwrap().is_cover);
        assert!(!sequence.get(1).unwrap().is_cover);
    }
}
