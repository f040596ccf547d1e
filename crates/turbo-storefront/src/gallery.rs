//! Product image gallery.

/// A `.product-thumb` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Full-size image URL (`data-image`).
    pub image: String,
    pub active: bool,
}

impl Thumbnail {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            active: false,
        }
    }

    /// Mark as the thumbnail rendered active.
    pub fn with_active(mut self) -> Self {
        self.active = true;
        self
    }
}

/// Main product image plus its thumbnail strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryWidget {
    main_image: String,
    thumbnails: Vec<Thumbnail>,
}

impl GalleryWidget {
    /// Returns `None` when there are no thumbnails to switch between.
    pub fn new(main_image: impl Into<String>, thumbnails: Vec<Thumbnail>) -> Option<Self> {
        if thumbnails.is_empty() {
            return None;
        }
        Some(Self {
            main_image: main_image.into(),
            thumbnails,
        })
    }

    /// Thumbnail click: show its image and make it the only active one.
    ///
    /// Returns `false` for an index past the end of the strip.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(image) = self.thumbnails.get(index).map(|t| t.image.clone()) else {
            return false;
        };

        self.main_image = image;
        for (i, thumb) in self.thumbnails.iter_mut().enumerate() {
            thumb.active = i == index;
        }
        true
    }

    /// Current `src` of `#mainProductImage`.
    pub fn main_image(&self) -> &str {
        &self.main_image
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn active_index(&self) -> Option<usize> {
        self.thumbnails.iter().position(|t| t.active)
    }
}
