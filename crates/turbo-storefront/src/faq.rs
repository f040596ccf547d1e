//! FAQ accordion: at most one answer open at a time.

/// A `.faq-item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    /// Measured `scrollHeight` of the answer, in pixels.
    pub scroll_height: u32,
    /// Inline `max-height` of the answer; `None` means collapsed.
    pub max_height: Option<u32>,
    pub active: bool,
    clickable: bool,
}

impl FaqItem {
    /// An item with both a question and an answer.
    pub fn new(scroll_height: u32) -> Self {
        Self {
            scroll_height,
            max_height: None,
            active: false,
            clickable: true,
        }
    }

    /// An item missing its question or answer. It is closed along with the
    /// others but cannot be opened.
    pub fn incomplete() -> Self {
        Self {
            clickable: false,
            ..Self::new(0)
        }
    }

    /// Rendered already open.
    pub fn with_active(mut self) -> Self {
        self.active = true;
        self.max_height = Some(self.scroll_height);
        self
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqAccordion {
    items: Vec<FaqItem>,
}

impl FaqAccordion {
    /// Returns `None` for a page without FAQ items.
    pub fn new(items: Vec<FaqItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    /// Question click.
    ///
    /// Closes every item, then reopens the clicked one unless it was the open
    /// one. Returns `false` if the index is out of range or the item is not
    /// clickable.
    pub fn toggle(&mut self, index: usize) -> bool {
        let was_open = match self.items.get(index) {
            Some(item) if item.clickable => item.active,
            _ => return false,
        };

        for item in &mut self.items {
            item.active = false;
            item.max_height = None;
        }

        if !was_open {
            let item = &mut self.items[index];
            item.active = true;
            item.max_height = Some(item.scroll_height);
        }
        true
    }

    pub fn open_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.active)
    }

    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accordion() -> FaqAccordion {
        FaqAccordion::new(vec![FaqItem::new(120), FaqItem::new(80), FaqItem::new(200)]).unwrap()
    }

    #[test]
    fn test_empty_page_has_no_accordion() {
        assert!(FaqAccordion::new(Vec::new()).is_none());
    }

    #[test]
    fn test_open_sets_max_height() {
        let mut faq = accordion();
        assert!(faq.toggle(0));
        assert_eq!(faq.open_index(), Some(0));
        assert_eq!(faq.items()[0].max_height, Some(120));
    }

    #[test]
    fn test_second_click_switches_item() {
        let mut faq = accordion();
        faq.toggle(0);
        faq.toggle(1);

        assert_eq!(faq.open_index(), Some(1));
        assert_eq!(faq.items()[0].max_height, None);
        assert!(!faq.items()[0].active);
        assert_eq!(faq.items()[1].max_height, Some(80));
    }

    #[test]
    fn test_clicking_open_item_closes_it() {
        let mut faq = accordion();
        faq.toggle(2);
        faq.toggle(2);

        assert_eq!(faq.open_index(), None);
        assert!(faq.items().iter().all(|i| i.max_height.is_none()));
    }

    #[test]
    fn test_incomplete_item_is_inert() {
        let mut faq =
            FaqAccordion::new(vec![FaqItem::new(50).with_active(), FaqItem::incomplete()]).unwrap();

        assert!(!faq.toggle(1));
        assert!(!faq.toggle(7));
        assert_eq!(faq.open_index(), Some(0));
    }
}
