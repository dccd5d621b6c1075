//! The host document around the hero: scroll lock and hero positioning.
//!
//! While the scrub runs the document is locked (`overflow: hidden`) and the
//! hero is pinned.  Completion flips both, once, and from then on the wheel
//! scrolls the document like any other page.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Hidden,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroPosition {
    /// Hero fills the viewport and does not move.
    #[default]
    Fixed,
    /// Hero sits at the top of the document and scrolls away with it.
    Relative,
}

#[derive(Debug, Clone, Default)]
pub struct HostPage {
    overflow: Overflow,
    hero_position: HeroPosition,
    /// Rows scrolled past the top of the document.
    scroll_offset: u16,
}

impl HostPage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn hero_position(&self) -> HeroPosition {
        self.hero_position
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.overflow == Overflow::Hidden
    }

    /// Unlock scrolling and unpin the hero.  Returns `false` if the page was
    /// already released.
    pub fn release(&mut self) -> bool {
        if self.overflow == Overflow::Auto {
            return false;
        }
        self.overflow = Overflow::Auto;
        self.hero_position = HeroPosition::Relative;
        true
    }

    /// Scroll the document by `rows`, bounded to `[0, max_offset]`.  Does
    /// nothing while the page is locked.
    pub fn scroll_by(&mut self, rows: i32, max_offset: u16) {
        if self.is_scroll_locked() {
            return;
        }
        let next = (self.scroll_offset as i32 + rows).clamp(0, max_offset as i32);
        self.scroll_offset = next as u16;
    }

    /// Re-clamp after the document got shorter (e.g. on resize).
    pub fn clamp_offset(&mut self, max_offset: u16) {
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_page_ignores_scroll() {
        let mut page = HostPage::new();
        page.scroll_by(5, 100);
        assert_eq!(page.scroll_offset(), 0);
        assert!(page.is_scroll_locked());
        assert_eq!(page.hero_position(), HeroPosition::Fixed);
    }

    #[test]
    fn release_flips_once() {
        let mut page = HostPage::new();
        assert!(page.release());
        assert!(!page.release());
        assert_eq!(page.overflow(), Overflow::Auto);
        assert_eq!(page.hero_position(), HeroPosition::Relative);
    }

    #[test]
    fn released_page_scrolls_within_bounds() {
        let mut page = HostPage::new();
        page.release();
        page.scroll_by(3, 10);
        assert_eq!(page.scroll_offset(), 3);
        page.scroll_by(50, 10);
        assert_eq!(page.scroll_offset(), 10);
        page.scroll_by(-4, 10);
        assert_eq!(page.scroll_offset(), 6);
        page.scroll_by(-40, 10);
        assert_eq!(page.scroll_offset(), 0);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut page = HostPage::new();
        page.release();
        page.scroll_by(8, 10);
        page.clamp_offset(5);
        assert_eq!(page.scroll_offset(), 5);
    }
}
