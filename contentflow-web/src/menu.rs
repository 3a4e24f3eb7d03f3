/// Visibility of the per-post action dropdowns on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMenus {
    hidden: Vec<bool>,
}

impl PostMenus {
    /// `count` menus, all hidden
    pub fn new(count: usize) -> Self {
        Self {
            hidden: vec![true; count],
        }
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.hidden.get(index).map(|hidden| !hidden).unwrap_or(false)
    }

    /// Index of the open menu, if any
    pub fn open_menu(&self) -> Option<usize> {
        self.hidden.iter().position(|hidden| !hidden)
    }

    /// Toggle button click: hide every menu, then show `index` unless it was
    /// the one already open
    pub fn toggle(&mut self, index: usize) {
        let Some(was_open) = self.hidden.get(index).map(|hidden| !hidden) else {
            return;
        };
        self.hide_all();
        self.hidden[index] = was_open;
    }

    /// Document-level click. Clicks inside a menu wrapper (including its
    /// toggle button) leave the menus alone.
    pub fn handle_document_click(&mut self, inside_menu: bool) {
        if !inside_menu {
            self.hide_all();
        }
    }

    pub fn hide_all(&mut self) {
        self.hidden.iter_mut().for_each(|hidden| *hidden = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut menus = PostMenus::new(3);
        menus.toggle(1);
        assert_eq!(menus.open_menu(), Some(1));
        menus.toggle(1);
        assert_eq!(menus.open_menu(), None);
    }

    #[test]
    fn test_opening_one_menu_closes_the_other() {
        let mut menus = PostMenus::new(3);
        menus.toggle(0);
        menus.toggle(2);
        assert!(!menus.is_open(0));
        assert!(menus.is_open(2));
    }

    #[test]
    fn test_outside_click_closes_everything() {
        let mut menus = PostMenus::new(2);
        menus.toggle(0);
        menus.handle_document_click(true);
        assert!(menus.is_open(0));
        menus.handle_document_click(false);
        assert_eq!(menus.open_menu(), None);
    }

    #[test]
    fn test_out_of_range_toggle_is_ignored() {
        let mut menus = PostMenus::new(1);
        menus.toggle(0);
        menus.toggle(5);
        assert!(menus.is_open(0));
        assert!(!menus.is_open(5));
    }
}
