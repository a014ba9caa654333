use crate::core::locale;
use crate::screen::ExternalAction;

/// Side menu entries; each one hands off to a screen outside this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    Settings,
    History,
    Contact,
    About,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Settings,
        MenuItem::History,
        MenuItem::Contact,
        MenuItem::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Settings => locale::MENU_SETTINGS,
            MenuItem::History => locale::MENU_HISTORY,
            MenuItem::Contact => locale::MENU_CONTACT,
            MenuItem::About => locale::MENU_ABOUT,
        }
    }

    /// Icon file name inside the menu icon directory
    pub fn icon(self) -> &'static str {
        match self {
            MenuItem::Settings => "setting.png",
            MenuItem::History => "history.png",
            MenuItem::Contact => "contact.png",
            MenuItem::About => "info.png",
        }
    }

    /// Name of the external action the host routes on
    pub fn action_name(self) -> &'static str {
        match self {
            MenuItem::Settings => "settings",
            MenuItem::History => "alert_history",
            MenuItem::Contact => "contact",
            MenuItem::About => "about",
        }
    }
}

#[derive(Debug, Default)]
pub struct SideMenu {
    open: bool,
}

impl SideMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Closes the menu and names the action to run
    pub fn select(&mut self, item: MenuItem) -> ExternalAction {
        self.open = false;
        log::info!("Menu item {} selected", item.action_name());
        ExternalAction::Menu(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_closes_menu() {
        let mut menu = SideMenu::default();
        menu.toggle();
        assert!(menu.is_open());

        let action = menu.select(MenuItem::History);
        assert_eq!(action, ExternalAction::Menu(MenuItem::History));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = MenuItem::ALL.iter().map(|item| item.label()).collect();
        assert_eq!(
            labels,
            vec!["הגדרות", "היסטוריית התרעות", "צרו עמנו קשר", "אודות היישומון"]
        );
    }
}
