use crate::models::{Language, UserRole};

/// Sidebar destinations. Each carries its path and the roles allowed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Location,
    Bills,
    Campaigns,
    Users,
    Reports,
    Profile,
}

const STAFF: &[UserRole] = &[UserRole::Owner, UserRole::Employee];
const OWNER: &[UserRole] = &[UserRole::Owner];

impl NavItem {
    pub const ALL: [NavItem; 7] = [
        NavItem::Home,
        NavItem::Location,
        NavItem::Bills,
        NavItem::Campaigns,
        NavItem::Users,
        NavItem::Reports,
        NavItem::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            NavItem::Home => "/",
            NavItem::Location => "/location",
            NavItem::Bills => "/bills",
            NavItem::Campaigns => "/campaigns",
            NavItem::Users => "/users",
            NavItem::Reports => "/reports",
            NavItem::Profile => "/profile",
        }
    }

    pub fn roles(&self) -> &'static [UserRole] {
        match self {
            NavItem::Users | NavItem::Reports => OWNER,
            _ => STAFF,
        }
    }

    pub fn label(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (NavItem::Home, Language::En) => "Home",
            (NavItem::Home, Language::Ta) => "முகப்பு",
            (NavItem::Location, Language::En) => "Locations",
            (NavItem::Location, Language::Ta) => "இடங்கள்",
            (NavItem::Bills, Language::En) => "Bills",
            (NavItem::Bills, Language::Ta) => "பில்கள்",
            (NavItem::Campaigns, Language::En) => "Campaigns",
            (NavItem::Campaigns, Language::Ta) => "பிரச்சாரங்கள்",
            (NavItem::Users, Language::En) => "Users",
            (NavItem::Users, Language::Ta) => "பயனர்கள்",
            (NavItem::Reports, Language::En) => "Reports",
            (NavItem::Reports, Language::Ta) => "அறிக்கைகள்",
            (NavItem::Profile, Language::En) => "Profile",
            (NavItem::Profile, Language::Ta) => "சுயவிவரம்",
        }
    }
}

pub fn can_access(role: UserRole, item: NavItem) -> bool {
    item.roles().contains(&role)
}

/// Sidebar entries for a role, in display order.
pub fn visible_nav(role: UserRole) -> Vec<NavItem> {
    NavItem::ALL
        .into_iter()
        .filter(|item| can_access(role, *item))
        .collect()
}
