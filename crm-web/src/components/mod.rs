pub(crate) mod field;
pub(crate) mod header_nav_item;
pub(crate) mod loading;
pub(crate) mod status_badge;
