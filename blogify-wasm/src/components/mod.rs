pub(crate) mod category_page;
pub(crate) mod footer;
pub(crate) mod home;
pub(crate) mod login_page;
pub(crate) mod navbar;
pub(crate) mod post_detail;
pub(crate) mod register_page;
pub(crate) mod sidebar;
