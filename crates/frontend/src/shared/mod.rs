pub mod api;
pub mod api_utils;
pub mod config;
pub mod confirm;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod multi_select;
pub mod notifications;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod permission_matrix;
