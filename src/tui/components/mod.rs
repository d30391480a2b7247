// Components: pieces of the shell drawn in every view
//
// - Title bar: app name, current view, loading spinner
// - Status bar: key hints, uptime, event count
// - Toast: short-lived notification in the bottom-right corner
// - Scrollbar: shared by the listing, overlay and log panel

pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
