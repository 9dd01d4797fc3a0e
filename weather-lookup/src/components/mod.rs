pub mod backdrop_strip;
pub mod help_bar;
pub mod lookup_view;
pub mod notice;
pub mod query_input;
pub mod result_panel;

pub use lookup_dispatch::Component;

pub use backdrop_strip::{BackdropStrip, BackdropStripProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use lookup_view::{LookupView, LookupViewProps, HINT_PREFIX, TITLE};
pub use notice::{centered_rect, NoticeOverlay, NoticeOverlayProps};
pub use query_input::{QueryInput, QueryInputProps, PLACEHOLDER};
pub use result_panel::{ResultPanel, ResultPanelProps, EMPTY_TEXT, SPINNERS};
