pub mod click;
pub mod scroll;

pub use click::wire_clicks;
pub use scroll::wire_scroll;
