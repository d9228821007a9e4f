mod footer_bar;
mod input;

pub use footer_bar::{FooterBar, FooterBarStyle};
pub use input::TextInput;
