//! MyAnimeList API model types and endpoint methods.

mod anime;
mod detail;
mod projection;
mod ranking;
mod season;

pub use anime::*;
pub use detail::*;
pub use projection::*;
pub use ranking::*;
pub use season::*;
