pub mod bilbasen;
pub mod bilhandel;
pub mod browser;
pub mod discover;
pub mod extract;
pub mod http;
pub mod traits;
pub mod types;

pub use browser::BrowserNavigator;
pub use discover::{discover, listing_id, Candidate};
pub use extract::extract;
pub use http::HttpNavigator;
pub use traits::Navigator;
pub use types::{FieldRules, IndexQuery, SiteProfile, SiteTarget};
