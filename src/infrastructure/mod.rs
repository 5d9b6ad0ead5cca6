pub mod page_driver;
pub mod session;

pub use page_driver::PageDriver;
pub use session::BrowserSession;
