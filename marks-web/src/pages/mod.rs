mod dashboard;
mod landing;
mod layout;

pub use dashboard::Dashboard;
pub use landing::Landing;
pub use layout::AppLayout;
