mod dashboard;
pub use dashboard::{AdminDashboard, UserDashboard};

mod entities;
pub use entities::EntityPage;

mod landing;
pub use landing::Landing;

mod profile;
pub use profile::UserProfile;

mod sign_in;
pub use sign_in::{AdminSignIn, UserSignIn};

mod status;
pub use status::{NotFound, Unauthorized};
