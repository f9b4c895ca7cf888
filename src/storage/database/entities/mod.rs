/// Club entity module
pub mod club;
/// Event entity module
pub mod event;
/// Gallery image entity module
pub mod gallery_image;
/// Refresh token entity module
pub mod refresh_token;
/// Registration entity module
pub mod registration;
/// User entity module
pub mod user;

pub use club::Entity as Club;
pub use event::Entity as Event;
pub use gallery_image::Entity as GalleryImage;
pub use refresh_token::Entity as RefreshToken;
pub use registration::Entity as Registration;
pub use user::Entity as User;
