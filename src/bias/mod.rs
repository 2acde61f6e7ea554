pub mod directory;
pub mod trust;

pub use directory::BiasDirectory;
pub use trust::{Region, TrustTiers};
