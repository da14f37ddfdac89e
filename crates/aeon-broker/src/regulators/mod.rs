//! Reference regulators

pub mod biology;
pub mod ecology;
pub mod entropy;
pub mod physics;
pub mod planetary;
pub mod social;
pub mod technology;

pub use biology::BiologyRegulator;
pub use ecology::EcologyRegulator;
pub use entropy::EntropyRegulator;
pub use physics::PhysicsRegulator;
pub use planetary::PlanetaryRegulator;
pub use social::SocialRegulator;
pub use technology::TechnologyRegulator;
