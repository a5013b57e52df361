pub mod analysis;
pub mod development;
pub mod sensitivity;
