pub mod coordinates;
pub mod drivers;
pub mod places;
pub mod trips;
