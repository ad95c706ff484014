pub mod side;
pub mod snippet;
pub mod well_formed;
