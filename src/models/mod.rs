pub mod observation;
pub mod series;
pub mod summary;
pub mod forecast;
pub mod zone;
