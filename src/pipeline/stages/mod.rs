pub mod aggregation;
pub mod filtering;
pub mod normalize;
pub mod population;
pub mod ranking;
pub mod year;
