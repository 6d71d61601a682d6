pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    ArticleRanking, CountryYearAggregate, CountryYearPopulation, EngagementMetric, RawRecord,
    Region, RegionYearAggregate, RegionYearPopulation, Year,
};
