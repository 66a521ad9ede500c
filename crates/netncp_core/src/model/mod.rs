mod ids;
mod records;
mod shape;

pub use ids::{ForestTypeId, GroupId, IndicatorId, NcpId};
pub use records::{
    BenefitRecord, IndicatorRecord, NetNcpReplicate, NetNcpSummary, RealisedSupply, SupplyRecord,
    WeightedScore,
};
pub use shape::SbShape;
