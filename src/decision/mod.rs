//! Investment decision policy and guidance

mod policy;
mod recommend;

pub use policy::{CriteriaCheck, Criterion, Decision, DecisionEngine};
pub use recommend::{
    Comparison, Preference, Recommendation, RecommendationGenerator, AFFIRMATIVE_MESSAGE,
};
