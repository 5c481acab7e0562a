// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AccountStatus, Bounds, Choice, Customer, EmploymentType, Gender, Importance, MaritalStatus,
    PartnerFilter, PublicProfile, Religion,
};
pub use requests::{CustomerInput, MatchPairRequest, PageQuery, SearchQuery};
pub use responses::{
    CustomerPageResponse, ErrorResponse, HealthResponse, InsightsResponse, MatchesResponse,
    SendMatchResponse,
};
