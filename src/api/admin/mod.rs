pub mod client;
pub mod models;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use client::AdminApiClient;
pub use models::{
    ApiError, CollectionResponse, CouponForm, DashboardStats, DeleteResponse, GeneralSettings,
    PointsRuleForm, UserDetails, WriteMethod,
};
pub use transport::AdminTransport;
