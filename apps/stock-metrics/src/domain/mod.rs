//! Domain types for the stock recommendation service.
//!
//! Plain data shapes exchanged with the request layer and the reporting
//! layer. Field names serialize in camelCase and enum values in
//! SCREAMING_SNAKE_CASE.

pub mod common;
pub mod enums;
pub mod performance;
pub mod recommendation;
pub mod stock;
pub mod user;

pub use common::{ApiResponse, DateRange, PaginatedResponse, PaginationParams, SortOrder};
pub use enums::{
    AnalysisType, ExperienceLevel, ParseEnumError, PatternType, RecommendationStatus,
    RecommendationType, RiskLevel,
};
pub use performance::{
    PerformanceMetrics, PerformanceReport, PortfolioValue, RecommendationCounts,
    RecommendationPerformance, ReturnBreakdown, TradeData, TradeStatus,
};
pub use recommendation::{RecommendationRequest, StockRecommendation};
pub use stock::{PricePoint, StockPriceHistory};
pub use user::{InvestmentStyle, NotificationSettings, UserPreferences, UserProfile};
