//! Monthly KPI forecasting with a seeded random-forest regressor.
//!
//! Accounts and KPI names are label-encoded, combined with the calendar
//! period into a numeric feature row, and fed to an ensemble of CART
//! regression trees. Future rows are generated only for (account, KPI)
//! pairs that occur in the history.

pub mod encoder;
pub mod error;
pub mod expand;
pub mod features;
pub mod forest;
pub mod metrics;
pub mod pipeline;
pub mod split;
pub mod tree;

pub use encoder::CategoricalEncoder;
pub use error::{ForecastError, Result};
pub use expand::{FutureRow, expand_future, observed_pairs};
pub use features::{EncodedRecord, FEATURE_NAMES, FeatureEncoder, FeatureRow, N_FEATURES};
pub use forest::{ForestParams, RandomForestRegressor};
pub use metrics::{EvaluationMetrics, mean_absolute_error, r_squared, root_mean_squared_error};
pub use pipeline::{
    ForecastOutcome, TrainedForecaster, merge, run_forecast, run_forecast_with_progress, train,
};
pub use split::{TrainTestSplit, train_test_split};
pub use tree::{RegressionTree, TreeNode, TreeParams};
