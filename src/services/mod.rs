//! Advisory helpers that sit beside the core analysis: GST registration,
//! working-capital advice, a linear forecast and keyword bookkeeping.

pub mod bookkeeping;
pub mod forecast;
pub mod gst;
pub mod working_capital;

pub use bookkeeping::{Category, CategorizedTransaction, categorize_transactions};
pub use forecast::{DEFAULT_GROWTH_RATE, Forecast, forecast_financials};
pub use gst::{DEFAULT_GST_THRESHOLD, GstStatus, check_gst_compliance};
pub use working_capital::{WorkingCapitalStatus, working_capital_analysis};
