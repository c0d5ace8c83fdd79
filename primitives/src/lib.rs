#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
//! Domain types of the eplay reports relay.
//!
//! Everything here is free of I/O: the upstream stats records, the
//! normalized [`Campaign`] report and the validated [`ReportPeriod`].

pub use self::{
    amount::{Amount, AmountError},
    campaign::{Campaign, CampaignsResponse, StatsRecord, StatsResponse},
    period::{PeriodError, ReportPeriod, ReportQuery},
};

pub mod amount;
pub mod campaign;
pub mod period;

pub mod util {
    pub mod logging;
    pub mod serde;
}
