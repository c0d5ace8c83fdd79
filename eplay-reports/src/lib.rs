#![deny(clippy::all)]
#![deny(rust_2018_idioms)]
//! A relay for the eplay24 partner reporting API.
//!
//! `GET /api?startdate=YYYY-MM-DD&enddate=YYYY-MM-DD` fetches the stats of the
//! configured partner for the period and responds with the normalized
//! [`Campaign`](primitives::Campaign) reports.

pub use self::{
    application::{Application, Config},
    response::ResponseError,
};

pub mod application;
pub mod response;
pub mod routes;
pub mod upstream;
