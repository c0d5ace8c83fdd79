//! `GET /api` - the campaign report for a date period

use std::sync::Arc;

use axum::{extract::RawQuery, Extension, Json};
use primitives::{Campaign, CampaignsResponse, ReportPeriod, ReportQuery};
use slog::{debug, error, info, warn};
use url::form_urlencoded;

use crate::{response::ResponseError, Application};

/// `GET /api?startdate=YYYY-MM-DD&enddate=YYYY-MM-DD`
///
/// Makes exactly one request to the reporting API for valid periods and none otherwise.
/// For a repeated parameter only its first value is used.
pub async fn get_report(
    Extension(app): Extension<Arc<Application>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<CampaignsResponse>, ResponseError> {
    let logger = &app.logger;
    let query = form_urlencoded::parse(raw_query.unwrap_or_default().as_bytes())
        .into_owned()
        .collect::<ReportQuery>();

    info!(logger, "Received report request"; "startdate" => ?query.startdate, "enddate" => ?query.enddate);

    let period = ReportPeriod::try_from(query).map_err(|err| {
        warn!(logger, "Invalid report period: {}", err);

        ResponseError::from(err)
    })?;

    debug!(logger, "Fetching stats from the reporting API"; "start" => %period.start(), "end" => %period.end(), "upstream" => %app.upstream.url());

    let stats = app
        .upstream
        .fetch_stats(app.config.credentials(), &period)
        .await
        .map_err(|err| {
            error!(logger, "Fetching stats from the reporting API failed: {}", err; "startdate" => period.start_date(), "enddate" => period.end_date());

            ResponseError::upstream()
        })?;

    info!(logger, "Reporting API responded"; "status" => stats.status.as_u16(), "results" => stats.response.results.len());

    Ok(Json(Campaign::from_response(&stats.response, logger)))
}
