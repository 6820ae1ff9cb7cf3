pub mod dto;
pub mod primary;
pub mod secondary;

pub use primary::DirectChartClient;
pub use secondary::RelayChartClient;

use futures::future::{Either, select};
use futures::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::domain::errors::SourceError;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::RawQuotes;

/// A stalled request fails the source the same way a transport error
/// does, letting the chain move on instead of hanging the component.
const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Shared GET + decode path for both chart clients. Transport problems,
/// timeouts, and non-success statuses become `Transport`; undecodable
/// bodies become `MalformedPayload`.
pub(crate) async fn fetch_chart_payload(url: &str) -> Result<RawQuotes, SourceError> {
    get_logger().info(
        LogComponent::Infrastructure("ChartApi"),
        &format!("fetching daily quotes from {url}"),
    );

    let request = Request::get(url).send();
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    pin_mut!(request);
    pin_mut!(timeout);

    let response = match select(request, timeout).await {
        Either::Left((result, _)) => {
            result.map_err(|e| SourceError::Transport(format!("request failed: {e}")))?
        }
        Either::Right(_) => {
            return Err(SourceError::Transport(format!(
                "no response within {REQUEST_TIMEOUT_MS}ms"
            )));
        }
    };

    if !response.ok() {
        return Err(SourceError::Transport(format!(
            "http status {}",
            response.status()
        )));
    }

    let payload: dto::ChartResponse = response
        .json()
        .await
        .map_err(|e| SourceError::MalformedPayload(format!("undecodable body: {e}")))?;

    payload.into_raw_quotes()
}
