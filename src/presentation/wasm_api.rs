use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::app::OhlcChart;
use crate::config::ChartConfig;
use crate::domain::logging::{LogComponent, get_logger};

/// JS-facing mount point. The embedding page hands over a container id
/// and a JSON config object; the component owns everything after that.
///
/// ```js
/// mountOhlcChart("chart-root", JSON.stringify({ symbol: "NVDA", days: 180 }));
/// ```
#[wasm_bindgen(js_name = mountOhlcChart)]
pub fn mount_ohlc_chart(container_id: String, config_json: String) -> Result<(), JsValue> {
    let config: ChartConfig = if config_json.trim().is_empty() {
        ChartConfig::default()
    } else {
        serde_json::from_str(&config_json)
            .map_err(|e| JsValue::from_str(&format!("invalid chart config: {e}")))?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let mount_point = document
        .get_element_by_id(&container_id)
        .ok_or_else(|| JsValue::from_str(&format!("container #{container_id} not found")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| JsValue::from_str("container is not an HTML element"))?;

    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        &format!("mounting chart for {} into #{container_id}", config.symbol),
    );

    leptos::mount_to(mount_point, move || {
        leptos::view! { <OhlcChart config=config /> }
    });

    Ok(())
}
