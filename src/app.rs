use leptos::html::Canvas;
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::{AbortHandle, Abortable};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::{MouseEvent, WheelEvent};

use crate::application::{AcquisitionChain, AcquisitionOptions, AcquisitionResult};
use crate::config::ChartConfig;
use crate::domain::chart::{CanvasSize, Viewport, candle_index_at, render};
use crate::domain::errors::AllSourcesExhausted;
use crate::domain::logging::{LogComponent, get_logger, get_time_provider};
use crate::domain::market_data::{OhlcvPoint, SourceKind, Symbol};
use crate::infrastructure::http::{DirectChartClient, RelayChartClient};
use crate::infrastructure::rendering::CanvasRenderer;
use crate::time_utils::format_date_label;

/// Distinguishes canvases when several charts share a page
static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(0);

/// The component's single load phase value. Loading, a held result, or
/// the one user-visible error - never a pile of independent flags.
#[derive(Clone)]
enum LoadPhase {
    Loading,
    Ready(Rc<AcquisitionResult>),
    Failed(Rc<AllSourcesExhausted>),
}

/// Hover readout for one candle, positioned in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl TooltipState {
    pub fn for_point(point: &OhlcvPoint, x: f64, y: f64) -> Self {
        let trend = if point.is_bullish() { "▲" } else { "▼" };
        let text = format!(
            "{} {}\nOpen:   ${:.2}\nHigh:   ${:.2}\nLow:    ${:.2}\nClose:  ${:.2}\nVolume: {}",
            trend,
            format_date_label(point.date),
            point.open.value(),
            point.high.value(),
            point.low.value(),
            point.close.value(),
            point.volume.value(),
        );
        Self { x, y, text }
    }
}

/// Current CSS size of the chart canvas, straight from the DOM so a
/// resized surface is picked up on the next event.
fn canvas_client_size(canvas_id: &str) -> Option<CanvasSize> {
    let element = web_sys::window()?.document()?.get_element_by_id(canvas_id)?;
    Some(CanvasSize::new(
        f64::from(element.client_width()),
        f64::from(element.client_height()),
    ))
}

/// Interactive daily candlestick chart. The embedding page supplies the
/// configuration; everything else (acquisition, viewport, drawing) is
/// owned here.
#[component]
pub fn OhlcChart(config: ChartConfig) -> impl IntoView {
    let ChartConfig { symbol, days, use_real_data, width, height } = config;
    let symbol = Symbol::from(symbol.as_str());
    let days = days.max(1);
    let canvas_id = format!("ohlc-canvas-{}", NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed));

    let phase = create_rw_signal(LoadPhase::Loading);
    let viewport = create_rw_signal(Viewport::new(0));
    let tooltip = create_rw_signal::<Option<TooltipState>>(None);
    let canvas_ref = create_node_ref::<Canvas>();

    // Supersession guard: only the newest request may apply its result
    let generation = Rc::new(Cell::new(0u64));
    let inflight: Rc<RefCell<Option<AbortHandle>>> = Rc::new(RefCell::new(None));

    let load = {
        let generation = Rc::clone(&generation);
        let inflight = Rc::clone(&inflight);
        let symbol = symbol.clone();
        Rc::new(move || {
            let this_generation = generation.get() + 1;
            generation.set(this_generation);
            if let Some(handle) = inflight.borrow_mut().take() {
                handle.abort();
            }
            phase.set(LoadPhase::Loading);
            tooltip.set(None);

            let (handle, registration) = AbortHandle::new_pair();
            *inflight.borrow_mut() = Some(handle);

            let generation = Rc::clone(&generation);
            let symbol = symbol.clone();
            spawn_local(async move {
                let chain = AcquisitionChain::new(vec![
                    Box::new(DirectChartClient::new()),
                    Box::new(RelayChartClient::new()),
                ]);
                let options = AcquisitionOptions {
                    days,
                    use_real_data,
                    allow_synthetic: true,
                };
                let now = get_time_provider().current_timestamp();
                let mut rng = SmallRng::seed_from_u64(now ^ this_generation);

                let outcome =
                    Abortable::new(chain.acquire(&symbol, &options, &mut rng, now), registration)
                        .await;
                let Ok(result) = outcome else {
                    // Aborted by a newer load or by unmount
                    return;
                };
                if generation.get() != this_generation {
                    get_logger().info(
                        LogComponent::Presentation("OhlcChart"),
                        "discarding superseded acquisition result",
                    );
                    return;
                }
                match result {
                    Ok(acquired) => {
                        viewport.set(Viewport::new(acquired.series.len()));
                        phase.set(LoadPhase::Ready(Rc::new(acquired)));
                    }
                    Err(error) => {
                        phase.set(LoadPhase::Failed(Rc::new(error)));
                    }
                }
            });
        })
    };

    // Initial acquisition
    load();

    {
        let inflight = Rc::clone(&inflight);
        on_cleanup(move || {
            if let Some(handle) = inflight.borrow_mut().take() {
                handle.abort();
            }
        });
    }

    // Redraw on every phase or viewport change. Surface dimensions are
    // re-read inside, so a resized canvas corrects itself on next draw.
    let draw_canvas_id = canvas_id.clone();
    create_effect(move |_| {
        let current = phase.get();
        let vp = viewport.get();
        if canvas_ref.get().is_none() {
            return;
        }
        let LoadPhase::Ready(result) = current else {
            return;
        };
        let renderer = match CanvasRenderer::attach(&draw_canvas_id) {
            Ok(renderer) => renderer,
            Err(error) => {
                get_logger().error(
                    LogComponent::Presentation("OhlcChart"),
                    &format!("canvas unavailable: {error}"),
                );
                return;
            }
        };
        let size = renderer.surface_size();
        let commands = render(&result.series, &vp, size, result.source);
        if let Err(error) = renderer.replay(&commands) {
            get_logger().error(
                LogComponent::Presentation("OhlcChart"),
                &format!("draw failed: {error}"),
            );
        }
    });

    let on_mouse_down = move |ev: MouseEvent| {
        tooltip.set(None);
        viewport.update(|v| v.pointer_down(f64::from(ev.offset_x())));
    };

    let move_canvas_id = canvas_id.clone();
    let on_mouse_move = move |ev: MouseEvent| {
        let x = f64::from(ev.offset_x());
        let y = f64::from(ev.offset_y());
        let size = canvas_client_size(&move_canvas_id);
        if viewport.with_untracked(|v| v.is_dragging()) {
            let canvas_width = size.map(|s| s.width).unwrap_or(0.0);
            viewport.update(|v| v.pointer_move(x, canvas_width));
            return;
        }
        let LoadPhase::Ready(result) = phase.get_untracked() else {
            return;
        };
        let hovered = size
            .and_then(|size| viewport.with_untracked(|v| candle_index_at(x, v, size)))
            .and_then(|index| result.series.get(index))
            .map(|point| TooltipState::for_point(point, x, y));
        tooltip.set(hovered);
    };

    let on_mouse_up = move |_ev: MouseEvent| {
        viewport.update(|v| v.pointer_up());
    };

    let on_mouse_leave = move |_ev: MouseEvent| {
        tooltip.set(None);
        viewport.update(|v| v.pointer_up());
    };

    let on_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        viewport.update(|v| v.wheel(ev.delta_y()));
    };

    let warning_notice = move || match phase.get() {
        LoadPhase::Ready(result) => result.warning.clone().or_else(|| {
            (result.source == SourceKind::Synthetic)
                .then(|| "showing simulated data".to_string())
        }),
        _ => None,
    };

    let retry = Rc::clone(&load);
    let refresh = Rc::clone(&load);
    let symbol_label = symbol.value().to_string();

    view! {
        <style>
            {r#"
            .ohlc-chart {
                display: flex;
                flex-direction: column;
                gap: 6px;
                font-family: 'SF Pro Display', -apple-system, sans-serif;
                color: #e0e0e0;
            }

            .ohlc-toolbar {
                display: flex;
                align-items: center;
                gap: 8px;
            }

            .ohlc-symbol {
                font-weight: 700;
                font-size: 15px;
                margin-right: auto;
            }

            .ohlc-btn {
                background: #4a5d73;
                color: white;
                border: none;
                padding: 4px 10px;
                border-radius: 5px;
                cursor: pointer;
                font-size: 13px;
            }

            .ohlc-btn:hover {
                background: #5a6d83;
            }

            .ohlc-stage {
                position: relative;
                flex: 1;
                min-height: 0;
            }

            .ohlc-canvas {
                width: 100%;
                height: 100%;
                display: block;
                border: 1px solid #4a5d73;
                border-radius: 8px;
                background: #1a1a1a;
                cursor: crosshair;
            }

            .ohlc-warning {
                position: absolute;
                left: 12px;
                bottom: 30px;
                background: rgba(243, 156, 18, 0.15);
                border: 1px solid #f39c12;
                color: #f39c12;
                padding: 3px 8px;
                border-radius: 4px;
                font-size: 11px;
                pointer-events: none;
            }

            .ohlc-status {
                position: absolute;
                inset: 0;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                gap: 10px;
                font-size: 13px;
                color: #a0a0a0;
            }

            .ohlc-error {
                color: #ff4444;
                max-width: 80%;
                text-align: center;
            }

            .ohlc-tooltip {
                position: absolute;
                background: rgba(0, 0, 0, 0.9);
                color: white;
                padding: 8px 12px;
                border-radius: 6px;
                font-size: 12px;
                font-family: 'Courier New', monospace;
                white-space: pre-line;
                pointer-events: none;
                z-index: 10;
                border: 1px solid #4a5d73;
                transform: translate(12px, -100%);
                line-height: 1.4;
            }
            "#}
        </style>
        <div class="ohlc-chart" style=format!("width: {width}; height: {height};")>
            <div class="ohlc-toolbar">
                <span class="ohlc-symbol">{symbol_label}</span>
                <button class="ohlc-btn" on:click=move |_| viewport.update(|v| v.zoom_in())>
                    "+"
                </button>
                <button class="ohlc-btn" on:click=move |_| viewport.update(|v| v.zoom_out())>
                    "−"
                </button>
                <button class="ohlc-btn" on:click=move |_| viewport.update(|v| v.reset())>
                    "Reset"
                </button>
                <button class="ohlc-btn" on:click=move |_| refresh()>
                    "Refresh"
                </button>
            </div>
            <div class="ohlc-stage">
                <canvas
                    id=canvas_id
                    class="ohlc-canvas"
                    node_ref=canvas_ref
                    on:mousedown=on_mouse_down
                    on:mousemove=on_mouse_move
                    on:mouseup=on_mouse_up
                    on:mouseleave=on_mouse_leave
                    on:wheel=on_wheel
                />
                {move || {
                    warning_notice()
                        .map(|notice| view! { <div class="ohlc-warning">{notice}</div> })
                }}
                {move || {
                    tooltip
                        .get()
                        .map(|tip| {
                            view! {
                                <div
                                    class="ohlc-tooltip"
                                    style=format!("left: {}px; top: {}px;", tip.x, tip.y)
                                >
                                    {tip.text}
                                </div>
                            }
                        })
                }}
                {move || match phase.get() {
                    LoadPhase::Loading => view! {
                        <div class="ohlc-status">"Loading chart data..."</div>
                    }
                    .into_view(),
                    LoadPhase::Failed(error) => {
                        let retry = Rc::clone(&retry);
                        view! {
                            <div class="ohlc-status">
                                <div class="ohlc-error">{error.to_string()}</div>
                                <button class="ohlc-btn" on:click=move |_| retry()>
                                    "Retry"
                                </button>
                            </div>
                        }
                        .into_view()
                    }
                    LoadPhase::Ready(_) => ().into_view(),
                }}
            </div>
        </div>
    }
}
