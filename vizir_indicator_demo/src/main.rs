// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indicator demos for `vizir_indicator`.
//!
//! Writes `vizir_indicator_demo.html` with one inline SVG per demo. Set `RUST_LOG=debug` to see
//! config resolution, fit-scale resets and transition events.

mod svg;

use std::error::Error;

use kurbo::Rect;
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;
use vizir_indicator::{
    Align, Completion, CompletionReason, DeltaPosition, Domain, FontConfig, GaugeShape,
    HeuristicTextMeasurer, INDICATOR_ID_SPAN, Indicator, IndicatorConfig, Margin, PlotSize,
    RenderPlan, Scene, StepConfig, ThresholdConfig, TransitionConfig, layout_font, resolve,
};

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;

struct Section {
    title: String,
    svgs: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sections = vec![
        number_demo()?,
        delta_demo()?,
        angular_demo()?,
        bullet_demo()?,
        transition_demo()?,
        shared_scene_demo()?,
    ];

    let html = render_report("VizIR indicator demo", &sections);
    std::fs::write("vizir_indicator_demo.html", html)?;
    tracing::info!(sections = sections.len(), "wrote vizir_indicator_demo.html");
    Ok(())
}

fn plot_size() -> PlotSize {
    PlotSize::from_figure(WIDTH, HEIGHT, Margin::default())
}

fn figure() -> Rect {
    Rect::new(0.0, 0.0, WIDTH, HEIGHT)
}

/// Feeds `plan` through the scene and renders the retained marks.
fn render_plan(scene: &mut Scene, svg_scene: &mut svg::SvgScene, plan: &RenderPlan) -> String {
    let diffs = scene.tick(plan.marks(0));
    svg_scene.set_view_box(figure());
    svg_scene.apply_diffs(&diffs);
    svg_scene.to_svg_string()
}

fn draw(config: &IndicatorConfig) -> Result<String, Box<dyn Error>> {
    let mut indicator = Indicator::new(resolve(config, &layout_font())?);
    let plan = indicator.plot(Domain::FULL, plot_size(), &HeuristicTextMeasurer);
    Ok(render_plan(
        &mut Scene::new(),
        &mut svg::SvgScene::default(),
        &plan,
    ))
}

fn number_demo() -> Result<Section, Box<dyn Error>> {
    let mut plain = IndicatorConfig::new(1_234_567.0).with_title("Visitors");
    plain.number.suffix = Some("hits".into());

    let mut styled = IndicatorConfig::new(0.4271)
        .with_valueformat(".1%")
        .with_title("Conversion")
        .with_align(Align::Left);
    styled.number.font = FontConfig {
        color: Some(css::STEEL_BLUE),
        ..FontConfig::sized(60.0)
    };

    Ok(Section {
        title: "Number".into(),
        svgs: vec![draw(&plain)?, draw(&styled)?],
    })
}

fn delta_demo() -> Result<Section, Box<dyn Error>> {
    let base = IndicatorConfig::new(110.0)
        .with_mode("number+delta")
        .with_reference(100.0);
    let mut svgs = Vec::new();
    for position in [
        DeltaPosition::Bottom,
        DeltaPosition::Top,
        DeltaPosition::Left,
        DeltaPosition::Right,
    ] {
        svgs.push(draw(&base.clone().with_delta_position(position))?);
    }
    svgs.push(draw(
        &IndicatorConfig::new(87.5)
            .with_mode("delta")
            .with_reference(100.0)
            .with_percentage(true)
            .with_title("Week over week"),
    )?);

    Ok(Section {
        title: "Delta".into(),
        svgs,
    })
}

fn gauge_config(shape: GaugeShape) -> IndicatorConfig {
    let mut config = IndicatorConfig::new(72.0)
        .with_mode("number+delta+gauge")
        .with_range(0.0, 100.0)
        .with_reference(65.0)
        .with_title("Throughput")
        .with_gauge_shape(shape)
        .with_step(StepConfig::new((0.0, 50.0), css::LIGHT_GRAY))
        .with_step(StepConfig::new((50.0, 80.0), css::GAINSBORO))
        .with_threshold(ThresholdConfig {
            value: 90.0,
            color: Some(css::RED),
            width: Some(3.0),
            ..ThresholdConfig::default()
        });
    config.gauge.bgcolor = Some(css::WHITE);
    config.gauge.value.color = Some(css::DARK_BLUE);
    config
}

fn angular_demo() -> Result<Section, Box<dyn Error>> {
    let mut inside = gauge_config(GaugeShape::Angular);
    inside.gauge.axis.ticks_inside = Some(true);
    inside.gauge.axis.tick_values = Some(vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    inside.gauge.axis.tick_text = Some(
        ["empty", "low", "half", "high", "full"]
            .into_iter()
            .map(String::from)
            .collect(),
    );

    Ok(Section {
        title: "Angular gauge".into(),
        svgs: vec![
            draw(&gauge_config(GaugeShape::Angular))?,
            draw(&inside)?,
        ],
    })
}

fn bullet_demo() -> Result<Section, Box<dyn Error>> {
    let mut gauge_only = gauge_config(GaugeShape::Bullet).with_mode("gauge");
    gauge_only.gauge.axis.tick_format = Some(".0f".into());

    Ok(Section {
        title: "Bullet gauge".into(),
        svgs: vec![draw(&gauge_config(GaugeShape::Bullet))?, draw(&gauge_only)?],
    })
}

fn transition_demo() -> Result<Section, Box<dyn Error>> {
    let config = gauge_config(GaugeShape::Angular);
    let transition = TransitionConfig {
        duration: 750.0,
        easing: Some("cubic-in-out".into()),
    }
    .resolve()?;

    let mut indicator = Indicator::new(resolve(&config, &layout_font())?);
    let mut scene = Scene::new();
    let mut svg_scene = svg::SvgScene::default();
    indicator.begin_transition(
        transition,
        Completion::new(|reason: CompletionReason| {
            tracing::info!(?reason, "transition completed");
        }),
    );

    let mut svgs = Vec::new();
    for elapsed in [0.0, 250.0, 500.0, 750.0] {
        let plan = indicator.frame(Domain::FULL, plot_size(), &HeuristicTextMeasurer, elapsed);
        svgs.push(render_plan(&mut scene, &mut svg_scene, &plan));
    }

    // Retarget, then interrupt halfway.
    indicator.update(resolve(&config.with_value(35.0), &layout_font())?);
    indicator.begin_transition(transition, Completion::noop());
    let plan = indicator.frame(Domain::FULL, plot_size(), &HeuristicTextMeasurer, 375.0);
    svgs.push(render_plan(&mut scene, &mut svg_scene, &plan));
    indicator.cancel_transition();

    Ok(Section {
        title: "Transition frames".into(),
        svgs,
    })
}

fn shared_scene_demo() -> Result<Section, Box<dyn Error>> {
    // Two indicators side by side in one scene, with disjoint id ranges.
    let mut left = Indicator::new(resolve(
        &IndicatorConfig::new(18.0)
            .with_mode("number+gauge")
            .with_range(0.0, 40.0)
            .with_title("Left"),
        &layout_font(),
    )?);
    let mut right = Indicator::new(resolve(
        &IndicatorConfig::new(31.0)
            .with_mode("number+delta+gauge")
            .with_range(0.0, 40.0)
            .with_reference(28.0)
            .with_gauge_shape(GaugeShape::Bullet)
            .with_title("Right"),
        &layout_font(),
    )?);

    let m = &HeuristicTextMeasurer;
    let mut marks = left
        .plot(Domain::new((0.0, 0.45), (0.0, 1.0)), plot_size(), m)
        .marks(0);
    marks.extend(
        right
            .plot(Domain::new((0.6, 1.0), (0.3, 0.7)), plot_size(), m)
            .marks(INDICATOR_ID_SPAN),
    );

    let mut scene = Scene::new();
    let diffs = scene.tick(marks);
    let mut svg_scene = svg::SvgScene::default();
    svg_scene.set_view_box(figure());
    svg_scene.apply_diffs(&diffs);

    Ok(Section {
        title: "Shared scene".into(),
        svgs: vec![svg_scene.to_svg_string()],
    })
}

fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{title}</title>"));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px}\
         section{margin-bottom:32px}\
         .row{display:flex;flex-wrap:wrap;gap:12px}\
         svg{border:1px solid #ddd;background:#fff}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{title}</h1>\n"));
    for section in sections {
        out.push_str(&format!(
            "<section><h2>{}</h2><div class=\"row\">\n",
            section.title
        ));
        for svg in &section.svgs {
            out.push_str(svg);
        }
        out.push_str("</div></section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
