//! `prism`: render a preset scene to PNG from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use prism_renderer::RenderEngine;

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let settings = args.render_settings()?;
    if args.print_settings {
        println!("{}", settings.to_json_string()?);
        return Ok(());
    }

    let mut engine = RenderEngine::from_settings(&settings);
    if let Some(radius) = args.light_radius {
        for index in 0..engine.light_count() {
            engine.set_light_radius(index, radius);
        }
    }
    if let Some((yaw, pitch)) = args.orbit() {
        engine.orbit_camera(yaw, pitch);
    }
    if let Some(zoom) = args.zoom {
        engine.zoom_camera(zoom);
    }

    info!(
        "Rendering {} at {}x{}, {} spp, {} bounces",
        engine.active_preset(),
        settings.width,
        settings.height,
        engine.view().samples_per_pixel(),
        engine.view().max_bounces
    );

    let frames = args.frames.max(1);
    let step = 360.0 / frames as f32;

    for index in 0..frames {
        if index > 0 {
            engine.orbit_camera(step, 0.0);
        }

        let frame = engine.render_frame(settings.width, settings.height);
        if frame.is_empty() {
            log::warn!("Nothing to write for an empty frame");
            continue;
        }

        let path = args.frame_path(index);
        frame
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
