use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_core::{MaterialPreset, RenderSettings, ScenePreset};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments. Anything left unset falls back to the settings
/// file, then to the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Render Prism scenes to PNG without a window")]
pub struct Args {
    /// JSON render settings to start from
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Scene preset, by name or id (single, three, mirror, rainbow, glass, shapes)
    #[arg(short, long)]
    pub preset: Option<ScenePreset>,

    /// Material preset for the primary object
    #[arg(short, long)]
    pub material: Option<MaterialPreset>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum reflection/refraction depth (0-8)
    #[arg(short, long)]
    pub bounces: Option<u32>,

    /// Anti-aliasing level: 0, 1 or 2 for 1, 4 or 16 samples per pixel
    #[arg(long)]
    pub aa: Option<u32>,

    /// Sample area lights for soft shadows
    #[arg(long)]
    pub soft_shadows: bool,

    /// Shadow rays per light when soft shadows are on
    #[arg(long)]
    pub shadow_samples: Option<u32>,

    /// Radius given to every light (enables soft shadows to take effect)
    #[arg(long)]
    pub light_radius: Option<f32>,

    /// Hide the ground plane
    #[arg(long)]
    pub no_ground: bool,

    /// Hide the ground grid overlay
    #[arg(long)]
    pub no_grid: bool,

    /// Ground grid cell size
    #[arg(long)]
    pub grid_scale: Option<f32>,

    /// Ground plane reflectivity (0-1)
    #[arg(long)]
    pub ground_reflectivity: Option<f32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Orbit the camera around its target before rendering, in degrees
    #[arg(long, num_args = 2, value_names = ["YAW", "PITCH"], allow_negative_numbers = true)]
    pub orbit: Option<Vec<f32>>,

    /// Move the camera toward (negative) or away from its target
    #[arg(long, allow_negative_numbers = true)]
    pub zoom: Option<f32>,

    /// Render a turntable of this many frames, one full turn in total
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Output file; turntables append a frame number to the stem
    #[arg(short, long, default_value = "prism.png")]
    pub output: PathBuf,

    /// Print the resolved settings as JSON and exit
    #[arg(long)]
    pub print_settings: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Merge the settings file (if any) with the command line overrides.
    pub fn render_settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.settings {
            Some(path) => RenderSettings::from_json_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => RenderSettings::default(),
        };

        if let Some(preset) = self.preset {
            settings.preset = preset;
        }
        if self.material.is_some() {
            settings.material = self.material;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(bounces) = self.bounces {
            settings.view.max_bounces = bounces;
        }
        if let Some(aa) = self.aa {
            settings.view.anti_aliasing = aa;
        }
        if self.soft_shadows {
            settings.view.soft_shadows = true;
        }
        if let Some(samples) = self.shadow_samples {
            settings.view.shadow_samples = samples;
        }
        if self.no_ground {
            settings.view.show_ground_plane = false;
        }
        if self.no_grid {
            settings.view.show_grid = false;
        }
        if let Some(scale) = self.grid_scale {
            settings.grid_scale = scale;
        }
        if let Some(reflectivity) = self.ground_reflectivity {
            settings.ground_reflectivity = reflectivity;
        }
        if let Some(fov) = self.fov {
            settings.camera.fov = fov;
        }

        settings.view = settings.view.clamped();
        Ok(settings)
    }

    /// Yaw and pitch deltas from `--orbit`, if given.
    pub fn orbit(&self) -> Option<(f32, f32)> {
        match self.orbit.as_deref() {
            Some([yaw, pitch]) => Some((*yaw, *pitch)),
            _ => None,
        }
    }

    /// Output path for frame `index`.
    pub fn frame_path(&self, index: u32) -> PathBuf {
        if self.frames <= 1 {
            return self.output.clone();
        }
        let stem = self
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "prism".to_string());
        let extension = self
            .output
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "png".to_string());
        self.output
            .with_file_name(format!("{}_{:04}.{}", stem, index, extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "prism", "--preset", "glass", "--bounces", "20", "--aa", "1", "--no-grid",
            "--orbit", "-30", "15", "--material", "mirror",
        ]);
        let settings = args.render_settings().unwrap();

        assert_eq!(settings.preset, ScenePreset::Glass);
        assert_eq!(settings.material, Some(MaterialPreset::Mirror));
        assert_eq!(settings.view.max_bounces, prism_core::settings::MAX_BOUNCES);
        assert_eq!(settings.view.anti_aliasing, 1);
        assert!(!settings.view.show_grid);
        assert_eq!(args.orbit(), Some((-30.0, 15.0)));
    }

    #[test]
    fn test_preset_by_id() {
        let args = Args::parse_from(["prism", "--preset", "3"]);
        assert_eq!(args.preset, Some(ScenePreset::Rainbow));
    }

    #[test]
    fn test_frame_paths() {
        let single = Args::parse_from(["prism", "-o", "out/shot.png"]);
        assert_eq!(single.frame_path(0), PathBuf::from("out/shot.png"));

        let turntable = Args::parse_from(["prism", "-o", "out/shot.png", "--frames", "12"]);
        assert_eq!(turntable.frame_path(7), PathBuf::from("out/shot_0007.png"));
    }
}
