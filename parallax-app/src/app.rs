use crate::Args;
use glam::Vec3;
use parallax_data::{DataError, DatasetDescription, ManifestDataParser, ParserConfig};
use tracing::info;

pub fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

/// Resolve the parser config: file first, then command-line overrides.
pub fn build_config(args: &Args) -> Result<ParserConfig, DataError> {
    let mut config = match &args.config {
        Some(path) => ParserConfig::from_path(path)?,
        None => ParserConfig::default(),
    };

    if let Some(data) = &args.data {
        config = config.with_data(data);
    }
    if let Some(scale) = args.scene_scale {
        config = config.with_scene_scale(scale);
    }
    if let Some(name) = &args.manifest {
        config = config.with_manifest_name(name);
    }
    if args.no_probe_images {
        config = config.with_probe_images(false);
    }
    Ok(config)
}

pub fn run(args: &Args) -> Result<(), DataError> {
    let config = build_config(args)?;
    info!("Loading capture from {}", config.manifest_path().display());

    let parser = ManifestDataParser::new(config);
    let dataset = parser.parse(args.split)?;

    print_summary(&dataset);
    if args.list_images {
        for (i, path) in dataset.image_filenames.iter().enumerate() {
            println!("  [{:>4}] {}", i, path.display());
        }
    }
    Ok(())
}

fn print_summary(dataset: &DatasetDescription) {
    let cameras = &dataset.cameras;
    let scene_box = &dataset.scene_box;

    println!("Frames: {}", dataset.len());
    println!(
        "Camera: {:?} {}x{} fx={:.3} fy={:.3} cx={:.3} cy={:.3}",
        cameras.camera_type,
        cameras.width,
        cameras.height,
        cameras.fx,
        cameras.fy,
        cameras.cx,
        cameras.cy
    );
    println!("Distortion [k1 k2 k3 k4 p1 p2]: {:?}", cameras.distortion.to_array());
    println!("Scene box: {} .. {}", scene_box.min, scene_box.max);

    let origins: Vec<Vec3> = cameras
        .camera_to_worlds
        .iter()
        .map(|pose| Vec3::from(pose.translation))
        .collect();
    let outside = origins.iter().filter(|o| !scene_box.contains(**o)).count();
    if outside > 0 {
        println!("Cameras outside scene box: {}", outside);
    }

    if let Some(depth) = dataset.depth(0) {
        let (min, max) = depth
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        println!(
            "Depth maps: {} x ({}x{}), first frame range [{:.4}, {:.4}]",
            dataset.depths.len(),
            depth.ncols(),
            depth.nrows(),
            min,
            max
        );
    }
}
